use std::path::Path;
use std::time::Duration;

/// Extensions offered by the image picker dialog. Hints only: the real
/// support boundary is whatever the decoder accepts, and the dialog
/// carries an all-files fallback.
pub const DIALOG_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff"];

/// File name component of a path, for progress display.
pub fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Truncate a long path for a one-line label, keeping the tail.
pub fn truncate_path_label(path: &str, max_chars: usize) -> String {
    let count = path.chars().count();
    if count <= max_chars {
        return path.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let tail: String = path.chars().skip(count - keep).collect();
    format!("...{tail}")
}

/// Format duration in human-readable format
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_display_name() {
        assert_eq!(file_display_name(Path::new("/a/b/photo.png")), "photo.png");
    }

    #[test]
    fn test_truncate_short_path_unchanged() {
        assert_eq!(truncate_path_label("/tmp/out", 40), "/tmp/out");
    }

    #[test]
    fn test_truncate_long_path_keeps_tail() {
        let long = "/home/someone/pictures/holidays/2024/converted";
        let label = truncate_path_label(long, 20);
        assert_eq!(label.chars().count(), 20);
        assert!(label.starts_with("..."));
        assert!(label.ends_with("converted"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_duration(Duration::from_secs(3700)), "1h 1m 40s");
    }
}
