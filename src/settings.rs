use std::path::{Path, PathBuf};

/// Encoding parameters for one batch run.
///
/// Mutated live by the UI controls; a run reads a snapshot taken at the
/// moment it starts, never mid-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    /// Lossy quality percentage, 1-100. Ignored when `lossless` is set.
    pub quality: u8,
    /// Encode in lossless mode, preserving exact pixel values.
    pub lossless: bool,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            quality: 80,
            lossless: false,
        }
    }
}

/// Where converted files are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    /// Each output lands in its own input file's directory.
    #[default]
    SourceDirectory,
    /// Every output lands in the one given directory.
    Directory(PathBuf),
}

impl OutputTarget {
    /// Resolve the output directory for a given input file.
    pub fn resolve(&self, input: &Path) -> PathBuf {
        match self {
            OutputTarget::SourceDirectory => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
            OutputTarget::Directory(dir) => dir.clone(),
        }
    }
}

/// Immutable snapshot of everything a single batch run needs.
///
/// Built when the user triggers a run. Control changes made while the
/// run is in flight cannot reach it.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Input files in selection order.
    pub files: Vec<PathBuf>,
    pub output: OutputTarget,
    pub settings: EncodeSettings,
    /// Keep the source file after a successful conversion.
    pub keep_original: bool,
}

impl BatchPlan {
    /// Create a plan with default settings for the given files.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            output: OutputTarget::default(),
            settings: EncodeSettings::default(),
            keep_original: true,
        }
    }

    /// Builder pattern for setting the output target
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    /// Builder pattern for setting the encoding parameters
    pub fn with_settings(mut self, settings: EncodeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder pattern for setting whether originals survive conversion
    pub fn with_keep_original(mut self, keep_original: bool) -> Self {
        self.keep_original = keep_original;
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = EncodeSettings::default();
        assert_eq!(settings.quality, 80);
        assert!(!settings.lossless);
    }

    #[test]
    fn test_resolve_source_directory() {
        let target = OutputTarget::SourceDirectory;
        let dir = target.resolve(Path::new("/photos/trip/img.png"));
        assert_eq!(dir, Path::new("/photos/trip"));
    }

    #[test]
    fn test_resolve_fixed_directory() {
        let target = OutputTarget::Directory(PathBuf::from("/converted"));
        let dir = target.resolve(Path::new("/photos/trip/img.png"));
        assert_eq!(dir, Path::new("/converted"));
    }

    #[test]
    fn test_plan_defaults() {
        let plan = BatchPlan::new(vec![PathBuf::from("a.png")]);
        assert_eq!(plan.len(), 1);
        assert!(plan.keep_original);
        assert_eq!(plan.output, OutputTarget::SourceDirectory);
    }

    #[test]
    fn test_plan_builders() {
        let plan = BatchPlan::new(vec![])
            .with_output(OutputTarget::Directory(PathBuf::from("/out")))
            .with_settings(EncodeSettings {
                quality: 50,
                lossless: true,
            })
            .with_keep_original(false);
        assert!(plan.is_empty());
        assert!(plan.settings.lossless);
        assert_eq!(plan.settings.quality, 50);
        assert!(!plan.keep_original);
        assert_eq!(plan.output, OutputTarget::Directory(PathBuf::from("/out")));
    }
}
