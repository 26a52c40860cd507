use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;
use webp::{Encoder, WebPMemory};

use crate::settings::EncodeSettings;

/// Extension of the target codec's output files.
pub const WEBP_EXTENSION: &str = "webp";

/// Converts a single image file to WebP with fixed settings.
pub struct ImageConverter {
    settings: EncodeSettings,
}

impl ImageConverter {
    pub fn new(settings: EncodeSettings) -> Self {
        Self { settings }
    }

    /// Decode `input_path`, normalize its color layout, encode it with
    /// this converter's settings, and write the result to `output_path`.
    pub fn convert(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        let img = image::open(input_path)
            .with_context(|| format!("Failed to read image: {}", input_path.display()))?;

        let img = normalize_color(img);

        let encoder = Encoder::from_image(&img)
            .map_err(|e| anyhow::anyhow!("Failed to create encoder: {e}"))?;

        let webp_data = if self.settings.lossless {
            // Lossless mode ignores the quality value entirely.
            encoder.encode_lossless()
        } else {
            encoder.encode(f32::from(self.settings.quality))
        };

        save_webp_data(&webp_data, output_path)
    }
}

/// Normalize a decoded image to one of the two layouts the WebP encoder
/// accepts. Sources carrying an alpha channel (palette-indexed inputs
/// with transparency decode to an alpha format) keep it as RGBA8;
/// everything else flattens to RGB8.
pub fn normalize_color(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn save_webp_data(webp_data: &WebPMemory, output_path: &Path) -> Result<()> {
    std::fs::write(output_path, &**webp_data)
        .with_context(|| format!("Failed to save WebP file: {}", output_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 13 % 256) as u8, (y * 7 % 256) as u8, 128])
        })
    }

    #[test]
    fn test_normalize_keeps_rgb8() {
        let img = DynamicImage::ImageRgb8(gradient(4, 4));
        assert!(matches!(normalize_color(img), DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_normalize_keeps_rgba8() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert!(matches!(normalize_color(img), DynamicImage::ImageRgba8(_)));
    }

    #[test]
    fn test_normalize_flattens_grayscale() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(4, 4));
        assert!(matches!(normalize_color(img), DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn test_normalize_preserves_alpha_channel() {
        let img = DynamicImage::ImageLumaA8(GrayAlphaImage::new(4, 4));
        assert!(matches!(normalize_color(img), DynamicImage::ImageRgba8(_)));
    }

    #[test]
    fn test_lossy_output_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.webp");
        gradient(100, 60).save(&input).unwrap();

        let converter = ImageConverter::new(EncodeSettings {
            quality: 80,
            lossless: false,
        });
        converter.convert(&input, &output).unwrap();

        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 60);
    }

    #[test]
    fn test_lossless_output_is_pixel_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.webp");
        let source = gradient(32, 32);
        source.save(&input).unwrap();

        let converter = ImageConverter::new(EncodeSettings {
            quality: 1,
            lossless: true,
        });
        converter.convert(&input, &output).unwrap();

        let decoded = image::open(&output).unwrap().to_rgb8();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_decode_failure_reports_input_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.jpg");
        let output = dir.path().join("out.webp");
        std::fs::write(&input, b"definitely not an image").unwrap();

        let converter = ImageConverter::new(EncodeSettings::default());
        let err = converter.convert(&input, &output).unwrap_err();
        assert!(format!("{err:#}").contains("broken.jpg"));
        assert!(!output.exists());
    }
}
