//! JPEG encoding for export.
//!
//! JPEG has no alpha channel: `Rgba` buffers are flattened to `Rgb` by
//! discarding alpha before encoding. `Gray` buffers are written as
//! single-channel JPEGs.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::{validate_raw, EncodeError};
use crate::buffer::{AlphaHandling, ColorMode, PixelBuffer};

/// Encode a buffer to JPEG bytes.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web/social media
/// * Below 60: Low quality, visible artifacts
///
/// Quality is clamped to 1-100.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, EncodeError> {
    match buffer.mode() {
        ColorMode::Gray => encode_jpeg_raw(
            buffer.pixels(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::L8,
            quality,
        ),
        ColorMode::Rgb => encode_jpeg_raw(
            buffer.pixels(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgb8,
            quality,
        ),
        ColorMode::Rgba => {
            let rgb = buffer.convert_mode_with(ColorMode::Rgb, AlphaHandling::Discard);
            encode_jpeg_raw(
                rgb.pixels(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
                quality,
            )
        }
    }
}

/// Encode raw `L8` or `Rgb8` samples to JPEG bytes.
pub fn encode_jpeg_raw(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let channels = match color {
        ExtendedColorType::L8 => 1,
        ExtendedColorType::Rgb8 => 3,
        other => {
            return Err(EncodeError::UnsupportedFormat(format!(
                "JPEG cannot store {:?} samples",
                other
            )))
        }
    };
    validate_raw(pixels, width, height, channels)?;

    let quality = quality.clamp(1, 100);
    let mut out = Vec::new();

    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(pixels, width, height, color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::test_support::gradient;

    fn assert_jpeg_markers(bytes: &[u8]) {
        // SOI and EOI markers
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_rgb() {
        let buffer = PixelBuffer::filled(100, 100, ColorMode::Rgb, 128).unwrap();
        assert_jpeg_markers(&encode_jpeg(&buffer, 90).unwrap());
    }

    #[test]
    fn test_encode_rgba_drops_alpha() {
        let buffer = gradient(10, 10, ColorMode::Rgba);
        let bytes = encode_jpeg(&buffer, 90).unwrap();
        assert_jpeg_markers(&bytes);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn test_encode_gray() {
        let buffer = PixelBuffer::filled(8, 8, ColorMode::Gray, 60).unwrap();
        let bytes = encode_jpeg(&buffer, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_color());
    }

    #[test]
    fn test_quality_clamping() {
        let buffer = PixelBuffer::filled(10, 10, ColorMode::Rgb, 128).unwrap();
        assert!(encode_jpeg(&buffer, 0).is_ok());
        assert!(encode_jpeg(&buffer, 255).is_ok());
    }

    #[test]
    fn test_raw_invalid_pixel_data() {
        let pixels = vec![128u8; 99 * 100 * 3]; // One row short
        let result = encode_jpeg_raw(&pixels, 100, 100, ExtendedColorType::Rgb8, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_raw_zero_dimensions() {
        let result = encode_jpeg_raw(&[], 0, 100, ExtendedColorType::Rgb8, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_raw_rejects_alpha() {
        let result = encode_jpeg_raw(&[0; 4], 1, 1, ExtendedColorType::Rgba8, 90);
        assert!(matches!(result, Err(EncodeError::UnsupportedFormat(_))));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
