//! Lossless PNG encoding.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::EncodeError;
use crate::buffer::{ColorMode, PixelBuffer};

/// Encode a buffer to PNG bytes, keeping its color mode.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let color = match buffer.mode() {
        ColorMode::Gray => ExtendedColorType::L8,
        ColorMode::Rgb => ExtendedColorType::Rgb8,
        ColorMode::Rgba => ExtendedColorType::Rgba8,
    };

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(buffer.pixels(), buffer.width(), buffer.height(), color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(out)
}
