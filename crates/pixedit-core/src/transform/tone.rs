//! Per-pixel tonal transforms: invert, color enhancement and grayscale.

use crate::buffer::{ColorMode, PixelBuffer};
use crate::error::{EngineError, Result};
use crate::luminance::luminance_u8;

/// Enhancement factor used when the caller does not pick one.
pub const DEFAULT_ENHANCE_FACTOR: f32 = 1.5;

/// Invert color channels (`255 - v`), leaving alpha untouched.
///
/// # Mode contract
///
/// The output mode always equals the input mode. Gray and RGB buffers are
/// inverted in place of their own channels, which gives the same bytes as
/// converting to RGB, inverting and converting back. RGBA is treated as color
/// plus a separate alpha plane: only the color plane is inverted.
pub fn invert(image: &PixelBuffer) -> PixelBuffer {
    let mut pixels = image.pixels().to_vec();

    if image.mode().has_alpha() {
        for px in pixels.chunks_exact_mut(4) {
            px[0] = 255 - px[0];
            px[1] = 255 - px[1];
            px[2] = 255 - px[2];
        }
    } else {
        for v in pixels.iter_mut() {
            *v = 255 - *v;
        }
    }

    PixelBuffer::from_raw_parts(image.width(), image.height(), image.mode(), pixels)
}

/// Blend each pixel with its own gray value.
///
/// Formula per color channel: `gray + factor * (original - gray)`, rounded and
/// clamped to `[0, 255]`.
///
/// - `factor > 1` increases saturation
/// - `0 <= factor < 1` desaturates
/// - `factor == 0` yields gray (in the buffer's own mode)
///
/// Gray buffers have nothing to enhance and are returned unchanged. Alpha is
/// preserved.
///
/// # Errors
///
/// `InvalidParameter` if `factor` is NaN or infinite.
pub fn enhance_color(image: &PixelBuffer, factor: f32) -> Result<PixelBuffer> {
    if !factor.is_finite() {
        return Err(EngineError::InvalidParameter(format!(
            "enhance factor must be finite, got {}",
            factor
        )));
    }
    if image.mode() == ColorMode::Gray {
        return Ok(image.clone());
    }

    let channels = image.channels();
    let mut pixels = image.pixels().to_vec();

    for px in pixels.chunks_exact_mut(channels) {
        let gray = luminance_u8(px[0], px[1], px[2]) as f32;
        for v in px.iter_mut().take(3) {
            let blended = gray + factor * (*v as f32 - gray);
            *v = blended.round().clamp(0.0, 255.0) as u8;
        }
    }

    Ok(PixelBuffer::from_raw_parts(
        image.width(),
        image.height(),
        image.mode(),
        pixels,
    ))
}

/// Luminance conversion to a single-channel buffer. Alpha is discarded.
pub fn grayscale(image: &PixelBuffer) -> PixelBuffer {
    image.convert_mode(ColorMode::Gray)
}
