//! Slider adjustments: brightness and contrast.
//!
//! Both take an `amount` in `-1.0..=1.0`, where `0.0` leaves the image
//! unchanged. Samples are normalized to `0.0..=1.0`, adjusted, then clamped
//! and rounded back to 8 bits. Alpha is never touched; Gray buffers adjust
//! their single channel.

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};

/// Shift every color sample by `amount` of full scale.
///
/// Formula: `output = input + amount`
///
/// # Errors
///
/// `InvalidParameter` if `amount` is not finite or outside `-1.0..=1.0`.
pub fn brightness(image: &PixelBuffer, amount: f32) -> Result<PixelBuffer> {
    check_amount("brightness", amount)?;
    Ok(map_color(image, |v| v + amount))
}

/// Stretch (`amount > 0`) or flatten (`amount < 0`) color samples around
/// mid-gray. `-1.0` collapses the image to flat gray.
///
/// Formula: `output = (input - 0.5) * (1 + amount) + 0.5`
///
/// # Errors
///
/// `InvalidParameter` if `amount` is not finite or outside `-1.0..=1.0`.
pub fn contrast(image: &PixelBuffer, amount: f32) -> Result<PixelBuffer> {
    check_amount("contrast", amount)?;
    let factor = 1.0 + amount;
    Ok(map_color(image, |v| (v - 0.5) * factor + 0.5))
}

fn check_amount(name: &str, amount: f32) -> Result<()> {
    if !amount.is_finite() || !(-1.0..=1.0).contains(&amount) {
        return Err(EngineError::InvalidParameter(format!(
            "{} must be within -1.0..=1.0, got {}",
            name, amount
        )));
    }
    Ok(())
}

/// Apply `f` to every color sample in normalized space.
fn map_color<F>(image: &PixelBuffer, f: F) -> PixelBuffer
where
    F: Fn(f32) -> f32,
{
    let channels = image.channels();
    let color = if image.mode().has_alpha() { 3 } else { channels };

    // 256 entries cover every input, so evaluate once per value
    let lut: Vec<u8> = (0..=255u8)
        .map(|v| (f(v as f32 / 255.0).clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();

    let mut pixels = image.pixels().to_vec();
    for px in pixels.chunks_exact_mut(channels) {
        for v in px.iter_mut().take(color) {
            *v = lut[*v as usize];
        }
    }

    PixelBuffer::from_raw_parts(image.width(), image.height(), image.mode(), pixels)
}
