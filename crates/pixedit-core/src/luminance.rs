//! Luminance calculation using ITU-R BT.601 coefficients.
//!
//! Every gray conversion in the engine (grayscale mode, color enhancement,
//! RGB to Gray narrowing) goes through this module so they agree byte for byte.
//! The weights are the classic `L = R * 299/1000 + G * 587/1000 + B * 114/1000`
//! used by most desktop editors for their "L" mode.

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.114;

/// Calculate luminance from u8 RGB values (0 to 255).
///
/// # Returns
/// Luminance value (0-255), rounded to nearest.
#[inline]
pub fn luminance_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}

/// Luminance as an unrounded float, for blends that round once at the end.
#[inline]
pub fn luminance_f32(r: u8, g: u8, b: u8) -> f32 {
    LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
}
