//! Rectangular crop in buffer pixel coordinates.
//!
//! # Coordinate System
//!
//! - `(x1, y1)` and `(x2, y2)` are opposite corners in any order
//! - Right and bottom edges are exclusive: `(0, 0, width, height)` is the
//!   whole buffer
//! - Coordinates beyond the buffer are clamped, never rejected
//!
//! # Example
//!
//! ```ignore
//! // Keep the 50x50 region starting at (10, 20)
//! let cropped = crop(&image, CropRect::new(10, 20, 60, 70))?;
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};

/// A crop rectangle given by two opposite corners, in buffer pixels.
///
/// Corners may be given in any order and may lie outside the buffer; see
/// [`CropRect::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl CropRect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Reorder corners so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    /// Normalize, then clamp to `[0, width] x [0, height]`.
    ///
    /// Returns `(left, top, right, bottom)` with `left <= right`, `top <= bottom`.
    pub fn clamped(self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let r = self.normalized();
        let cx = |v: i64| v.clamp(0, width as i64) as u32;
        let cy = |v: i64| v.clamp(0, height as i64) as u32;
        (cx(r.x1), cy(r.y1), cx(r.x2), cy(r.y2))
    }
}

/// Crop `image` to `rect`.
///
/// # Errors
///
/// `EmptyRegion` if the normalized, clamped rectangle has zero width or height.
pub fn crop(image: &PixelBuffer, rect: CropRect) -> Result<PixelBuffer> {
    let (left, top, right, bottom) = rect.clamped(image.width(), image.height());
    let out_width = right - left;
    let out_height = bottom - top;
    if out_width == 0 || out_height == 0 {
        return Err(EngineError::EmptyRegion);
    }

    // Fast path: full crop returns a clone
    if out_width == image.width() && out_height == image.height() {
        return Ok(image.clone());
    }

    let channels = image.channels();
    let row_start = left as usize * channels;
    let row_len = out_width as usize * channels;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Copy pixel data row by row
    for y in top..bottom {
        output.extend_from_slice(&image.row(y)[row_start..row_start + row_len]);
    }

    Ok(PixelBuffer::from_raw_parts(out_width, out_height, image.mode(), output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;
    use crate::transform::test_support::gradient;

    #[test]
    fn test_full_crop() {
        let img = gradient(10, 8, ColorMode::Rgb);
        assert_eq!(crop(&img, CropRect::new(0, 0, 10, 8)).unwrap(), img);
    }

    #[test]
    fn test_center_crop() {
        let img = gradient(10, 10, ColorMode::Gray);
        let result = crop(&img, CropRect::new(2, 2, 8, 8)).unwrap();

        assert_eq!((result.width(), result.height()), (6, 6));
        // Value at (2, 2) = 2 * 10 + 2 = 22
        assert_eq!(result.pixels()[0], 22);
    }

    #[test]
    fn test_corners_in_any_order() {
        let img = gradient(10, 10, ColorMode::Rgb);
        let a = crop(&img, CropRect::new(3, 3, 7, 6)).unwrap();
        let b = crop(&img, CropRect::new(7, 6, 3, 3)).unwrap();
        let c = crop(&img, CropRect::new(3, 6, 7, 3)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let img = gradient(10, 10, ColorMode::Rgba);
        let result = crop(&img, CropRect::new(-5, -5, 50, 4)).unwrap();
        assert_eq!((result.width(), result.height()), (10, 4));
        assert_eq!(result.get_pixel(0, 0).unwrap(), img.get_pixel(0, 0).unwrap());
    }

    #[test]
    fn test_degenerate_rect_fails() {
        let img = gradient(10, 10, ColorMode::Rgb);
        assert!(matches!(
            crop(&img, CropRect::new(4, 1, 4, 9)),
            Err(EngineError::EmptyRegion)
        ));
        assert!(matches!(
            crop(&img, CropRect::new(1, 4, 9, 4)),
            Err(EngineError::EmptyRegion)
        ));
    }

    #[test]
    fn test_rect_entirely_outside_fails() {
        let img = gradient(10, 10, ColorMode::Rgb);
        assert!(matches!(
            crop(&img, CropRect::new(20, 20, 30, 30)),
            Err(EngineError::EmptyRegion)
        ));
    }

    #[test]
    fn test_pixel_values_preserved() {
        let img = gradient(10, 10, ColorMode::Rgb);
        let result = crop(&img, CropRect::new(3, 3, 7, 7)).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(
                    result.get_pixel(x, y).unwrap(),
                    img.get_pixel(x + 3, y + 3).unwrap()
                );
            }
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
