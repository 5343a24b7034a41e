//! Circular crop: keep a centered disc, make everything else transparent.
//!
//! The disc is centered at `(width / 2, height / 2)` with radius
//! `min(width, height) / 2`, all in integer (floor) division. A pixel is kept
//! iff its Euclidean distance from the center is `<= radius`; the test is done
//! on squared integer distances, which is exact.

use super::fill_rows;
use crate::buffer::{ColorMode, PixelBuffer};

/// Returns true if pixel `(x, y)` lies inside the circle-crop disc of a
/// `width` x `height` buffer.
#[inline]
pub fn circle_mask_contains(width: u32, height: u32, x: u32, y: u32) -> bool {
    let (cx, cy) = ((width / 2) as i64, (height / 2) as i64);
    let radius = (width.min(height) / 2) as i64;
    let dx = x as i64 - cx;
    let dy = y as i64 - cy;
    dx * dx + dy * dy <= radius * radius
}

/// Apply the circular mask.
///
/// The output is always RGBA. Pixels inside the disc keep their color and
/// become fully opaque regardless of their original alpha; pixels outside
/// become `(0, 0, 0, 0)`.
pub fn circle_crop(image: &PixelBuffer) -> PixelBuffer {
    let rgba = image.convert_mode(ColorMode::Rgba);
    let (w, h) = (image.width(), image.height());
    let stride = rgba.stride();
    let src = rgba.pixels();

    let mut output = vec![0u8; src.len()];

    fill_rows(&mut output, stride, |y, row| {
        let src_row = &src[y as usize * stride..(y as usize + 1) * stride];
        for x in 0..w {
            if circle_mask_contains(w, h, x, y) {
                let i = x as usize * 4;
                row[i..i + 3].copy_from_slice(&src_row[i..i + 3]);
                row[i + 3] = 255;
            }
        }
    });

    PixelBuffer::from_raw_parts(w, h, ColorMode::Rgba, output)
}
