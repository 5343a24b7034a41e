//! Rotation and mirroring.
//!
//! Multiples of 90° take an exact remapping path: no sampling, no loss, and
//! width/height swap on quarter and three-quarter turns. Any other angle uses
//! inverse mapping onto an expanded canvas: for each output pixel we find the
//! source location and sample it.
//!
//! For counter-clockwise rotation by θ in a y-down coordinate system, the
//! inverse transform from a destination pixel center to the source is:
//! ```text
//! src_x =  dx * cos(θ) - dy * sin(θ) + src_cx
//! src_y =  dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//! where `(dx, dy)` is the destination pixel center relative to the
//! destination center.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};

/// Angles closer than this to a multiple of 90° take the exact path.
const QUARTER_TURN_TOLERANCE: f64 = 0.001;

/// Interpolation filter for arbitrary-angle rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest source pixel. Keeps the original sample values.
    #[default]
    Nearest,
    /// Weighted blend of the four surrounding pixels.
    Bilinear,
}

/// Number of counter-clockwise quarter turns if `angle_degrees` is a
/// multiple of 90°, normalized to `0..4`.
fn quarter_turns(angle_degrees: f64) -> Option<u8> {
    let turns = angle_degrees / 90.0;
    let nearest = turns.round();
    if ((turns - nearest) * 90.0).abs() < QUARTER_TURN_TOLERANCE {
        Some((nearest as i64).rem_euclid(4) as u8)
    } else {
        None
    }
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// Quarter turns swap or keep dimensions exactly; other angles return the
/// smallest box containing every rotated corner (`angle_degrees` must be
/// finite):
/// ```text
/// new_w = |w*cos| + |h*sin|
/// new_h = |w*sin| + |h*cos|
/// ```
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    match quarter_turns(angle_degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image around its center by `angle_degrees` (positive =
/// counter-clockwise).
///
/// The output canvas is expanded to fit the whole rotated image. Pixels not
/// covered by the source are zero: transparent for RGBA, black otherwise.
/// `filter` only matters for angles that are not multiples of 90°.
///
/// # Errors
///
/// `InvalidParameter` if `angle_degrees` is NaN or infinite.
pub fn rotate(image: &PixelBuffer, angle_degrees: f64, filter: InterpolationFilter) -> Result<PixelBuffer> {
    if !angle_degrees.is_finite() {
        return Err(EngineError::InvalidParameter(format!(
            "rotation angle must be finite, got {}",
            angle_degrees
        )));
    }
    let out = match quarter_turns(angle_degrees) {
        Some(0) => image.clone(),
        Some(turns) => rotate_quarters(image, turns),
        None => rotate_arbitrary(image, angle_degrees, filter),
    };
    Ok(out)
}

/// Exact rotation by `turns` counter-clockwise quarter turns (1..=3).
fn rotate_quarters(image: &PixelBuffer, turns: u8) -> PixelBuffer {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let channels = image.channels();
    let src = image.pixels();

    let (dst_w, dst_h) = if turns % 2 == 1 { (h, w) } else { (w, h) };
    let mut output = vec![0u8; src.len()];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let (src_x, src_y) = match turns {
                1 => (w - 1 - dst_y, dst_x),
                2 => (w - 1 - dst_x, h - 1 - dst_y),
                _ => (dst_y, h - 1 - dst_x),
            };
            let src_idx = (src_y * w + src_x) * channels;
            let dst_idx = (dst_y * dst_w + dst_x) * channels;
            output[dst_idx..dst_idx + channels].copy_from_slice(&src[src_idx..src_idx + channels]);
        }
    }

    PixelBuffer::from_raw_parts(dst_w as u32, dst_h as u32, image.mode(), output)
}

fn rotate_arbitrary(image: &PixelBuffer, angle_degrees: f64, filter: InterpolationFilter) -> PixelBuffer {
    let (src_w, src_h) = (image.width() as f64, image.height() as f64);
    let (dst_w, dst_h) = rotated_bounds(image.width(), image.height(), angle_degrees);
    let channels = image.channels();

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Center of source and destination images
    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * channels];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let dst_idx = (dst_y as usize * dst_w as usize + dst_x as usize) * channels;
            let out = &mut output[dst_idx..dst_idx + channels];

            match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y, out),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y, out),
            }
        }
    }

    PixelBuffer::from_raw_parts(dst_w, dst_h, image.mode(), output)
}

/// Copy the source pixel containing `(x, y)` into `out`; leave `out` zeroed
/// when the point falls outside the source.
#[inline]
fn sample_nearest(image: &PixelBuffer, x: f64, y: f64, out: &mut [u8]) {
    if x < 0.0 || y < 0.0 || x >= image.width() as f64 || y >= image.height() as f64 {
        return;
    }
    let channels = image.channels();
    let idx = (y as usize * image.width() as usize + x as usize) * channels;
    out.copy_from_slice(&image.pixels()[idx..idx + channels]);
}

/// Sample using bilinear interpolation between the four nearest pixel
/// centers. Points whose neighbourhood leaves the source stay zeroed.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64, out: &mut [u8]) {
    // Shift from pixel-center space to sample-index space
    let x = x - 0.5;
    let y = y - 0.5;
    let (w, h) = (image.width() as i64, image.height() as i64);

    if x < 0.0 || x > (w - 1) as f64 || y < 0.0 || y > (h - 1) as f64 {
        return;
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w as usize - 1);
    let y1 = (y0 + 1).min(h as usize - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let channels = image.channels();
    let stride = image.stride();
    let px = image.pixels();
    let at = |sx: usize, sy: usize, c: usize| px[sy * stride + sx * channels + c] as f64;

    for (c, v) in out.iter_mut().enumerate() {
        let value = at(x0, y0, c) * (1.0 - fx) * (1.0 - fy)
            + at(x1, y0, c) * fx * (1.0 - fy)
            + at(x0, y1, c) * (1.0 - fx) * fy
            + at(x1, y1, c) * fx * fy;
        *v = value.clamp(0.0, 255.0).round() as u8;
    }
}

/// Mirror left-to-right.
pub fn flip_horizontal(image: &PixelBuffer) -> PixelBuffer {
    let channels = image.channels();
    let mut output = Vec::with_capacity(image.pixels().len());
    for y in 0..image.height() {
        for px in image.row(y).chunks_exact(channels).rev() {
            output.extend_from_slice(px);
        }
    }
    PixelBuffer::from_raw_parts(image.width(), image.height(), image.mode(), output)
}

/// Mirror top-to-bottom.
pub fn flip_vertical(image: &PixelBuffer) -> PixelBuffer {
    let mut output = Vec::with_capacity(image.pixels().len());
    for y in (0..image.height()).rev() {
        output.extend_from_slice(image.row(y));
    }
    PixelBuffer::from_raw_parts(image.width(), image.height(), image.mode(), output)
}
