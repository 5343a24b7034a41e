//! Swirl warp.
//!
//! For every output pixel `(x, y)`:
//! 1. `d` = distance from the image center `(width / 2, height / 2)`
//! 2. `θ = π/2 * d / (max_d / 2)`, where `max_d` is the largest `d` in the image
//! 3. Rotate the offset from the center by `θ` to get the source coordinate
//! 4. Clamp the source into the buffer and sample it
//!
//! The twist grows linearly with distance: the center pixel never moves and
//! the corners turn by a full π.

use serde::{Deserialize, Serialize};

use super::fill_rows;
use crate::buffer::PixelBuffer;

/// How swirl reads the source at a fractional coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwirlSampling {
    /// Take the pixel at the floored coordinate. Aliased but exact.
    #[default]
    Floor,
    /// Blend the floor/ceil neighbours by the fractional part.
    Bilinear,
}

/// Apply the swirl warp. Output has the input's dimensions and mode.
pub fn swirl(image: &PixelBuffer, sampling: SwirlSampling) -> PixelBuffer {
    let (w, h) = (image.width(), image.height());
    let channels = image.channels();
    let stride = image.stride();

    let cx = w as f64 / 2.0;
    let cy = h as f64 / 2.0;
    let max_x = (w - 1) as f64;
    let max_y = (h - 1) as f64;

    // Distance is largest at one of the corners
    let max_dist = [(0.0, 0.0), (max_x, 0.0), (0.0, max_y), (max_x, max_y)]
        .iter()
        .map(|&(x, y): &(f64, f64)| (x - cx).hypot(y - cy))
        .fold(0.0f64, f64::max);
    let half_max = max_dist / 2.0;

    let mut output = vec![0u8; image.pixels().len()];

    fill_rows(&mut output, stride, |y, row| {
        let dy = y as f64 - cy;
        for x in 0..w {
            let dx = x as f64 - cx;
            let dist = dx.hypot(dy);
            let angle = if half_max > 0.0 {
                std::f64::consts::FRAC_PI_2 * (dist / half_max)
            } else {
                0.0
            };
            let (sin, cos) = angle.sin_cos();

            let src_x = (dx * cos - dy * sin + cx).clamp(0.0, max_x);
            let src_y = (dx * sin + dy * cos + cy).clamp(0.0, max_y);

            let out = &mut row[x as usize * channels..(x as usize + 1) * channels];
            match sampling {
                SwirlSampling::Floor => sample_floor(image, src_x, src_y, out),
                SwirlSampling::Bilinear => sample_bilinear(image, src_x, src_y, out),
            }
        }
    });

    PixelBuffer::from_raw_parts(w, h, image.mode(), output)
}

/// `x` and `y` are already clamped into the buffer.
#[inline]
fn sample_floor(image: &PixelBuffer, x: f64, y: f64, out: &mut [u8]) {
    let channels = image.channels();
    let idx = y.floor() as usize * image.stride() + x.floor() as usize * channels;
    out.copy_from_slice(&image.pixels()[idx..idx + channels]);
}

#[inline]
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64, out: &mut [u8]) {
    let channels = image.channels();
    let stride = image.stride();
    let px = image.pixels();

    let (x0, y0) = (x.floor() as usize, y.floor() as usize);
    let (x1, y1) = (x.ceil() as usize, y.ceil() as usize);
    let (fx, fy) = (x - x0 as f64, y - y0 as f64);

    let at = |sx: usize, sy: usize, c: usize| px[sy * stride + sx * channels + c] as f64;

    for (c, v) in out.iter_mut().enumerate() {
        let top = at(x0, y0, c) * (1.0 - fx) + at(x1, y0, c) * fx;
        let bottom = at(x0, y1, c) * (1.0 - fx) + at(x1, y1, c) * fx;
        *v = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::ColorMode;
    use crate::transform::test_support::gradient;
    use proptest::prelude::*;

    proptest! {
        /// Property: with even dimensions the center pixel keeps its value
        /// under either sampling mode.
        #[test]
        fn prop_center_pixel_invariant(
            half_w in 1u32..=20,
            half_h in 1u32..=20,
            bilinear in any::<bool>(),
        ) {
            let (w, h) = (half_w * 2, half_h * 2);
            let img = gradient(w, h, ColorMode::Rgb);
            let sampling = if bilinear { SwirlSampling::Bilinear } else { SwirlSampling::Floor };
            let out = swirl(&img, sampling);
            prop_assert_eq!(
                out.get_pixel(half_w, half_h).unwrap(),
                img.get_pixel(half_w, half_h).unwrap()
            );
        }

        /// Property: swirl never changes size or mode.
        #[test]
        fn prop_shape_preserved(
            (w, h) in (1u32..=24, 1u32..=24),
        ) {
            let img = gradient(w, h, ColorMode::Rgba);
            let out = swirl(&img, SwirlSampling::Floor);
            prop_assert_eq!((out.width(), out.height(), out.mode()), (w, h, ColorMode::Rgba));
        }
    }
}
