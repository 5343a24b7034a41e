//! Fixed-kernel convolution filters (blur and sharpen).
//!
//! Each channel, alpha included, is filtered independently. Samples outside
//! the buffer are clamped to the nearest edge pixel, so output dimensions and
//! mode always equal the input's.

use super::fill_rows;
use crate::buffer::PixelBuffer;

/// A square integer convolution kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// Side length (odd).
    pub size: usize,
    /// Row-major weights, `size * size` entries.
    pub weights: &'static [i32],
    /// The weighted sum is divided by this before rounding.
    pub divisor: i32,
}

/// 5x5 ring blur: a one-pixel ring of ones around a zero interior.
pub const BLUR_KERNEL: Kernel = Kernel {
    size: 5,
    #[rustfmt::skip]
    weights: &[
        1, 1, 1, 1, 1,
        1, 0, 0, 0, 1,
        1, 0, 0, 0, 1,
        1, 0, 0, 0, 1,
        1, 1, 1, 1, 1,
    ],
    divisor: 16,
};

/// 3x3 sharpen: heavy center weight minus the eight neighbours.
pub const SHARPEN_KERNEL: Kernel = Kernel {
    size: 3,
    #[rustfmt::skip]
    weights: &[
        -2, -2, -2,
        -2, 32, -2,
        -2, -2, -2,
    ],
    divisor: 16,
};

/// Low-pass blur with [`BLUR_KERNEL`].
pub fn blur(image: &PixelBuffer) -> PixelBuffer {
    convolve(image, &BLUR_KERNEL)
}

/// High-frequency emphasis with [`SHARPEN_KERNEL`].
pub fn sharpen(image: &PixelBuffer) -> PixelBuffer {
    convolve(image, &SHARPEN_KERNEL)
}

/// Convolve every channel of `image` with `kernel`, clamping at the borders.
pub(crate) fn convolve(image: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    debug_assert_eq!(kernel.weights.len(), kernel.size * kernel.size);

    let (w, h) = (image.width() as i64, image.height() as i64);
    let channels = image.channels();
    let stride = image.stride();
    let radius = (kernel.size / 2) as i64;
    let src = image.pixels();
    let divisor = kernel.divisor as f32;

    let mut output = vec![0u8; src.len()];

    fill_rows(&mut output, stride, |y, row| {
        let y = y as i64;
        for x in 0..w {
            for c in 0..channels {
                let mut sum = 0i32;
                for ky in 0..kernel.size as i64 {
                    let sy = (y + ky - radius).clamp(0, h - 1) as usize;
                    let row_start = sy * stride;
                    for kx in 0..kernel.size as i64 {
                        let weight = kernel.weights[(ky * kernel.size as i64 + kx) as usize];
                        if weight == 0 {
                            continue;
                        }
                        let sx = (x + kx - radius).clamp(0, w - 1) as usize;
                        sum += weight * src[row_start + sx * channels + c] as i32;
                    }
                }
                row[x as usize * channels + c] =
                    (sum as f32 / divisor).round().clamp(0.0, 255.0) as u8;
            }
        }
    });

    PixelBuffer::from_raw_parts(image.width(), image.height(), image.mode(), output)
}
