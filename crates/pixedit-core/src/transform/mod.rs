//! The transform catalog: pure functions from one [`PixelBuffer`] to another.
//!
//! No function in this module mutates its input. Transforms that take a
//! numeric parameter or a region (rotate, enhance, brightness, contrast,
//! pixelate, crop) return [`Result`](crate::Result); the rest are infallible.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, `x` grows right, `y` grows down
//! - Rotation angles are in degrees, positive = counter-clockwise
//! - Crop rectangles are in buffer pixels, right/bottom edges exclusive
//!
//! # Row Parallelism
//!
//! The per-pixel loops (convolution, circle crop, swirl) compute every output
//! row from the source buffer alone and write it to its own slice of the
//! output. With the `parallel` feature those rows run on the rayon pool.
//!
//! [`PixelBuffer`]: crate::PixelBuffer

mod adjust;
mod circle;
mod crop;
mod filter;
mod pixelate;
mod rotation;
mod swirl;
mod tone;

pub use adjust::{brightness, contrast};
pub use circle::{circle_crop, circle_mask_contains};
pub use crop::{crop, CropRect};
pub use filter::{blur, sharpen, Kernel, BLUR_KERNEL, SHARPEN_KERNEL};
pub use pixelate::pixelate;
pub use rotation::{flip_horizontal, flip_vertical, rotate, rotated_bounds, InterpolationFilter};
pub use swirl::{swirl, SwirlSampling};
pub use tone::{enhance_color, grayscale, invert, DEFAULT_ENHANCE_FACTOR};

/// Run `f(y, row)` for every `stride`-sized row of `out`.
///
/// Each call receives a disjoint slice, so no synchronization is needed
/// beyond the implicit join when this returns.
pub(crate) fn fill_rows<F>(out: &mut [u8], stride: usize, f: F)
where
    F: Fn(u32, &mut [u8]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as u32, row));
    }

    #[cfg(not(feature = "parallel"))]
    {
        out.chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as u32, row));
    }
}
