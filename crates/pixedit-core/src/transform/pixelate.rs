//! Block pixelation.

use crate::buffer::PixelBuffer;
use crate::error::{EngineError, Result};

/// Replace each `block_size` x `block_size` tile with the color of its
/// top-left pixel. Partial tiles at the right and bottom edges are filled the
/// same way.
///
/// # Errors
///
/// `InvalidParameter` if `block_size` is zero.
pub fn pixelate(image: &PixelBuffer, block_size: u32) -> Result<PixelBuffer> {
    if block_size == 0 {
        return Err(EngineError::InvalidParameter(
            "pixelate block size must be at least 1".to_string(),
        ));
    }
    if block_size == 1 {
        return Ok(image.clone());
    }

    let channels = image.channels();
    let mut output = Vec::with_capacity(image.pixels().len());

    for y in 0..image.height() {
        let anchor_row = image.row(y - y % block_size);
        for x in 0..image.width() {
            let ax = (x - x % block_size) as usize * channels;
            output.extend_from_slice(&anchor_row[ax..ax + channels]);
        }
    }

    Ok(PixelBuffer::from_raw_parts(
        image.width(),
        image.height(),
        image.mode(),
        output,
    ))
}
