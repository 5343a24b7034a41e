//! Image decoding: encoded file bytes in, [`PixelBuffer`] out.
//!
//! The container format is sniffed from the leading bytes, never from a file
//! name. Only PNG, JPEG, GIF, BMP and TIFF are accepted; everything else fails
//! with [`DecodeError::UnsupportedFormat`] before any decoding work is done.
//!
//! JPEG sources are turned upright according to their EXIF orientation tag
//! unless [`DecodeOptions::auto_orient`] is off. Other formats are taken as
//! stored. Animated GIFs contribute their first frame.
//!
//! # Examples
//!
//! ```ignore
//! use pixedit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let buffer = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", buffer.width(), buffer.height());
//! ```

mod jpeg;
mod types;

use std::io::Cursor;

use image::ImageReader;

use crate::buffer::PixelBuffer;

pub use jpeg::{apply_orientation, read_orientation};
pub use types::{DecodeError, Orientation, SourceFormat};

/// Identify the container format of `bytes`.
///
/// # Errors
///
/// `UnsupportedFormat` if the bytes match no known signature or a format
/// outside the supported set.
pub fn detect_format(bytes: &[u8]) -> Result<SourceFormat, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::UnsupportedFormat)?;
    SourceFormat::from_image_format(format).ok_or(DecodeError::UnsupportedFormat)
}

/// Options for [`decode_image_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Apply the EXIF orientation tag of JPEG sources.
    pub auto_orient: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { auto_orient: true }
    }
}

/// Decode `bytes` into a pixel buffer with default options.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    decode_image_with(bytes, DecodeOptions::default())
}

/// Decode `bytes` into a pixel buffer.
///
/// The color mode follows the source: images with alpha decode to `Rgba`,
/// colorless images to `Gray`, everything else to `Rgb`. Higher bit depths
/// are reduced to 8 bits per sample.
///
/// # Errors
///
/// - `UnsupportedFormat` for unrecognized or unsupported containers
/// - `CorruptedFile` when the container is recognized but decoding fails
/// - `InvalidDimensions` when the decoded image is empty
pub fn decode_image_with(bytes: &[u8], options: DecodeOptions) -> Result<PixelBuffer, DecodeError> {
    let format = detect_format(bytes)?;

    let img = ImageReader::with_format(Cursor::new(bytes), format.to_image_format())
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = if options.auto_orient && format == SourceFormat::Jpeg {
        apply_orientation(img, read_orientation(bytes))
    } else {
        img
    };

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::InvalidDimensions);
    }

    log::debug!(
        "Decoded {:?} image {}x{} ({:?})",
        format,
        img.width(),
        img.height(),
        img.color()
    );

    PixelBuffer::from_dynamic(img).map_err(|_| DecodeError::InvalidDimensions)
}
