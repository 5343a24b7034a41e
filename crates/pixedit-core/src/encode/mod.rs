//! Image encoding for export.
//!
//! Two output formats are supported:
//! - PNG: lossless, keeps the buffer's color mode including alpha
//! - JPEG: lossy with configurable quality, alpha is discarded
//!
//! # Examples
//!
//! ```ignore
//! use pixedit_core::encode::{encode_buffer, OutputFormat};
//!
//! let bytes = encode_buffer(&buffer, OutputFormat::Jpeg, 90)?;
//! assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
//! ```

mod jpeg;
mod png;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{sample_len, PixelBuffer};

pub use jpeg::{encode_jpeg, encode_jpeg_raw};
pub use png::encode_png;

/// Errors that can occur during encoding or saving.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The requested output format (or sample layout) cannot be written.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero, or the sample count overflows
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder itself failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Formats the editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Parse a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Result<Self, EncodeError> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Infer the format from the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EncodeError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| EncodeError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// MIME type for a `Blob` or HTTP response holding encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Encode `buffer` as `format`. `quality` only applies to JPEG.
pub fn encode_buffer(buffer: &PixelBuffer, format: OutputFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(buffer),
        OutputFormat::Jpeg => encode_jpeg(buffer, quality),
    }
}

/// Encode `buffer` and write it to `path`, replacing any existing file.
pub fn save_buffer(
    buffer: &PixelBuffer,
    path: impl AsRef<Path>,
    format: OutputFormat,
    quality: u8,
) -> Result<(), EncodeError> {
    let bytes = encode_buffer(buffer, format, quality)?;
    std::fs::write(path.as_ref(), &bytes)?;
    log::debug!(
        "Wrote {} bytes of {:?} to {}",
        bytes.len(),
        format,
        path.as_ref().display()
    );
    Ok(())
}

/// Check that `pixels` holds exactly `width * height * channels` samples.
pub(crate) fn validate_raw(pixels: &[u8], width: u32, height: u32, channels: usize) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected =
        sample_len(width, height, channels).ok_or(EncodeError::InvalidDimensions { width, height })?;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
