//! Engine-level error type.
//!
//! Codec failures have their own enums ([`DecodeError`], [`EncodeError`]) and
//! convert into [`EngineError`] so that callers of the [`Editor`](crate::Editor)
//! only ever inspect one type.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors returned by the editing engine.
///
/// Every variant is recoverable: the engine never leaves the history in a
/// partially mutated state when one of these is returned.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A transform, undo/redo or save was requested before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Pixel access outside the buffer extent.
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// A crop or selection resolved to zero area.
    #[error("Selected region is empty")]
    EmptyRegion,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    /// A crop commit arrived without a preceding `begin`.
    #[error("Crop selection has not been started")]
    SelectionNotStarted,

    /// Width or height is zero, or the sample count does not fit in memory
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the dimensions and color mode
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A transform parameter is outside its accepted range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
