//! Pixedit Core - Image editing engine
//!
//! This crate provides the engine behind the pixedit editor: an in-memory
//! pixel buffer, a catalog of whole-image transforms, snapshot-based
//! undo/redo, an interactive crop state machine and the decode/encode
//! boundary. UI shells drive it through [`Editor`].
//!
//! ```ignore
//! use pixedit_core::{Editor, TransformRequest};
//!
//! let mut editor = Editor::new();
//! editor.load_image(&std::fs::read("photo.png")?)?;
//! editor.apply_transform(TransformRequest::rotate(90.0))?;
//! editor.apply_transform(TransformRequest::Blur)?;
//! editor.undo()?;
//! ```

pub mod buffer;
pub mod config;
pub mod crop_session;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod error;
pub mod history;
pub mod luminance;
pub mod request;
pub mod transform;

pub use buffer::{AlphaHandling, ColorMode, PixelBuffer};
pub use config::EditorConfig;
pub use crop_session::{CropSession, CropState, DisplayScale, Point, Selection};
pub use decode::{decode_image, decode_image_with, DecodeError, DecodeOptions};
pub use editor::Editor;
pub use encode::{encode_buffer, EncodeError, OutputFormat};
pub use error::{EngineError, Result};
pub use history::HistoryStack;
pub use request::TransformRequest;
pub use transform::{CropRect, InterpolationFilter, SwirlSampling};
