//! Pixedit WASM - WebAssembly bindings for the pixedit engine
//!
//! This crate exposes [`pixedit_core`] to JavaScript/TypeScript UI shells.
//!
//! # Module Structure
//!
//! - `editor` - `JsEditor`, the editing session (load, effects, undo/redo,
//!   interactive crop, export)
//! - `types` - `JsPixelBuffer`, the JS-facing image wrapper
//! - `logger` - forwards engine log records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor, set_log_level } from '@pixedit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level('debug');
//!
//! const editor = new JsEditor();
//! const image = editor.load_image(new Uint8Array(await file.arrayBuffer()));
//! console.log(`Loaded ${image.width}x${image.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod logger;
mod types;

// Re-export public types
pub use editor::JsEditor;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Change the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
