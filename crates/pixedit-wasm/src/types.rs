//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core pixedit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use pixedit_core::{ColorMode, EngineError, PixelBuffer};
use wasm_bindgen::prelude::*;

/// Convert an engine error into the value thrown on the JS side.
pub(crate) fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Color mode for a channel count: 1 = gray, 3 = RGB, 4 = RGBA.
pub(crate) fn mode_from_channels(channels: u8) -> Result<ColorMode, EngineError> {
    match channels {
        1 => Ok(ColorMode::Gray),
        3 => Ok(ColorMode::Rgb),
        4 => Ok(ColorMode::Rgba),
        other => Err(EngineError::InvalidParameter(format!(
            "{} channels is not a supported color mode",
            other
        ))),
    }
}

/// A pixel buffer handed to JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is
/// made to JavaScript memory as a `Uint8Array`.
///
/// The generated `free()` method can be called to release WASM memory early;
/// otherwise wasm-bindgen's finalizer handles cleanup.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a buffer from dimensions, channel count and row-major samples.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<JsPixelBuffer, JsValue> {
        Self::from_parts(width, height, channels, pixels).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Samples per pixel (1, 3 or 4)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels() as u8
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Pixel data expanded to RGBA.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        self.inner.convert_mode(ColorMode::Rgba).into_pixels()
    }

    /// RGBA pixels as a `Uint8ClampedArray`, ready for
    /// `new ImageData(data, width, height)`.
    pub fn image_data(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.rgba_pixels().as_slice())
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_parts(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<Self, EngineError> {
        let mode = mode_from_channels(channels)?;
        Ok(Self {
            inner: PixelBuffer::new(width, height, mode, pixels)?,
        })
    }

    pub(crate) fn from_core(buffer: &PixelBuffer) -> Self {
        Self {
            inner: buffer.clone(),
        }
    }

    pub(crate) fn into_core(self) -> PixelBuffer {
        self.inner
    }
}
