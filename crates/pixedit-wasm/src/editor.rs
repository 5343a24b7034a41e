//! WASM bindings for the editing session.
//!
//! `JsEditor` mirrors [`pixedit_core::Editor`]. Every method that changes the
//! image returns a fresh [`JsPixelBuffer`] copy of the new current image so
//! the shell can redraw without a second call.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsEditor({ historyLimit: 50, jpegQuality: 85 });
//! let image = editor.load_image(new Uint8Array(await file.arrayBuffer()));
//!
//! image = editor.apply_request({ type: 'rotate', degrees: 90 });
//! image = editor.blur();
//! if (editor.can_undo) image = editor.undo();
//!
//! const jpeg = editor.encode('jpeg');
//! ```

use pixedit_core::{
    CropRect, DisplayScale, Editor, EditorConfig, EngineError, OutputFormat, PixelBuffer, Point,
    TransformRequest,
};
use wasm_bindgen::prelude::*;

use crate::types::{to_js, JsPixelBuffer};

fn snapshot(result: Result<&PixelBuffer, EngineError>) -> Result<JsPixelBuffer, JsValue> {
    result.map(JsPixelBuffer::from_core).map_err(to_js)
}

/// An editing session for JavaScript.
#[wasm_bindgen]
pub struct JsEditor {
    inner: Editor,
}

impl Default for JsEditor {
    fn default() -> Self {
        Self {
            inner: Editor::new(),
        }
    }
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor. `config` is an optional partial `EditorConfig`
    /// object; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?
        };
        Ok(JsEditor {
            inner: Editor::with_config(config),
        })
    }

    /// Decode PNG/JPEG/GIF/BMP/TIFF bytes and start a new history.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
        snapshot(self.inner.load_image(bytes))
    }

    /// Start a new history from an existing buffer.
    pub fn load_buffer(&mut self, buffer: JsPixelBuffer) -> JsPixelBuffer {
        JsPixelBuffer::from_core(self.inner.load_buffer(buffer.into_core()))
    }

    /// Apply a request object such as `{ type: 'pixelate', blockSize: 12 }`.
    pub fn apply_request(&mut self, request: JsValue) -> Result<JsPixelBuffer, JsValue> {
        let request: TransformRequest = serde_wasm_bindgen::from_value(request)
            .map_err(|e| JsValue::from_str(&format!("Invalid transform request: {}", e)))?;
        self.apply(request)
    }

    pub fn blur(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::Blur)
    }

    pub fn sharpen(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::Sharpen)
    }

    pub fn invert(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::Invert)
    }

    /// Rotate by `degrees` (positive = counter-clockwise).
    pub fn rotate(&mut self, degrees: f64) -> Result<JsPixelBuffer, JsValue> {
        snapshot(self.inner.rotate(degrees))
    }

    pub fn flip_horizontal(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::FlipHorizontal)
    }

    pub fn flip_vertical(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::FlipVertical)
    }

    pub fn circle_crop(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::CircleCrop)
    }

    pub fn enhance_color(&mut self) -> Result<JsPixelBuffer, JsValue> {
        snapshot(self.inner.enhance_color())
    }

    pub fn grayscale(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::Grayscale)
    }

    pub fn swirl(&mut self) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::swirl())
    }

    pub fn pixelate(&mut self) -> Result<JsPixelBuffer, JsValue> {
        snapshot(self.inner.pixelate())
    }

    /// Brightness slider, `amount` in `-1.0..=1.0`.
    pub fn brightness(&mut self, amount: f32) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::Brightness { amount })
    }

    /// Contrast slider, `amount` in `-1.0..=1.0`.
    pub fn contrast(&mut self, amount: f32) -> Result<JsPixelBuffer, JsValue> {
        self.apply(TransformRequest::Contrast { amount })
    }

    /// Crop to buffer-space corners `(x1, y1)` and `(x2, y2)`.
    pub fn crop(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<JsPixelBuffer, JsValue> {
        let rect = CropRect::new(x1 as i64, y1 as i64, x2 as i64, y2 as i64);
        self.apply(TransformRequest::Crop(rect))
    }

    pub fn undo(&mut self) -> Result<JsPixelBuffer, JsValue> {
        snapshot(self.inner.undo())
    }

    pub fn redo(&mut self) -> Result<JsPixelBuffer, JsValue> {
        snapshot(self.inner.redo())
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Copy of the current image, or `undefined` before the first load.
    pub fn current(&self) -> Option<JsPixelBuffer> {
        self.inner.current().map(JsPixelBuffer::from_core)
    }

    /// Encode the current image. `format` is `"png"`, `"jpg"` or `"jpeg"`.
    pub fn encode(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let format = OutputFormat::from_extension(format)
            .map_err(|e| to_js(EngineError::from(e)))?;
        self.inner.encode(format).map_err(to_js)
    }

    /// MIME type for bytes from [`encode`](Self::encode), e.g. to build a
    /// `Blob`.
    pub fn mime_type(format: &str) -> Result<String, JsValue> {
        let format = OutputFormat::from_extension(format)
            .map_err(|e| to_js(EngineError::from(e)))?;
        Ok(format.mime_type().to_string())
    }

    // Interactive crop, in display coordinates

    pub fn begin_crop(&mut self, x: f64, y: f64) {
        self.inner.begin_crop(Point::new(x, y));
    }

    pub fn update_crop(&mut self, x: f64, y: f64) {
        self.inner.update_crop(Point::new(x, y));
    }

    /// Finish the selection at `(x, y)` on a view `display_w` x `display_h`
    /// pixels large.
    pub fn commit_crop(&mut self, x: f64, y: f64, display_w: u32, display_h: u32) -> Result<JsPixelBuffer, JsValue> {
        let scale = self.scale_for(display_w, display_h).map_err(to_js)?;
        snapshot(self.inner.commit_crop(Point::new(x, y), scale))
    }

    pub fn cancel_crop(&mut self) {
        self.inner.cancel_crop();
    }

    /// The selection rectangle `{ x, y, width, height }` to draw, or `null`.
    pub fn crop_selection(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop_selection())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsEditor {
    fn apply(&mut self, request: TransformRequest) -> Result<JsPixelBuffer, JsValue> {
        snapshot(self.inner.apply_transform(request))
    }

    fn scale_for(&self, display_w: u32, display_h: u32) -> Result<DisplayScale, EngineError> {
        match self.inner.current() {
            Some(_) => self.inner.display_scale(display_w, display_h),
            // Let the commit report the missing selection or image
            None => Ok(DisplayScale::default()),
        }
    }
}
