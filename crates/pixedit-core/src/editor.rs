//! The engine API consumed by UI shells.
//!
//! [`Editor`] owns the undo history and the interactive crop session. Every
//! edit goes through the history, so any change can be undone, and every
//! failure leaves the current image and history untouched.

use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::config::EditorConfig;
use crate::crop_session::{CropSession, CropState, DisplayScale, Point, Selection};
use crate::decode::{decode_image_with, DecodeOptions};
use crate::encode::{encode_buffer, save_buffer, OutputFormat};
use crate::error::{EngineError, Result};
use crate::history::HistoryStack;
use crate::request::TransformRequest;

/// An image editing session: one current image plus its history.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    config: EditorConfig,
    history: HistoryStack,
    crop: CropSession,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            history: HistoryStack::with_limit(config.history_limit),
            crop: CropSession::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Loading and saving
    // ------------------------------------------------------------------

    /// Decode `bytes` and make the result the current image.
    ///
    /// JPEGs are turned upright by their EXIF orientation when
    /// [`EditorConfig::auto_orient`] is set. History and any crop selection in
    /// progress are discarded. On failure the previous image and its history
    /// are kept.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<&PixelBuffer> {
        let options = DecodeOptions {
            auto_orient: self.config.auto_orient,
        };
        let buffer = decode_image_with(bytes, options)?;
        Ok(self.load_buffer(buffer))
    }

    /// Make `buffer` the current image, discarding history.
    pub fn load_buffer(&mut self, buffer: PixelBuffer) -> &PixelBuffer {
        log::debug!(
            "Loading {}x{} {:?} image",
            buffer.width(),
            buffer.height(),
            buffer.mode()
        );
        self.crop.cancel();
        self.history.load(buffer)
    }

    /// Encode the current image.
    pub fn encode(&self, format: OutputFormat) -> Result<Vec<u8>> {
        let current = self.require_current()?;
        Ok(encode_buffer(current, format, self.config.effective_jpeg_quality())?)
    }

    /// Write the current image to `path`.
    ///
    /// With `format` of `None` the format is inferred from the file extension.
    pub fn save_image(&self, path: impl AsRef<Path>, format: Option<OutputFormat>) -> Result<()> {
        let path = path.as_ref();
        let current = self.require_current()?;
        let format = match format {
            Some(format) => format,
            None => OutputFormat::from_path(path)?,
        };
        log::debug!("Saving {:?} to {}", format, path.display());
        save_buffer(current, path, format, self.config.effective_jpeg_quality())?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Apply one transform to the current image, recording it for undo.
    pub fn apply_transform(&mut self, request: TransformRequest) -> Result<&PixelBuffer> {
        log::debug!("Applying {}", request.name());
        self.history.apply(|img| request.apply(img))
    }

    /// Rotate using the configured interpolation filter.
    pub fn rotate(&mut self, degrees: f64) -> Result<&PixelBuffer> {
        let filter = self.config.rotate_filter;
        self.apply_transform(TransformRequest::Rotate { degrees, filter })
    }

    /// Enhance color by the configured factor.
    pub fn enhance_color(&mut self) -> Result<&PixelBuffer> {
        let factor = self.config.enhance_factor;
        self.apply_transform(TransformRequest::EnhanceColor { factor })
    }

    /// Pixelate with the configured block size.
    pub fn pixelate(&mut self) -> Result<&PixelBuffer> {
        let block_size = self.config.pixelate_block;
        self.apply_transform(TransformRequest::Pixelate { block_size })
    }

    pub fn undo(&mut self) -> Result<&PixelBuffer> {
        log::debug!("Undo (depth {})", self.history.undo_depth());
        self.history.undo()
    }

    pub fn redo(&mut self) -> Result<&PixelBuffer> {
        log::debug!("Redo (depth {})", self.history.redo_depth());
        self.history.redo()
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn current(&self) -> Option<&PixelBuffer> {
        self.history.current()
    }

    pub fn is_loaded(&self) -> bool {
        self.history.is_loaded()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    fn require_current(&self) -> Result<&PixelBuffer> {
        self.history.current().ok_or(EngineError::NoImageLoaded)
    }

    // ------------------------------------------------------------------
    // Interactive crop
    // ------------------------------------------------------------------

    pub fn begin_crop(&mut self, point: Point) {
        self.crop.begin(point);
    }

    pub fn update_crop(&mut self, point: Point) {
        self.crop.update(point);
    }

    /// Finish the selection at `end` and crop the current image.
    pub fn commit_crop(&mut self, end: Point, scale: DisplayScale) -> Result<&PixelBuffer> {
        self.crop.commit(end, scale, &mut self.history)?;
        self.require_current()
    }

    pub fn cancel_crop(&mut self) {
        self.crop.cancel();
    }

    pub fn crop_selection(&self) -> Option<Selection> {
        self.crop.selection()
    }

    pub fn crop_state(&self) -> CropState {
        self.crop.state()
    }

    /// Scale between the current image and a `display_w` x `display_h` view.
    pub fn display_scale(&self, display_w: u32, display_h: u32) -> Result<DisplayScale> {
        let current = self.require_current()?;
        DisplayScale::from_dimensions(current.width(), current.height(), display_w, display_h)
    }
}
