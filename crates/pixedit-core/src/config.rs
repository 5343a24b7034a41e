//! Engine-wide tunables.

use serde::{Deserialize, Serialize};

use crate::transform::{InterpolationFilter, DEFAULT_ENHANCE_FACTOR};

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default pixelate block edge in pixels.
pub const DEFAULT_PIXELATE_BLOCK: u32 = 8;

/// Settings an [`Editor`](crate::Editor) is constructed with.
///
/// Missing fields deserialize to their defaults, so a shell can send a
/// partial object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum undo depth (`None` = unbounded)
    pub history_limit: Option<usize>,
    /// JPEG encode quality (1-100, clamped on use)
    pub jpeg_quality: u8,
    /// Factor used by the enhance-color shortcut
    pub enhance_factor: f32,
    /// Block size used by the pixelate shortcut
    pub pixelate_block: u32,
    /// Filter used by the rotate shortcut
    pub rotate_filter: InterpolationFilter,
    /// Turn loaded JPEGs upright by their EXIF orientation tag
    pub auto_orient: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            enhance_factor: DEFAULT_ENHANCE_FACTOR,
            pixelate_block: DEFAULT_PIXELATE_BLOCK,
            rotate_filter: InterpolationFilter::default(),
            auto_orient: true,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// JPEG quality clamped to the encoder's valid range.
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}
