//! Transform requests: the effect identifiers a UI shell sends to the engine.
//!
//! Requests serialize as internally tagged objects so that a shell can build
//! them as plain JSON / JS objects:
//!
//! ```text
//! { "type": "rotate", "degrees": 90 }
//! { "type": "enhanceColor", "factor": 1.5 }
//! { "type": "crop", "x1": 0, "y1": 0, "x2": 64, "y2": 48 }
//! { "type": "pixelate", "blockSize": 12 }
//! { "type": "brightness", "amount": -0.2 }
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::transform::{
    self, CropRect, InterpolationFilter, SwirlSampling, DEFAULT_ENHANCE_FACTOR,
};

fn default_enhance_factor() -> f32 {
    DEFAULT_ENHANCE_FACTOR
}

fn default_block_size() -> u32 {
    8
}

/// One effect from the transform catalog, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TransformRequest {
    Blur,
    Sharpen,
    Invert,
    /// Rotate by `degrees`, positive = counter-clockwise.
    Rotate {
        degrees: f64,
        #[serde(default)]
        filter: InterpolationFilter,
    },
    FlipHorizontal,
    FlipVertical,
    CircleCrop,
    EnhanceColor {
        #[serde(default = "default_enhance_factor")]
        factor: f32,
    },
    Grayscale,
    Swirl {
        #[serde(default)]
        sampling: SwirlSampling,
    },
    Pixelate {
        #[serde(default = "default_block_size")]
        block_size: u32,
    },
    /// Shift by `amount` of full scale, `-1.0..=1.0`.
    Brightness {
        amount: f32,
    },
    /// Scale distance from mid-gray by `1 + amount`, `-1.0..=1.0`.
    Contrast {
        amount: f32,
    },
    Crop(CropRect),
}

impl TransformRequest {
    /// Rotation with the default (nearest) filter.
    pub fn rotate(degrees: f64) -> Self {
        TransformRequest::Rotate {
            degrees,
            filter: InterpolationFilter::default(),
        }
    }

    /// Color enhancement with the default factor.
    pub fn enhance_color() -> Self {
        TransformRequest::EnhanceColor {
            factor: DEFAULT_ENHANCE_FACTOR,
        }
    }

    /// Swirl with floor sampling.
    pub fn swirl() -> Self {
        TransformRequest::Swirl {
            sampling: SwirlSampling::default(),
        }
    }

    /// Short label used in logs and history descriptions.
    pub fn name(&self) -> &'static str {
        match self {
            TransformRequest::Blur => "blur",
            TransformRequest::Sharpen => "sharpen",
            TransformRequest::Invert => "invert",
            TransformRequest::Rotate { .. } => "rotate",
            TransformRequest::FlipHorizontal => "flip-horizontal",
            TransformRequest::FlipVertical => "flip-vertical",
            TransformRequest::CircleCrop => "circle-crop",
            TransformRequest::EnhanceColor { .. } => "enhance-color",
            TransformRequest::Grayscale => "grayscale",
            TransformRequest::Swirl { .. } => "swirl",
            TransformRequest::Pixelate { .. } => "pixelate",
            TransformRequest::Brightness { .. } => "brightness",
            TransformRequest::Contrast { .. } => "contrast",
            TransformRequest::Crop(_) => "crop",
        }
    }

    /// Run this transform on `image`, producing a new buffer.
    pub fn apply(&self, image: &PixelBuffer) -> Result<PixelBuffer> {
        let out = match *self {
            TransformRequest::Blur => transform::blur(image),
            TransformRequest::Sharpen => transform::sharpen(image),
            TransformRequest::Invert => transform::invert(image),
            TransformRequest::Rotate { degrees, filter } => transform::rotate(image, degrees, filter)?,
            TransformRequest::FlipHorizontal => transform::flip_horizontal(image),
            TransformRequest::FlipVertical => transform::flip_vertical(image),
            TransformRequest::CircleCrop => transform::circle_crop(image),
            TransformRequest::EnhanceColor { factor } => transform::enhance_color(image, factor)?,
            TransformRequest::Grayscale => transform::grayscale(image),
            TransformRequest::Swirl { sampling } => transform::swirl(image, sampling),
            TransformRequest::Pixelate { block_size } => transform::pixelate(image, block_size)?,
            TransformRequest::Brightness { amount } => transform::brightness(image, amount)?,
            TransformRequest::Contrast { amount } => transform::contrast(image, amount)?,
            TransformRequest::Crop(rect) => transform::crop(image, rect)?,
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ColorMode;
    use crate::error::EngineError;

    fn sample() -> PixelBuffer {
        PixelBuffer::new(2, 2, ColorMode::Rgb, (0..12).collect()).unwrap()
    }

    #[test]
    fn test_dispatch_matches_catalog() {
        let img = sample();
        assert_eq!(TransformRequest::Invert.apply(&img).unwrap(), transform::invert(&img));
        assert_eq!(
            TransformRequest::rotate(90.0).apply(&img).unwrap(),
            transform::rotate(&img, 90.0, InterpolationFilter::Nearest).unwrap()
        );
        assert_eq!(
            TransformRequest::Grayscale.apply(&img).unwrap().mode(),
            ColorMode::Gray
        );
    }

    #[test]
    fn test_failing_transform_propagates() {
        let img = sample();
        let req = TransformRequest::Crop(CropRect::new(1, 0, 1, 2));
        assert!(matches!(req.apply(&img), Err(EngineError::EmptyRegion)));
        assert!(matches!(
            TransformRequest::rotate(f64::NAN).apply(&img),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_deserialize_tagged_requests() {
        let req: TransformRequest = serde_json::from_str(r#"{"type":"rotate","degrees":-90}"#).unwrap();
        assert_eq!(req, TransformRequest::rotate(-90.0));

        let req: TransformRequest = serde_json::from_str(r#"{"type":"enhanceColor"}"#).unwrap();
        assert_eq!(req, TransformRequest::enhance_color());

        let req: TransformRequest =
            serde_json::from_str(r#"{"type":"crop","x1":1,"y1":2,"x2":3,"y2":4}"#).unwrap();
        assert_eq!(req, TransformRequest::Crop(CropRect::new(1, 2, 3, 4)));

        let req: TransformRequest =
            serde_json::from_str(r#"{"type":"swirl","sampling":"bilinear"}"#).unwrap();
        assert_eq!(
            req,
            TransformRequest::Swirl {
                sampling: SwirlSampling::Bilinear
            }
        );

        let req: TransformRequest = serde_json::from_str(r#"{"type":"pixelate"}"#).unwrap();
        assert_eq!(req, TransformRequest::Pixelate { block_size: 8 });

        let req: TransformRequest =
            serde_json::from_str(r#"{"type":"pixelate","blockSize":3}"#).unwrap();
        assert_eq!(req, TransformRequest::Pixelate { block_size: 3 });

        let req: TransformRequest =
            serde_json::from_str(r#"{"type":"contrast","amount":0.25}"#).unwrap();
        assert_eq!(req, TransformRequest::Contrast { amount: 0.25 });

        assert!(serde_json::from_str::<TransformRequest>(r#"{"type":"brightness"}"#).is_err());
    }

    #[test]
    fn test_adjustments_dispatch() {
        let img = sample();
        assert_eq!(
            TransformRequest::Brightness { amount: 0.2 }.apply(&img).unwrap(),
            transform::brightness(&img, 0.2).unwrap()
        );
        assert_eq!(
            TransformRequest::Contrast { amount: -0.5 }.apply(&img).unwrap(),
            transform::contrast(&img, -0.5).unwrap()
        );
        assert!(matches!(
            TransformRequest::Brightness { amount: 3.0 }.apply(&img),
            Err(EngineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_serialize_uses_camel_case_tag() {
        let req = TransformRequest::FlipHorizontal;
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"type":"flipHorizontal"}"#);
    }

    #[test]
    fn test_names_are_unique() {
        let all = [
            TransformRequest::Blur,
            TransformRequest::Sharpen,
            TransformRequest::Invert,
            TransformRequest::rotate(90.0),
            TransformRequest::FlipHorizontal,
            TransformRequest::FlipVertical,
            TransformRequest::CircleCrop,
            TransformRequest::enhance_color(),
            TransformRequest::Grayscale,
            TransformRequest::swirl(),
            TransformRequest::Pixelate { block_size: 4 },
            TransformRequest::Brightness { amount: 0.1 },
            TransformRequest::Contrast { amount: 0.1 },
            TransformRequest::Crop(CropRect::new(0, 0, 1, 1)),
        ];
        let names: std::collections::HashSet<_> = all.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), all.len());
    }
}
