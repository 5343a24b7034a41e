//! Owned pixel storage.
//!
//! A [`PixelBuffer`] is a row-major grid of 8-bit samples with a fixed
//! [`ColorMode`]. Buffers are plain values: transforms borrow one and return a
//! new one, and snapshots for undo are deep clones.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::luminance::luminance_u8;

/// Channel layout of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Single luminance channel.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha (straight, not premultiplied).
    Rgba,
}

impl ColorMode {
    /// Number of samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }

    /// Returns true if the last channel is alpha.
    #[inline]
    pub fn has_alpha(self) -> bool {
        self == ColorMode::Rgba
    }
}

/// How alpha is folded into the color channels when narrowing RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlphaHandling {
    /// Drop the alpha channel and keep color samples as they are.
    #[default]
    Discard,
    /// Multiply color by alpha (against black) before dropping alpha.
    Premultiply,
}

/// An owned 2D grid of pixels.
///
/// Invariant: `pixels.len() == width * height * mode.channels()` and both
/// dimensions are non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    mode: ColorMode,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw samples, validating dimensions and length.
    pub fn new(width: u32, height: u32, mode: ColorMode, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        let expected = sample_len(width, height, mode.channels())
            .ok_or(EngineError::InvalidDimensions { width, height })?;
        if pixels.len() != expected {
            return Err(EngineError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            mode,
            pixels,
        })
    }

    /// Create a buffer where every sample of every pixel equals `value`.
    pub fn filled(width: u32, height: u32, mode: ColorMode, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        let len = sample_len(width, height, mode.channels())
            .ok_or(EngineError::InvalidDimensions { width, height })?;
        Self::new(width, height, mode, vec![value; len])
    }

    /// Internal constructor for transforms that size their output themselves.
    pub(crate) fn from_raw_parts(width: u32, height: u32, mode: ColorMode, pixels: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0, "Zero-sized buffer");
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * mode.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            mode,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Samples per pixel for this buffer's mode.
    #[inline]
    pub fn channels(&self) -> usize {
        self.mode.channels()
    }

    /// Raw samples in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels()
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Samples of row `y`. Panics if `y` is out of range, like slice indexing.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.pixels[start..start + stride]
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(EngineError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y as usize * self.width as usize + x as usize) * self.channels())
    }

    /// Samples of the pixel at column `x`, row `y`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<&[u8]> {
        let idx = self.offset(x, y)?;
        Ok(&self.pixels[idx..idx + self.channels()])
    }

    /// Overwrite the pixel at column `x`, row `y`.
    ///
    /// `value` must hold exactly one sample per channel.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> Result<()> {
        let idx = self.offset(x, y)?;
        let channels = self.channels();
        if value.len() != channels {
            return Err(EngineError::InvalidPixelData {
                expected: channels,
                actual: value.len(),
            });
        }
        self.pixels[idx..idx + channels].copy_from_slice(value);
        Ok(())
    }

    /// Convert to another color mode, discarding alpha when narrowing RGBA.
    pub fn convert_mode(&self, target: ColorMode) -> PixelBuffer {
        self.convert_mode_with(target, AlphaHandling::Discard)
    }

    /// Convert to another color mode.
    ///
    /// Widening (Gray to RGB, RGB to RGBA) is lossless: gray is replicated and
    /// alpha is added fully opaque. Narrowing to Gray uses luminance weights;
    /// narrowing from RGBA applies `alpha` first.
    pub fn convert_mode_with(&self, target: ColorMode, alpha: AlphaHandling) -> PixelBuffer {
        if target == self.mode {
            return self.clone();
        }

        let src_channels = self.channels();
        let mut out = Vec::with_capacity(self.pixel_count() as usize * target.channels());

        for px in self.pixels.chunks_exact(src_channels) {
            let [r, g, b, a] = match self.mode {
                ColorMode::Gray => [px[0], px[0], px[0], 255],
                ColorMode::Rgb => [px[0], px[1], px[2], 255],
                ColorMode::Rgba => [px[0], px[1], px[2], px[3]],
            };
            let (r, g, b) = match (self.mode, alpha) {
                (ColorMode::Rgba, AlphaHandling::Premultiply) if !target.has_alpha() => {
                    (premultiply(r, a), premultiply(g, a), premultiply(b, a))
                }
                _ => (r, g, b),
            };

            match target {
                ColorMode::Gray => out.push(luminance_u8(r, g, b)),
                ColorMode::Rgb => out.extend_from_slice(&[r, g, b]),
                ColorMode::Rgba => out.extend_from_slice(&[r, g, b, a]),
            }
        }

        PixelBuffer::from_raw_parts(self.width, self.height, target, out)
    }

    /// Build a buffer from a decoded `image` crate image.
    ///
    /// Images with alpha become RGBA, single-channel images become Gray and
    /// everything else becomes RGB. Higher bit depths are reduced to 8 bits.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self> {
        let color = img.color();
        if color.has_alpha() {
            let rgba = img.into_rgba8();
            let (w, h) = rgba.dimensions();
            Self::new(w, h, ColorMode::Rgba, rgba.into_raw())
        } else if !color.has_color() {
            let gray = img.into_luma8();
            let (w, h) = gray.dimensions();
            Self::new(w, h, ColorMode::Gray, gray.into_raw())
        } else {
            let rgb = img.into_rgb8();
            let (w, h) = rgb.dimensions();
            Self::new(w, h, ColorMode::Rgb, rgb.into_raw())
        }
    }

    /// Convert to an `image` crate image for encoding.
    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let data = self.pixels.clone();
        let mismatch = || EngineError::InvalidPixelData {
            expected: sample_len(w, h, self.channels()).unwrap_or(usize::MAX),
            actual: self.pixels.len(),
        };
        let img = match self.mode {
            ColorMode::Gray => {
                DynamicImage::ImageLuma8(GrayImage::from_raw(w, h, data).ok_or_else(mismatch)?)
            }
            ColorMode::Rgb => {
                DynamicImage::ImageRgb8(RgbImage::from_raw(w, h, data).ok_or_else(mismatch)?)
            }
            ColorMode::Rgba => {
                DynamicImage::ImageRgba8(RgbaImage::from_raw(w, h, data).ok_or_else(mismatch)?)
            }
        };
        Ok(img)
    }
}

/// `width * height * channels`, or `None` if it does not fit in `usize`.
pub(crate) fn sample_len(width: u32, height: u32, channels: usize) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(channels)
}

#[inline]
fn premultiply(c: u8, a: u8) -> u8 {
    ((c as u32 * a as u32 + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_2x1() -> PixelBuffer {
        PixelBuffer::new(2, 1, ColorMode::Rgb, vec![255, 0, 0, 10, 20, 30]).unwrap()
    }

    #[test]
    fn test_new_validates_length() {
        let err = PixelBuffer::new(2, 2, ColorMode::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidPixelData {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let err = PixelBuffer::new(0, 4, ColorMode::Gray, vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimensions { width: 0, height: 4 }));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let err = PixelBuffer::new(u32::MAX, u32::MAX, ColorMode::Rgba, vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimensions { .. }));

        let err = PixelBuffer::filled(u32::MAX, u32::MAX, ColorMode::Rgba, 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_sample_len() {
        assert_eq!(sample_len(4, 3, 4), Some(48));
        assert_eq!(sample_len(u32::MAX, u32::MAX, 4), None);
    }

    #[test]
    fn test_accessors() {
        let buf = PixelBuffer::filled(4, 3, ColorMode::Rgba, 7).unwrap();
        assert_eq!(buf.width(), 4);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.channels(), 4);
        assert_eq!(buf.stride(), 16);
        assert_eq!(buf.pixel_count(), 12);
        assert_eq!(buf.row(2).len(), 16);
        assert!(buf.pixels().iter().all(|&v| v == 7));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut buf = rgb_2x1();
        assert_eq!(buf.get_pixel(1, 0).unwrap(), &[10, 20, 30]);

        buf.set_pixel(0, 0, &[1, 2, 3]).unwrap();
        assert_eq!(buf.get_pixel(0, 0).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_pixel_access_out_of_bounds() {
        let mut buf = rgb_2x1();
        assert!(matches!(
            buf.get_pixel(2, 0),
            Err(EngineError::OutOfBounds { x: 2, y: 0, .. })
        ));
        assert!(matches!(
            buf.set_pixel(0, 1, &[0, 0, 0]),
            Err(EngineError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_set_pixel_wrong_channel_count() {
        let mut buf = rgb_2x1();
        assert!(matches!(
            buf.set_pixel(0, 0, &[0, 0, 0, 0]),
            Err(EngineError::InvalidPixelData { expected: 3, actual: 4 })
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = rgb_2x1();
        let mut copy = original.clone();
        copy.set_pixel(0, 0, &[9, 9, 9]).unwrap();
        assert_eq!(original.get_pixel(0, 0).unwrap(), &[255, 0, 0]);
    }

    #[test]
    fn test_widen_gray_to_rgba() {
        let gray = PixelBuffer::new(2, 1, ColorMode::Gray, vec![10, 200]).unwrap();
        let rgba = gray.convert_mode(ColorMode::Rgba);
        assert_eq!(rgba.pixels(), &[10, 10, 10, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn test_widen_then_narrow_is_lossless() {
        let rgb = rgb_2x1();
        let back = rgb.convert_mode(ColorMode::Rgba).convert_mode(ColorMode::Rgb);
        assert_eq!(back, rgb);
    }

    #[test]
    fn test_narrow_rgb_to_gray_uses_luminance() {
        let gray = rgb_2x1().convert_mode(ColorMode::Gray);
        assert_eq!(gray.mode(), ColorMode::Gray);
        assert_eq!(gray.pixels()[0], 76);
    }

    #[test]
    fn test_rgba_to_rgb_discard_and_premultiply() {
        let rgba = PixelBuffer::new(1, 1, ColorMode::Rgba, vec![200, 100, 50, 128]).unwrap();

        let dropped = rgba.convert_mode(ColorMode::Rgb);
        assert_eq!(dropped.pixels(), &[200, 100, 50]);

        let pre = rgba.convert_mode_with(ColorMode::Rgb, AlphaHandling::Premultiply);
        // 200 * 128 / 255 = 100.4, 100 * 128 / 255 = 50.2, 50 * 128 / 255 = 25.1
        assert_eq!(pre.pixels(), &[100, 50, 25]);
    }

    #[test]
    fn test_premultiply_ignored_when_target_keeps_alpha() {
        let rgba = PixelBuffer::new(1, 1, ColorMode::Rgba, vec![200, 100, 50, 0]).unwrap();
        let same = rgba.convert_mode_with(ColorMode::Rgba, AlphaHandling::Premultiply);
        assert_eq!(same, rgba);
    }

    #[test]
    fn test_dynamic_round_trip() {
        let rgba = PixelBuffer::new(1, 2, ColorMode::Rgba, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let back = PixelBuffer::from_dynamic(rgba.to_dynamic().unwrap()).unwrap();
        assert_eq!(back, rgba);

        let gray = PixelBuffer::new(2, 1, ColorMode::Gray, vec![9, 99]).unwrap();
        let back = PixelBuffer::from_dynamic(gray.to_dynamic().unwrap()).unwrap();
        assert_eq!(back, gray);
    }

    #[test]
    fn test_from_dynamic_gray_alpha_becomes_rgba() {
        let la = image::GrayAlphaImage::from_raw(1, 1, vec![40, 128]).unwrap();
        let buf = PixelBuffer::from_dynamic(DynamicImage::ImageLumaA8(la)).unwrap();
        assert_eq!(buf.mode(), ColorMode::Rgba);
        assert_eq!(buf.pixels(), &[40, 40, 40, 128]);
    }
}
