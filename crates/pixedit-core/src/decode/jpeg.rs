//! EXIF orientation for JPEG sources.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

use super::Orientation;

/// Read the EXIF orientation tag from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or the tag is
/// missing.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(e) => {
            log::trace!("No EXIF orientation: {}", e);
            Orientation::Normal
        }
    }
}

/// Turn a decoded image upright according to `orientation`.
pub fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x1 image: red on the left, green on the right.
    fn red_green() -> DynamicImage {
        let pixels = vec![255, 0, 0, 0, 255, 0];
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_orientation_invalid_data() {
        assert_eq!(read_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
        assert_eq!(read_orientation(&[]), Orientation::Normal);
    }

    #[test]
    fn test_read_orientation_from_exif() {
        use crate::decode::test_support::{jpeg_bytes, with_orientation};

        let jpeg = jpeg_bytes(&[50u8; 8 * 8 * 3], 8, 8);
        assert_eq!(read_orientation(&jpeg), Orientation::Normal);
        assert_eq!(
            read_orientation(&with_orientation(&jpeg, 6)),
            Orientation::Rotate90CW
        );
        assert_eq!(
            read_orientation(&with_orientation(&jpeg, 3)),
            Orientation::Rotate180
        );
    }

    #[test]
    fn test_apply_orientation_normal() {
        let result = apply_orientation(red_green(), Orientation::Normal).into_rgb8();
        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let result = apply_orientation(red_green(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
        // Clockwise turn moves the left pixel to the top
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let result = apply_orientation(red_green(), Orientation::Rotate180).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_transpose() {
        let result = apply_orientation(red_green(), Orientation::Transpose).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(result.get_pixel(0, 1).0, [0, 255, 0]);
    }
}
