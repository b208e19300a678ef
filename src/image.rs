use rgb::ComponentBytes as _;

use crate::error::CodecError;
use crate::pixel::Pixel;

/// A fully decoded image: dimensions plus owned pixels in canonical RGB.
///
/// Rows are stored top-to-bottom, pixels left-to-right, matching the order
/// both container formats use on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u16,
    height: u16,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Build an image from owned pixels.
    ///
    /// Returns [`CodecError::InvalidData`] if the pixel count does not match
    /// `width * height`, and [`CodecError::InvalidHeader`] for a zero
    /// dimension.
    pub fn new(width: u16, height: u16, pixels: Vec<Pixel>) -> Result<Self, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidHeader(format!(
                "image dimensions {width}x{height} must be nonzero"
            )));
        }
        let expected = usize::from(width) * usize::from(height);
        if pixels.len() != expected {
            return Err(CodecError::InvalidData(format!(
                "pixel buffer holds {} pixels, dimensions require {expected}",
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// One row of pixels.
    ///
    /// Panics if `y` is out of range; callers iterate `0..height()`.
    pub fn row(&self, y: u16) -> &[Pixel] {
        let w = usize::from(self.width);
        let start = usize::from(y) * w;
        &self.pixels[start..start + w]
    }

    /// Iterator over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(usize::from(self.width))
    }

    /// Flat view of the pixel data as R,G,B bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_slice().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn rejects_wrong_pixel_count() {
        let pixels = vec![Pixel::new(0, 0, 0); 5];
        assert_matches!(Image::new(2, 3, pixels), Err(CodecError::InvalidData(_)));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert_matches!(Image::new(0, 1, vec![]), Err(CodecError::InvalidHeader(_)));
    }

    #[test]
    fn rows_and_bytes() {
        let pixels = vec![
            Pixel::new(1, 2, 3),
            Pixel::new(4, 5, 6),
            Pixel::new(7, 8, 9),
            Pixel::new(10, 11, 12),
        ];
        let img = Image::new(2, 2, pixels).unwrap();
        assert_eq!(img.row(1), &[Pixel::new(7, 8, 9), Pixel::new(10, 11, 12)]);
        assert_eq!(img.rows().count(), 2);
        assert_eq!(img.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }
}
