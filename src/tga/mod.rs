//! TGA container format (internal).
//!
//! 18-byte header; only top-left-origin 24-bit true-color images are
//! supported (image types 2 and 10). Compression rides in the image-type
//! code: bit 3 set means RLE. There are no size or checksum fields; the
//! data-segment length is implicit from the dimensions, and trailing data
//! (footer, developer area) is tolerated.

mod decode;
mod encode;

pub(crate) use decode::decode;
pub(crate) use encode::encode;

use crate::error::CodecError;
use crate::pixel::{Compression, PixelOrder};

pub(crate) const HEADER_SIZE: usize = 18;
pub(crate) const PIXEL_ORDER: PixelOrder = PixelOrder::Bgr;

const IMAGE_TYPE_TRUE_COLOR: u8 = 2;
const IMAGE_TYPE_TRUE_COLOR_RLE: u8 = 10;
const DESCRIPTOR_TOP_LEFT: u8 = 0x20;

pub(crate) struct TgaHeader {
    pub width: u16,
    pub height: u16,
    pub compression: Compression,
}

impl TgaHeader {
    pub(crate) fn parse(raw: &[u8; HEADER_SIZE]) -> Result<Self, CodecError> {
        let id_length = raw[0x00];
        let image_type = raw[0x02];
        let x_origin = u16::from_le_bytes([raw[0x08], raw[0x09]]);
        let y_origin = u16::from_le_bytes([raw[0x0A], raw[0x0B]]);
        let width = u16::from_le_bytes([raw[0x0C], raw[0x0D]]);
        let height = u16::from_le_bytes([raw[0x0E], raw[0x0F]]);
        let depth = raw[0x10];
        let descriptor = raw[0x11];

        if id_length != 0 {
            return Err(CodecError::UnsupportedVariant(format!(
                "image id of {id_length} bytes, only id-less files are supported"
            )));
        }
        if image_type != IMAGE_TYPE_TRUE_COLOR && image_type != IMAGE_TYPE_TRUE_COLOR_RLE {
            return Err(CodecError::UnsupportedVariant(format!(
                "image type {image_type}, only types 2 and 10 are supported"
            )));
        }
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidHeader(format!(
                "image dimensions {width}x{height} must be nonzero"
            )));
        }
        if descriptor != DESCRIPTOR_TOP_LEFT || x_origin != 0 || y_origin != height {
            return Err(CodecError::InvalidHeader(
                "image origin must be the top left corner".into(),
            ));
        }
        if depth != 24 {
            return Err(CodecError::UnsupportedVariant(format!(
                "pixel depth {depth}, only 24-bit pixels are supported"
            )));
        }

        let compression = if image_type & 0x8 != 0 {
            Compression::Rle
        } else {
            Compression::Uncompressed
        };
        Ok(Self {
            width,
            height,
            compression,
        })
    }

    pub(crate) fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let image_type = match self.compression {
            Compression::Rle => IMAGE_TYPE_TRUE_COLOR_RLE,
            _ => IMAGE_TYPE_TRUE_COLOR,
        };
        let mut raw = [0u8; HEADER_SIZE];
        raw[0x02] = image_type;
        // x origin stays zero; y origin equals the height (top-left origin)
        raw[0x0A..0x0C].copy_from_slice(&self.height.to_le_bytes());
        raw[0x0C..0x0E].copy_from_slice(&self.width.to_le_bytes());
        raw[0x0E..0x10].copy_from_slice(&self.height.to_le_bytes());
        raw[0x10] = 24;
        raw[0x11] = DESCRIPTOR_TOP_LEFT;
        raw
    }
}
