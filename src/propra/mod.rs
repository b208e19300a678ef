//! ProPra container format (internal).
//!
//! 28-byte header: 10-byte magic, width and height (u16 LE), pixel depth
//! (always 24), compression code, data-segment size (u64 LE), checksum
//! (u32 LE). Pixels are stored G, B, R. Nothing may follow the data segment.

mod decode;
mod encode;

pub(crate) use decode::decode;
pub(crate) use encode::encode;

use crate::error::CodecError;
use crate::pixel::{Compression, PixelOrder};

pub(crate) const MAGIC: &[u8; 10] = b"ProPraWS19";
pub(crate) const HEADER_SIZE: usize = 28;
/// Offset of the data-segment size field; the checksum field follows it.
pub(crate) const SIZE_FIELD_OFFSET: u64 = 0x10;
pub(crate) const PIXEL_ORDER: PixelOrder = PixelOrder::Gbr;

pub(crate) struct ProPraHeader {
    pub width: u16,
    pub height: u16,
    pub compression: Compression,
    pub data_segment_size: u64,
    pub checksum: u32,
}

impl ProPraHeader {
    pub(crate) fn parse(raw: &[u8; HEADER_SIZE]) -> Result<Self, CodecError> {
        if &raw[..10] != MAGIC {
            return Err(CodecError::UnrecognizedFormat);
        }
        let width = u16::from_le_bytes([raw[0x0A], raw[0x0B]]);
        let height = u16::from_le_bytes([raw[0x0C], raw[0x0D]]);
        let depth = raw[0x0E];
        let code = raw[0x0F];
        let data_segment_size = u64::from_le_bytes([
            raw[0x10], raw[0x11], raw[0x12], raw[0x13], raw[0x14], raw[0x15], raw[0x16], raw[0x17],
        ]);
        let checksum = u32::from_le_bytes([raw[0x18], raw[0x19], raw[0x1A], raw[0x1B]]);

        if width == 0 || height == 0 {
            return Err(CodecError::InvalidHeader(format!(
                "image dimensions {width}x{height} must be nonzero"
            )));
        }
        if depth != 24 {
            return Err(CodecError::UnsupportedVariant(format!(
                "pixel depth {depth}, only 24-bit pixels are supported"
            )));
        }
        let compression = Compression::from_code(code).ok_or_else(|| {
            CodecError::InvalidHeader(format!("unknown compression code {code}"))
        })?;

        Ok(Self {
            width,
            height,
            compression,
            data_segment_size,
            checksum,
        })
    }

    pub(crate) fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut raw = [0u8; HEADER_SIZE];
        raw[..10].copy_from_slice(MAGIC);
        raw[0x0A..0x0C].copy_from_slice(&self.width.to_le_bytes());
        raw[0x0C..0x0E].copy_from_slice(&self.height.to_le_bytes());
        raw[0x0E] = 24;
        raw[0x0F] = self.compression.code();
        raw[0x10..0x18].copy_from_slice(&self.data_segment_size.to_le_bytes());
        raw[0x18..0x1C].copy_from_slice(&self.checksum.to_le_bytes());
        raw
    }
}
