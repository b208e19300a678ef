//! TGA decoder.

use std::io::Read;

use super::{TgaHeader, HEADER_SIZE, PIXEL_ORDER};
use crate::decode::{check_limits, read_header};
use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::row::RowDecoder;

pub(crate) fn decode<R: Read>(
    mut reader: R,
    limits: Option<&Limits>,
) -> Result<Image, CodecError> {
    let mut raw = [0u8; HEADER_SIZE];
    read_header(&mut reader, &mut raw)?;
    let header = TgaHeader::parse(&raw)?;
    check_limits(limits, header.width, header.height)?;

    let pixel_count = usize::from(header.width)
        .checked_mul(usize::from(header.height))
        .ok_or(CodecError::DimensionsTooLarge {
            width: u32::from(header.width),
            height: u32::from(header.height),
        })?;

    let mut rows = RowDecoder::new(reader, header.compression, PIXEL_ORDER, header.width);
    let mut pixels = Vec::with_capacity(pixel_count);
    for _ in 0..header.height {
        rows.decode_row(&mut pixels)?;
    }
    // There is no declared size or checksum to reconcile, and data behind
    // the image (footer, developer area) is permitted.

    Image::new(header.width, header.height, pixels)
}
