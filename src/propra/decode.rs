//! ProPra decoder: header, rows, then checksum/size reconciliation.

use std::io::Read;

use super::{ProPraHeader, HEADER_SIZE, PIXEL_ORDER};
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
    let header = ProPraHeader::parse(&raw)?;
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

    // The format allows nothing behind the data segment.
    if rows.has_trailing_data()? {
        return Err(CodecError::TrailingData);
    }
    let computed = rows.checksum();
    if header.checksum != computed {
        return Err(CodecError::ChecksumMismatch {
            declared: header.checksum,
            computed,
        });
    }
    let actual = rows.consumed();
    if header.data_segment_size != actual {
        return Err(CodecError::SizeMismatch {
            declared: header.data_segment_size,
            actual,
        });
    }

    Image::new(header.width, header.height, pixels)
}
