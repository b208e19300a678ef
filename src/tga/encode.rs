//! TGA encoder.

use std::io::Write;

use super::{TgaHeader, PIXEL_ORDER};
use crate::encode::EncodeStats;
use crate::error::CodecError;
use crate::image::Image;
use crate::pixel::Compression;
use crate::row::RowEncoder;

pub(crate) fn encode<W: Write>(
    image: &Image,
    compression: Compression,
    mut out: W,
) -> Result<EncodeStats, CodecError> {
    if compression == Compression::Huffman {
        return Err(CodecError::UnsupportedVariant(
            "huffman compression cannot be stored in a tga container".into(),
        ));
    }

    // Unlike ProPra, the header is complete up front; no patch phase.
    let header = TgaHeader {
        width: image.width(),
        height: image.height(),
        compression,
    };
    out.write_all(&header.to_bytes())?;

    let mut rows = RowEncoder::new(&mut out, compression, PIXEL_ORDER, image)?;
    for row in image.rows() {
        rows.encode_row(row)?;
    }
    let (data_segment_size, checksum) = rows.finish()?;
    out.flush()?;

    Ok(EncodeStats {
        data_segment_size,
        checksum,
    })
}
