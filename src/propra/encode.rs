//! ProPra encoder: placeholder header, body, then the positional patch of
//! the size and checksum fields.

use std::io::{Seek, SeekFrom, Write};

use super::{ProPraHeader, PIXEL_ORDER, SIZE_FIELD_OFFSET};
use crate::encode::EncodeStats;
use crate::error::CodecError;
use crate::image::Image;
use crate::pixel::Compression;
use crate::row::RowEncoder;

pub(crate) fn encode<W: Write + Seek>(
    image: &Image,
    compression: Compression,
    mut out: W,
) -> Result<EncodeStats, CodecError> {
    // Phase 1: header with zeroed size/checksum, then the body. The true
    // values exist only once every row has been written.
    let header = ProPraHeader {
        width: image.width(),
        height: image.height(),
        compression,
        data_segment_size: 0,
        checksum: 0,
    };
    out.write_all(&header.to_bytes())?;

    let mut rows = RowEncoder::new(&mut out, compression, PIXEL_ORDER, image)?;
    for row in image.rows() {
        rows.encode_row(row)?;
    }
    let (data_segment_size, checksum) = rows.finish()?;

    // Phase 2: one bounded positional overwrite of the two placeholder
    // fields. The body stream must be fully flushed first.
    out.flush()?;
    out.seek(SeekFrom::Start(SIZE_FIELD_OFFSET))?;
    out.write_all(&data_segment_size.to_le_bytes())?;
    out.write_all(&checksum.to_le_bytes())?;
    out.flush()?;

    Ok(EncodeStats {
        data_segment_size,
        checksum,
    })
}
