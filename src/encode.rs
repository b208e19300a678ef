use std::io::{Seek, Write};

use crate::error::CodecError;
use crate::image::Image;
use crate::pixel::{Compression, ImageFormat};
use crate::{propra, tga};

/// Final accounting for an encoded data segment.
///
/// For ProPra output these are the values patched into the header; for TGA
/// they are computed the same way but the container has no fields to carry
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeStats {
    /// Bytes written to the data segment.
    pub data_segment_size: u64,
    /// Checksum over the data segment, in write order.
    pub checksum: u32,
}

/// Builder for encoding an [`Image`] into a container stream.
///
/// The sink must support seeking: ProPra output is written with zeroed
/// size/checksum placeholders and patched in place once the body is done.
///
/// ```no_run
/// use propack::{Compression, EncodeRequest, Image};
///
/// # let image: Image = unimplemented!();
/// let file = std::fs::File::create("output.propra")?;
/// let stats = EncodeRequest::propra(Compression::Rle)
///     .encode(&image, std::io::BufWriter::new(file))?;
/// println!("{} bytes, checksum {:#010x}", stats.data_segment_size, stats.checksum);
/// # Ok::<(), propack::CodecError>(())
/// ```
pub struct EncodeRequest {
    format: ImageFormat,
    compression: Compression,
}

impl EncodeRequest {
    /// Encode to ProPra with the given compression mode.
    pub fn propra(compression: Compression) -> Self {
        Self {
            format: ImageFormat::ProPra,
            compression,
        }
    }

    /// Encode to TGA with the given compression mode.
    ///
    /// Huffman is rejected at encode time; the TGA image-type code can only
    /// express uncompressed and RLE.
    pub fn tga(compression: Compression) -> Self {
        Self {
            format: ImageFormat::Tga,
            compression,
        }
    }

    /// Write the container and return the data-segment accounting.
    pub fn encode<W: Write + Seek>(&self, image: &Image, out: W) -> Result<EncodeStats, CodecError> {
        match self.format {
            ImageFormat::ProPra => propra::encode(image, self.compression, out),
            ImageFormat::Tga => tga::encode(image, self.compression, out),
        }
    }
}
