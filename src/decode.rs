use std::io::Read;

use crate::error::CodecError;
use crate::image::Image;
use crate::limits::Limits;
use crate::pixel::ImageFormat;
use crate::{propra, tga};

/// Builder for decoding a container stream into an [`Image`].
///
/// The container format is stated by the caller (TGA has no magic bytes to
/// sniff). Typical use:
///
/// ```no_run
/// use propack::{DecodeRequest, Limits};
///
/// let file = std::fs::File::open("input.propra")?;
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let image = DecodeRequest::propra(std::io::BufReader::new(file))
///     .with_limits(&limits)
///     .decode()?;
/// # Ok::<(), propack::CodecError>(())
/// ```
pub struct DecodeRequest<'a, R> {
    reader: R,
    format: ImageFormat,
    limits: Option<&'a Limits>,
}

impl<'a, R: Read> DecodeRequest<'a, R> {
    /// Decode a ProPra stream.
    pub fn propra(reader: R) -> Self {
        Self {
            reader,
            format: ImageFormat::ProPra,
            limits: None,
        }
    }

    /// Decode a TGA stream.
    pub fn tga(reader: R) -> Self {
        Self {
            reader,
            format: ImageFormat::Tga,
            limits: None,
        }
    }

    /// Apply resource limits, checked right after the header is parsed.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Read the whole container and return the decoded image.
    pub fn decode(self) -> Result<Image, CodecError> {
        match self.format {
            ImageFormat::ProPra => propra::decode(self.reader, self.limits),
            ImageFormat::Tga => tga::decode(self.reader, self.limits),
        }
    }
}

/// Read a fixed-size header, mapping a short read to [`CodecError::UnexpectedEof`].
pub(crate) fn read_header<R: Read>(reader: &mut R, raw: &mut [u8]) -> Result<(), CodecError> {
    reader.read_exact(raw).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            CodecError::UnexpectedEof
        } else {
            e.into()
        }
    })
}

pub(crate) fn check_limits(
    limits: Option<&Limits>,
    width: u16,
    height: u16,
) -> Result<(), CodecError> {
    match limits {
        Some(limits) => limits.check(width, height),
        None => Ok(()),
    }
}
