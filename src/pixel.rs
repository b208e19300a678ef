/// Supported container formats.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// ProPra: 10-byte magic, explicit size and checksum fields, GBR pixels.
    ProPra,
    /// TGA (Targa), top-left-origin 24-bit true-color only, BGR pixels.
    Tga,
}

/// A 24-bit pixel value, held in canonical R/G/B field order.
///
/// Containers store the three channels in their own byte order; the order is
/// applied when a pixel crosses the container boundary, never inside the
/// engine.
pub type Pixel = rgb::RGB8;

/// Channel order of a pixel's three bytes inside a container.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelOrder {
    /// R, G, B.
    Rgb,
    /// B, G, R (TGA).
    Bgr,
    /// G, B, R (ProPra).
    Gbr,
}

impl PixelOrder {
    /// Interpret three container bytes as a pixel.
    pub fn read(self, bytes: [u8; 3]) -> Pixel {
        match self {
            Self::Rgb => Pixel::new(bytes[0], bytes[1], bytes[2]),
            Self::Bgr => Pixel::new(bytes[2], bytes[1], bytes[0]),
            Self::Gbr => Pixel::new(bytes[2], bytes[0], bytes[1]),
        }
    }

    /// Serialize a pixel into this container byte order.
    pub fn write(self, px: Pixel) -> [u8; 3] {
        match self {
            Self::Rgb => [px.r, px.g, px.b],
            Self::Bgr => [px.b, px.g, px.r],
            Self::Gbr => [px.g, px.b, px.r],
        }
    }
}

/// Compression mode of a container data segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    Uncompressed,
    Rle,
    Huffman,
}

impl Compression {
    /// Parse a ProPra compression code byte.
    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Uncompressed),
            1 => Some(Self::Rle),
            2 => Some(Self::Huffman),
            _ => None,
        }
    }

    /// ProPra compression code byte.
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Uncompressed => 0,
            Self::Rle => 1,
            Self::Huffman => 2,
        }
    }

    /// Pick the smaller of RLE and uncompressed for an image, by exact
    /// encoded size. Prefers `Uncompressed` on ties; never picks `Huffman`.
    pub fn pick(image: &crate::Image) -> Self {
        let uncompressed = u64::from(image.width()) * u64::from(image.height()) * 3;
        if crate::rle::encoded_size(image) < uncompressed {
            Self::Rle
        } else {
            Self::Uncompressed
        }
    }
}
