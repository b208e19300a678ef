/// Errors from ProPra/TGA decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("bitstream ended before the huffman tree was complete")]
    TreeIncomplete,

    #[error("checksum mismatch: header declares {declared:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { declared: u32, computed: u32 },

    #[error("data segment size mismatch: header declares {declared}, actually read {actual}")]
    SizeMismatch { declared: u64, actual: u64 },

    #[error("found data after the image data segment where none is allowed")]
    TrailingData,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
