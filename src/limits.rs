use crate::error::CodecError;

/// Resource limits for decode operations.
///
/// Container dimensions are 16-bit, but a hostile header can still demand a
/// ~12 GiB pixel allocation (65535 x 65535 x 3 bytes). All fields default
/// to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a parsed header's dimensions, including the decoded-buffer
    /// allocation they imply (3 bytes per pixel).
    pub(crate) fn check(&self, width: u16, height: u16) -> Result<(), CodecError> {
        let (width, height) = (u64::from(width), u64::from(height));
        let checks = [
            (self.max_width, width, "width"),
            (self.max_height, height, "height"),
            (self.max_pixels, width * height, "pixel count"),
            (self.max_memory_bytes, width * height * 3, "decoded size"),
        ];
        for (limit, actual, what) in checks {
            if let Some(limit) = limit {
                if actual > limit {
                    return Err(CodecError::LimitExceeded(format!(
                        "{what} {actual} exceeds limit {limit}"
                    )));
                }
            }
        }
        Ok(())
    }
}
