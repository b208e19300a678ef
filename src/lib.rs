//! # propack
//!
//! ProPra and TGA image container codec.
//!
//! Converts 24-bit raster images between the ProPra container format and
//! top-left-origin true-color TGA. The data segment of either container can
//! be read and written through three interchangeable row codecs:
//! uncompressed, run-length encoding, and Huffman coding (ProPra only).
//! ProPra files carry a data-segment size and a rolling checksum, both of
//! which are reconciled against the bytes actually read or written.
//!
//! ## Supported containers
//!
//! - **ProPra** — 28-byte header (`ProPraWS19` magic), uncompressed, RLE, or
//!   Huffman-coded data segment, GBR pixel order, strict trailing-data rule.
//! - **TGA** — 18-byte header, image types 2 (uncompressed) and 10 (RLE),
//!   BGR pixel order, pixel depth 24, origin at the top left.
//!
//! ## Non-Goals
//!
//! - Color-mapped, grayscale, or non-24-bit TGA variants
//! - Bottom-up or right-to-left pixel orders
//! - Huffman interoperability with any external format
//!
//! ## Usage
//!
//! ```no_run
//! use propack::{Compression, DecodeRequest, EncodeRequest};
//!
//! let input = std::fs::File::open("picture.tga")?;
//! let image = DecodeRequest::tga(std::io::BufReader::new(input)).decode()?;
//!
//! let output = std::fs::File::create("picture.propra")?;
//! let stats = EncodeRequest::propra(Compression::pick(&image))
//!     .encode(&image, std::io::BufWriter::new(output))?;
//! println!("wrote {} data bytes", stats.data_segment_size);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod bits;
mod checksum;
mod error;
mod huffman;
mod image;
mod limits;
mod pixel;
mod rle;
mod row;

mod propra;
mod tga;

mod decode;
mod encode;

// Re-exports
pub use checksum::Checksum;
pub use decode::DecodeRequest;
pub use encode::{EncodeRequest, EncodeStats};
pub use error::CodecError;
pub use image::Image;
pub use limits::Limits;
pub use pixel::{Compression, ImageFormat, Pixel, PixelOrder};
