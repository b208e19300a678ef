//! Row codec dispatch and data-segment accounting.
//!
//! One [`SegmentReader`] or [`SegmentWriter`] exists per side of a
//! conversion. It owns the checksum and the byte counter for that side;
//! every data-segment byte of every compression mode flows through it, and
//! no other component mutates either value.

use std::io::{ErrorKind, Read, Write};

use crate::bits::{BitReader, BitWriter};
use crate::checksum::Checksum;
use crate::error::CodecError;
use crate::huffman::{CodeTable, HuffmanTree};
use crate::image::Image;
use crate::pixel::{Compression, Pixel, PixelOrder};
use crate::rle;

/// Byte source with checksum and byte-count accounting.
pub(crate) struct SegmentReader<R> {
    inner: R,
    checksum: Checksum,
    consumed: u64,
}

impl<R: Read> SegmentReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            checksum: Checksum::new(),
            consumed: 0,
        }
    }

    /// Read one byte; `Ok(None)` at end of stream.
    pub(crate) fn read_byte(&mut self) -> Result<Option<u8>, CodecError> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.checksum.add(buf[0]);
                    self.consumed += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Fill `buf` completely; a short read is a truncation error. Bytes
    /// received before the truncation are still accounted.
    pub(crate) fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), CodecError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.checksum.update(&buf[..filled]);
                    self.consumed += filled as u64;
                    return Err(CodecError::UnexpectedEof);
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.checksum.update(buf);
        self.consumed += buf.len() as u64;
        Ok(())
    }

    /// Probe for bytes past the data segment, without accounting them.
    fn at_eof(&mut self) -> Result<bool, CodecError> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(true),
                Ok(_) => return Ok(false),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }

    pub(crate) fn checksum(&self) -> u32 {
        self.checksum.value()
    }
}

/// Byte sink with checksum and byte-count accounting.
pub(crate) struct SegmentWriter<W> {
    inner: W,
    checksum: Checksum,
    written: u64,
}

impl<W: Write> SegmentWriter<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner,
            checksum: Checksum::new(),
            written: 0,
        }
    }

    pub(crate) fn put(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        self.inner.write_all(bytes)?;
        self.checksum.update(bytes);
        self.written += bytes.len() as u64;
        Ok(())
    }

    pub(crate) fn written(&self) -> u64 {
        self.written
    }

    pub(crate) fn checksum(&self) -> u32 {
        self.checksum.value()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.inner
    }
}

/// Decodes rows from a container data segment, dispatching on the declared
/// compression mode.
pub(crate) struct RowDecoder<R> {
    src: SegmentReader<R>,
    mode: Compression,
    order: PixelOrder,
    width: u16,
    bits: BitReader,
    /// Parsed lazily before the first Huffman row.
    tree: Option<HuffmanTree>,
}

impl<R: Read> RowDecoder<R> {
    pub(crate) fn new(inner: R, mode: Compression, order: PixelOrder, width: u16) -> Self {
        Self {
            src: SegmentReader::new(inner),
            mode,
            order,
            width,
            bits: BitReader::default(),
            tree: None,
        }
    }

    /// Decode one row of `width` pixels, appending to `out`.
    pub(crate) fn decode_row(&mut self, out: &mut Vec<Pixel>) -> Result<(), CodecError> {
        match self.mode {
            Compression::Uncompressed => self.decode_uncompressed(out),
            Compression::Rle => rle::decode_row(&mut self.src, self.width, self.order, out),
            Compression::Huffman => self.decode_huffman(out),
        }
    }

    fn decode_uncompressed(&mut self, out: &mut Vec<Pixel>) -> Result<(), CodecError> {
        let mut buf = [0u8; 3];
        for _ in 0..self.width {
            self.src.read_exact(&mut buf)?;
            out.push(self.order.read(buf));
        }
        Ok(())
    }

    fn decode_huffman(&mut self, out: &mut Vec<Pixel>) -> Result<(), CodecError> {
        if self.tree.is_none() {
            let tree = HuffmanTree::parse(&mut self.bits, &mut self.src)?;
            self.tree = Some(tree);
        }
        let Some(tree) = self.tree.as_ref() else {
            return Err(CodecError::TreeIncomplete);
        };
        for _ in 0..self.width {
            let mut buf = [0u8; 3];
            for byte in &mut buf {
                *byte = tree.read_symbol(&mut self.bits, &mut self.src)?;
            }
            out.push(self.order.read(buf));
        }
        Ok(())
    }

    /// True if the underlying stream still holds bytes after the segment.
    pub(crate) fn has_trailing_data(&mut self) -> Result<bool, CodecError> {
        Ok(!self.src.at_eof()?)
    }

    pub(crate) fn consumed(&self) -> u64 {
        self.src.consumed()
    }

    pub(crate) fn checksum(&self) -> u32 {
        self.src.checksum()
    }
}

/// Encodes rows into a container data segment, dispatching on the requested
/// compression mode.
pub(crate) struct RowEncoder<W> {
    sink: SegmentWriter<W>,
    mode: Compression,
    order: PixelOrder,
    bits: BitWriter,
    /// Built in a pre-pass over all pixel bytes; present iff mode is Huffman.
    huffman: Option<(HuffmanTree, CodeTable)>,
    tree_written: bool,
}

impl<W: Write> RowEncoder<W> {
    /// For Huffman mode this runs the histogram pre-pass over the whole
    /// image (in output channel order) and builds the tree and code table
    /// before any row is encoded.
    pub(crate) fn new(
        inner: W,
        mode: Compression,
        order: PixelOrder,
        image: &Image,
    ) -> Result<Self, CodecError> {
        let huffman = if mode == Compression::Huffman {
            let mut histogram = [0u64; 256];
            for &px in image.pixels() {
                for byte in order.write(px) {
                    histogram[usize::from(byte)] += 1;
                }
            }
            let tree = HuffmanTree::from_histogram(&histogram)?;
            let table = tree.code_table();
            Some((tree, table))
        } else {
            None
        };
        Ok(Self {
            sink: SegmentWriter::new(inner),
            mode,
            order,
            bits: BitWriter::default(),
            huffman,
            tree_written: false,
        })
    }

    pub(crate) fn encode_row(&mut self, row: &[Pixel]) -> Result<(), CodecError> {
        match self.mode {
            Compression::Uncompressed => {
                for &px in row {
                    self.sink.put(&self.order.write(px))?;
                }
                Ok(())
            }
            Compression::Rle => rle::encode_row(row, self.order, &mut self.sink),
            Compression::Huffman => self.encode_huffman_row(row),
        }
    }

    fn encode_huffman_row(&mut self, row: &[Pixel]) -> Result<(), CodecError> {
        let Some((tree, table)) = self.huffman.as_ref() else {
            return Err(CodecError::TreeIncomplete);
        };
        // The serialized tree is the first content of the data segment.
        if !self.tree_written {
            tree.serialize(&mut self.bits, &mut self.sink)?;
            self.tree_written = true;
        }
        for &px in row {
            for byte in self.order.write(px) {
                let (code, len) = table.code(byte);
                self.bits.push(code, len, &mut self.sink)?;
            }
        }
        Ok(())
    }

    /// Flush any pending bits and return the final
    /// `(data segment size, checksum)` pair.
    pub(crate) fn finish(mut self) -> Result<(u64, u32), CodecError> {
        if self.mode == Compression::Huffman {
            self.bits.flush(&mut self.sink)?;
        }
        Ok((self.sink.written(), self.sink.checksum()))
    }
}
