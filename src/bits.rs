//! Bit-granular reading and writing on top of counted byte streams.
//!
//! Only the Huffman path is bit-granular; RLE and uncompressed rows go
//! straight through the segment reader/writer. Bytes enter and leave in
//! MSB-first order, and every byte that crosses the underlying stream is
//! folded into the segment checksum and byte count by the stream wrappers.

use std::io::{Read, Write};

use crate::error::CodecError;
use crate::row::{SegmentReader, SegmentWriter};

/// Pending bits that are not yet byte-aligned.
///
/// Owned by exactly one [`BitWriter`] or [`BitReader`]. The accumulator keeps
/// the oldest bit highest, so bytes pop in first-in order.
#[derive(Debug, Default)]
pub(crate) struct BitQueue {
    acc: u64,
    len: u32,
}

impl BitQueue {
    fn push(&mut self, bits: u64, count: u32) {
        debug_assert!(count <= 64 - self.len, "bit queue overflow");
        if count == 0 {
            return;
        }
        self.acc = (self.acc << count) | (bits & mask(count));
        self.len += count;
    }

    fn pop_byte(&mut self) -> Option<u8> {
        if self.len < 8 {
            return None;
        }
        self.len -= 8;
        Some(((self.acc >> self.len) & 0xFF) as u8)
    }

    fn take(&mut self, count: u32) -> Option<u64> {
        if self.len < count {
            return None;
        }
        self.len -= count;
        Some((self.acc >> self.len) & mask(count))
    }

    fn len(&self) -> u32 {
        self.len
    }
}

fn mask(count: u32) -> u64 {
    if count >= 64 { u64::MAX } else { (1 << count) - 1 }
}

/// Write side: buffers bits, emits a byte to the sink for every 8 buffered.
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    queue: BitQueue,
}

impl BitWriter {
    /// Append `count` bits (the low bits of `bits`, MSB first) and emit any
    /// now-complete bytes.
    pub(crate) fn push<W: Write>(
        &mut self,
        bits: u64,
        count: u32,
        sink: &mut SegmentWriter<W>,
    ) -> Result<(), CodecError> {
        self.queue.push(bits, count);
        self.drain(sink)
    }

    /// Pad the pending buffer with `0` bits to the next byte boundary and
    /// emit it. Must be called once at end of stream.
    pub(crate) fn flush<W: Write>(&mut self, sink: &mut SegmentWriter<W>) -> Result<(), CodecError> {
        let rem = self.queue.len() % 8;
        if rem != 0 {
            self.queue.push(0, 8 - rem);
        }
        self.drain(sink)
    }

    fn drain<W: Write>(&mut self, sink: &mut SegmentWriter<W>) -> Result<(), CodecError> {
        while let Some(byte) = self.queue.pop_byte() {
            sink.put(&[byte])?;
        }
        Ok(())
    }
}

/// Read side: refills the queue from the source whenever fewer than 16 bits
/// remain and end-of-stream has not been observed.
#[derive(Debug, Default)]
pub(crate) struct BitReader {
    queue: BitQueue,
    eof: bool,
}

impl BitReader {
    /// Remove and return the next `count` bits as an unsigned integer.
    ///
    /// `Ok(None)` signals clean exhaustion (no bits left at all); a nonempty
    /// tail shorter than `count` bits is a truncation error.
    pub(crate) fn take<R: Read>(
        &mut self,
        count: u32,
        src: &mut SegmentReader<R>,
    ) -> Result<Option<u32>, CodecError> {
        while !self.eof && self.queue.len() < 16 {
            match src.read_byte()? {
                Some(byte) => self.queue.push(u64::from(byte), 8),
                None => self.eof = true,
            }
        }
        if self.queue.len() == 0 {
            return Ok(None);
        }
        match self.queue.take(count) {
            Some(bits) => Ok(Some(bits as u32)),
            None => Err(CodecError::UnexpectedEof),
        }
    }
}
