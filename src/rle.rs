//! Greedy run-length packetizer.
//!
//! Each row is encoded independently as a sequence of packets: a control
//! byte whose top bit selects the kind and whose low seven bits hold
//! `count - 1`, followed by `count` literal pixels (raw) or one repeated
//! pixel (run). Counts range 1..=128.

use std::io::{Read, Write};

use crate::error::CodecError;
use crate::image::Image;
use crate::pixel::{Pixel, PixelOrder};
use crate::row::{SegmentReader, SegmentWriter};

const MAX_PACKET: usize = 128;

/// One encoded unit, live only while its row is being packetized.
#[derive(Debug, PartialEq, Eq)]
enum Packet {
    Raw(Vec<Pixel>),
    Run { pixel: Pixel, count: usize },
}

impl Packet {
    fn len(&self) -> usize {
        match self {
            Self::Raw(pixels) => pixels.len(),
            Self::Run { count, .. } => *count,
        }
    }

    /// Encoded size on the wire: control byte plus payload.
    fn wire_size(&self) -> u64 {
        match self {
            Self::Raw(pixels) => 1 + 3 * pixels.len() as u64,
            Self::Run { .. } => 1 + 3,
        }
    }

    fn write_to<W: Write>(
        &self,
        order: PixelOrder,
        sink: &mut SegmentWriter<W>,
    ) -> Result<(), CodecError> {
        match self {
            Self::Raw(pixels) => {
                sink.put(&[((pixels.len() - 1) & 0x7F) as u8])?;
                for &px in pixels {
                    sink.put(&order.write(px))?;
                }
                Ok(())
            }
            Self::Run { pixel, count } => {
                sink.put(&[((count - 1) | 0x80) as u8])?;
                sink.put(&order.write(*pixel))
            }
        }
    }
}

/// Split a row into packets with the greedy one-pixel lookahead.
///
/// A pixel that equals its successor closes any open raw packet and starts a
/// run; anything else extends the open packet or starts a raw one. Packets
/// close at 128 units.
fn packetize(row: &[Pixel]) -> Vec<Packet> {
    let mut packets = Vec::new();
    let mut open: Option<Packet> = None;

    for (i, &px) in row.iter().enumerate() {
        let next = row.get(i + 1).copied();

        if open.as_ref().is_some_and(|p| p.len() == MAX_PACKET) {
            packets.extend(open.take());
        }

        match &mut open {
            Some(Packet::Run { pixel, count }) => {
                if *pixel == px {
                    *count += 1;
                } else {
                    packets.extend(open.take());
                }
            }
            Some(Packet::Raw(pixels)) => {
                if next == Some(px) {
                    // px starts a run; close the literal packet without it
                    packets.extend(open.take());
                } else {
                    pixels.push(px);
                }
            }
            None => {}
        }

        if open.is_none() {
            open = Some(if next == Some(px) {
                Packet::Run { pixel: px, count: 1 }
            } else {
                Packet::Raw(vec![px])
            });
        }
    }

    packets.extend(open);
    packets
}

/// Encode one row as RLE packets.
pub(crate) fn encode_row<W: Write>(
    row: &[Pixel],
    order: PixelOrder,
    sink: &mut SegmentWriter<W>,
) -> Result<(), CodecError> {
    for packet in packetize(row) {
        packet.write_to(order, sink)?;
    }
    Ok(())
}

/// Exact RLE data-segment size for a whole image, without producing output.
pub(crate) fn encoded_size(image: &Image) -> u64 {
    image
        .rows()
        .map(|row| packetize(row).iter().map(Packet::wire_size).sum::<u64>())
        .sum()
}

/// Decode packets until the row holds `width` pixels, appending to `out`.
pub(crate) fn decode_row<R: Read>(
    src: &mut SegmentReader<R>,
    width: u16,
    order: PixelOrder,
    out: &mut Vec<Pixel>,
) -> Result<(), CodecError> {
    let mut remaining = usize::from(width);
    let mut buf = [0u8; 3];
    while remaining > 0 {
        let control = src.read_byte()?.ok_or(CodecError::UnexpectedEof)?;
        let count = usize::from(control & 0x7F) + 1;
        if count > remaining {
            return Err(CodecError::InvalidData(format!(
                "rle packet of {count} pixels overruns the row by {}",
                count - remaining
            )));
        }
        if control & 0x80 == 0 {
            for _ in 0..count {
                src.read_exact(&mut buf)?;
                out.push(order.read(buf));
            }
        } else {
            src.read_exact(&mut buf)?;
            let px = order.read(buf);
            out.extend(std::iter::repeat(px).take(count));
        }
        remaining -= count;
    }
    Ok(())
}
