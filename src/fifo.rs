//! FIFO access and the encoded streaming buffer layout.
//!
//! A streaming buffer starts with a fixed [`EncodedHeader`] followed by `entries` raw
//! frames, each frame being the six `DATAX0..DATAZ1` bytes exactly as the device sends
//! them (little-endian `i16` per axis):
//!
//! | offset | size | content                                      |
//! |--------|------|----------------------------------------------|
//! | 0      | 8    | timestamp in ns, little-endian               |
//! | 8      | 1    | range code (bits 1:0), entries (bits 7:2)    |
//! | 9      | 1    | `INT_SOURCE` byte that produced the buffer   |
//! | 10     | 6·n  | frames                                       |

use crate::device::Adxl34x;
use crate::error::Result;
use crate::interface::Adxl34xInterface;
use crate::params::Range;
use crate::registers::{IntSource, FRAME_LEN, MAX_FIFO_SIZE, REG_DATAX0};

/// Size of the encoded header in bytes.
pub const HEADER_LEN: usize = 10;

/// Bytes needed to encode `entries` frames.
pub const fn encoded_size(entries: usize) -> usize {
    HEADER_LEN + entries * FRAME_LEN
}

/// Metadata stored in front of the frames of an encoded buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodedHeader {
    /// Acquisition time in nanoseconds.
    pub timestamp_ns: u64,
    /// Range active when the frames were sampled.
    pub range: Range,
    /// Number of frames following the header (at most 63).
    pub entries: u8,
    /// Raw `INT_SOURCE` byte that produced the buffer; `0` for one-shot reads.
    pub trigger: u8,
}

impl EncodedHeader {
    /// Serializes the header into the first [`HEADER_LEN`] bytes of `buf`.
    ///
    /// Returns `None` when `buf` is too short.
    pub fn write_to(&self, buf: &mut [u8]) -> Option<()> {
        let header = buf.get_mut(..HEADER_LEN)?;
        header[..8].copy_from_slice(&self.timestamp_ns.to_le_bytes());
        header[8] = self.range.code() | (self.entries << 2);
        header[9] = self.trigger;
        Some(())
    }

    /// Parses the header at the start of `buf`.
    pub fn read_from(buf: &[u8]) -> Option<Self> {
        let header = buf.get(..HEADER_LEN)?;
        let mut timestamp = [0u8; 8];
        timestamp.copy_from_slice(&header[..8]);
        Some(Self {
            timestamp_ns: u64::from_le_bytes(timestamp),
            range: Range::from_code(header[8]),
            entries: header[8] >> 2,
            trigger: header[9],
        })
    }

    /// The trigger byte as an interrupt-source bitfield.
    pub fn int_source(&self) -> IntSource {
        IntSource::from(self.trigger)
    }
}

/// Returns frame `index` of an encoded buffer, if present.
pub fn frame(buf: &[u8], index: usize) -> Option<[i16; 3]> {
    let start = encoded_size(index);
    let raw = buf.get(start..start + FRAME_LEN)?;
    Some(crate::device::unpack_frame(raw))
}

impl<IFACE, PIN, CommE> Adxl34x<IFACE, PIN>
where
    IFACE: Adxl34xInterface<Error = CommE>,
{
    /// Pops one frame from the FIFO into `frame`.
    pub fn read_frame(&mut self, frame: &mut [u8; FRAME_LEN]) -> Result<(), CommE> {
        self.interface.read_many(REG_DATAX0, frame)?;
        Ok(())
    }

    /// Drains the FIFO by popping [`MAX_FIFO_SIZE`] frames and discarding them.
    pub fn flush_fifo(&mut self) -> Result<(), CommE> {
        let mut scratch = [0u8; FRAME_LEN];
        for _ in 0..MAX_FIFO_SIZE {
            self.read_frame(&mut scratch)?;
        }
        trace!("fifo flushed");
        Ok(())
    }
}
