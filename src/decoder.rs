//! Decoding of encoded FIFO buffers into physical units.
//!
//! Everything here is a pure function of the buffer, so decoding may happen long after
//! capture and outside the driver's execution context. The output representation is picked
//! at compile time through the [`DecodeSink`] type parameter:
//!
//! - [`Q31Frames`]: fixed point with a shared shift and base header,
//! - [`ValueFrames`]: a flat slice of integer/micro [`SensorValue`] pairs,
//! - [`F64Frames`]: double precision with a shared base header.
//!
//! ```rust
//! use adxl34x::decoder::{decode, Q31Frames, Q31Reading};
//! use adxl34x::fifo::{EncodedHeader, HEADER_LEN};
//! use adxl34x::params::Range;
//! use adxl34x::sensor::{ChannelSpec, SensorChannel};
//!
//! let mut buf = [0u8; HEADER_LEN + 6];
//! let header = EncodedHeader { timestamp_ns: 0, range: Range::G2, entries: 1, trigger: 0 };
//! header.write_to(&mut buf).unwrap();
//!
//! let mut readings = [Q31Reading::default(); 4];
//! let mut frames = Q31Frames::new(&mut readings);
//! let chan = ChannelSpec::new(SensorChannel::AccelXyz);
//! assert_eq!(decode(&buf, chan, 4, &mut frames), Ok(1));
//! assert_eq!(frames.header.shift, 5);
//! ```

use core::convert::Infallible;
use core::mem::size_of;

use crate::error::{Error, Result};
use crate::fifo::{self, EncodedHeader};
use crate::params::Range;
use crate::sensor::{ChannelSpec, SensorChannel, SensorValue, TriggerKind};
use crate::trigger::source_matches;

/// Result of the bus-free decoder operations.
pub type DecodeResult<T> = Result<T, Infallible>;

/// Standard gravity in µm/s² per g.
const UMS2_PER_G: i64 = 9_806_650;
/// Standard gravity in m/s² per g.
const MS2_PER_G: f64 = 9.806_65;

/// Converts one raw reading to µm/s² using the range sensitivity table.
pub fn micro_ms2(raw: i16, range: Range) -> i64 {
    i64::from(raw) * i64::from(range.scale()) * UMS2_PER_G / 10_000
}

/// Converts one raw reading to m/s².
pub fn ms2(raw: i16, range: Range) -> f64 {
    f64::from(raw) * f64::from(range.scale()) / 10_000.0 * MS2_PER_G
}

/// Converts one raw reading to Q31 with the range's shift.
pub fn q31(raw: i16, range: Range) -> i32 {
    let micro = i128::from(micro_ms2(raw, range));
    let scaled = (micro << (31 - i32::from(range.shift()))) / 1_000_000;
    scaled.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32
}

/// Output buffer sizing for a decode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SizeInfo {
    /// Bytes for the base structure holding the first frame.
    pub base_size: usize,
    /// Bytes for every further frame.
    pub frame_size: usize,
}

/// Destination of decoded frames.
pub trait DecodeSink {
    /// Memory footprint of this representation for `channel`.
    fn size_info(channel: SensorChannel) -> SizeInfo;

    /// How many frames fit.
    fn capacity(&self, channel: SensorChannel) -> usize;

    /// Called once before the first frame.
    fn start(&mut self, header: &EncodedHeader, channel: SensorChannel);

    /// Stores frame `index`.
    fn put(&mut self, index: usize, channel: SensorChannel, raw: [i16; 3], range: Range);

    /// Called once with the number of frames stored.
    fn finish(&mut self, _count: usize) {}
}

/// Base header shared by the multi-frame representations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameHeader {
    /// Capture time of the first frame.
    pub base_timestamp_ns: u64,
    /// Frames decoded.
    pub reading_count: u16,
    /// Q31 exponent; unused by [`F64Frames`].
    pub shift: i8,
}

/// Fixed-point reading: `value = q31 * 2^shift / 2^31` m/s².
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Q31Reading {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Fixed-point output.
#[derive(Debug)]
pub struct Q31Frames<'a> {
    pub header: FrameHeader,
    pub readings: &'a mut [Q31Reading],
}

impl<'a> Q31Frames<'a> {
    pub fn new(readings: &'a mut [Q31Reading]) -> Self {
        Self {
            header: FrameHeader::default(),
            readings,
        }
    }
}

impl DecodeSink for Q31Frames<'_> {
    fn size_info(_channel: SensorChannel) -> SizeInfo {
        SizeInfo {
            base_size: size_of::<FrameHeader>() + size_of::<Q31Reading>(),
            frame_size: size_of::<Q31Reading>(),
        }
    }

    fn capacity(&self, _channel: SensorChannel) -> usize {
        self.readings.len()
    }

    fn start(&mut self, header: &EncodedHeader, _channel: SensorChannel) {
        self.header = FrameHeader {
            base_timestamp_ns: header.timestamp_ns,
            reading_count: 0,
            shift: header.range.shift(),
        };
    }

    fn put(&mut self, index: usize, _channel: SensorChannel, raw: [i16; 3], range: Range) {
        self.readings[index] = Q31Reading {
            x: q31(raw[0], range),
            y: q31(raw[1], range),
            z: q31(raw[2], range),
        };
    }

    fn finish(&mut self, count: usize) {
        self.header.reading_count = count as u16;
    }
}

/// Flat output: one value per frame for a single axis, three for `AccelXyz`.
#[derive(Debug)]
pub struct ValueFrames<'a> {
    pub values: &'a mut [SensorValue],
}

impl<'a> ValueFrames<'a> {
    pub fn new(values: &'a mut [SensorValue]) -> Self {
        Self { values }
    }

    const fn per_frame(channel: SensorChannel) -> usize {
        match channel {
            SensorChannel::AccelXyz => 3,
            _ => 1,
        }
    }
}

impl DecodeSink for ValueFrames<'_> {
    fn size_info(channel: SensorChannel) -> SizeInfo {
        let frame_size = Self::per_frame(channel) * size_of::<SensorValue>();
        SizeInfo {
            base_size: frame_size,
            frame_size,
        }
    }

    fn capacity(&self, channel: SensorChannel) -> usize {
        self.values.len() / Self::per_frame(channel)
    }

    fn start(&mut self, _header: &EncodedHeader, _channel: SensorChannel) {}

    fn put(&mut self, index: usize, channel: SensorChannel, raw: [i16; 3], range: Range) {
        let value = |axis: usize| SensorValue::from_micro(micro_ms2(raw[axis], range));
        match channel {
            SensorChannel::AccelX => self.values[index] = value(0),
            SensorChannel::AccelY => self.values[index] = value(1),
            SensorChannel::AccelZ => self.values[index] = value(2),
            _ => {
                let base = index * 3;
                self.values[base] = value(0);
                self.values[base + 1] = value(1);
                self.values[base + 2] = value(2);
            }
        }
    }
}

/// Double-precision reading in m/s².
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct F64Reading {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Double-precision output.
#[derive(Debug)]
pub struct F64Frames<'a> {
    pub header: FrameHeader,
    pub readings: &'a mut [F64Reading],
}

impl<'a> F64Frames<'a> {
    pub fn new(readings: &'a mut [F64Reading]) -> Self {
        Self {
            header: FrameHeader::default(),
            readings,
        }
    }
}

impl DecodeSink for F64Frames<'_> {
    fn size_info(_channel: SensorChannel) -> SizeInfo {
        SizeInfo {
            base_size: size_of::<FrameHeader>() + size_of::<F64Reading>(),
            frame_size: size_of::<F64Reading>(),
        }
    }

    fn capacity(&self, _channel: SensorChannel) -> usize {
        self.readings.len()
    }

    fn start(&mut self, header: &EncodedHeader, _channel: SensorChannel) {
        self.header = FrameHeader {
            base_timestamp_ns: header.timestamp_ns,
            reading_count: 0,
            shift: 0,
        };
    }

    fn put(&mut self, index: usize, _channel: SensorChannel, raw: [i16; 3], range: Range) {
        self.readings[index] = F64Reading {
            x: ms2(raw[0], range),
            y: ms2(raw[1], range),
            z: ms2(raw[2], range),
        };
    }

    fn finish(&mut self, count: usize) {
        self.header.reading_count = count as u16;
    }
}

fn parse(buf: &[u8]) -> DecodeResult<EncodedHeader> {
    EncodedHeader::read_from(buf).ok_or(Error::NoData)
}

/// Number of frames `buf` holds for `channel`.
pub fn get_frame_count(buf: &[u8], channel: ChannelSpec) -> DecodeResult<u8> {
    if channel.index != 0 || !channel.channel.is_accel() {
        return Err(Error::NotSupported);
    }
    let header = parse(buf)?;
    if header.entries == 0 {
        return Err(Error::NotSupported);
    }
    Ok(header.entries)
}

/// Output sizing of sink `S`; independent of any buffer.
pub fn get_size_info<S: DecodeSink>(channel: SensorChannel) -> SizeInfo {
    S::size_info(channel)
}

/// Decodes up to `max_count` frames of `buf` into `out`.
///
/// Returns the number of frames written, which is also bounded by the sink's capacity
/// and by the frames actually present in `buf`.
pub fn decode<S: DecodeSink>(
    buf: &[u8],
    channel: ChannelSpec,
    max_count: usize,
    out: &mut S,
) -> DecodeResult<usize> {
    let entries = usize::from(get_frame_count(buf, channel)?);
    let header = parse(buf)?;
    let limit = entries.min(max_count).min(out.capacity(channel.channel));

    out.start(&header, channel.channel);
    let mut count = 0;
    while count < limit {
        let Some(raw) = fifo::frame(buf, count) else {
            break;
        };
        out.put(count, channel.channel, raw, header.range);
        count += 1;
    }
    out.finish(count);
    Ok(count)
}

/// Whether the interrupt snapshot stored in `buf` reports `kind`.
pub fn has_trigger(buf: &[u8], kind: TriggerKind) -> bool {
    EncodedHeader::read_from(buf).is_some_and(|header| source_matches(header.int_source(), kind))
}
