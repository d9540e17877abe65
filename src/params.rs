//! Strongly typed parameter enumerations for the ADXL34x driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the register bitfields. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use adxl34x::params::{FifoMode, OutputDataRate, Range};
//!
//! let odr = OutputDataRate::Hz100;
//! let range = Range::G8;
//! let mode = FifoMode::Stream;
//! assert_eq!(odr.millihertz(), 100_000);
//! assert_eq!(range.max_g(), 8);
//! let _ = mode;
//! ```

use modular_bitfield::prelude::Specifier;

use crate::registers::{RANGE_MAX_G, RANGE_SCALE, RANGE_SHIFT};

/// Output data rate selections encoded in `BW_RATE.RATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum OutputDataRate {
    /// 0.10 Hz.
    Hz0_10 = 0x0,
    /// 0.20 Hz.
    Hz0_20 = 0x1,
    /// 0.39 Hz.
    Hz0_39 = 0x2,
    /// 0.78 Hz.
    Hz0_78 = 0x3,
    /// 1.56 Hz.
    Hz1_56 = 0x4,
    /// 3.13 Hz.
    Hz3_13 = 0x5,
    /// 6.25 Hz.
    Hz6_25 = 0x6,
    /// 12.5 Hz.
    Hz12_5 = 0x7,
    /// 25 Hz.
    Hz25 = 0x8,
    /// 50 Hz.
    Hz50 = 0x9,
    /// 100 Hz (power-on default).
    Hz100 = 0xA,
    /// 200 Hz.
    Hz200 = 0xB,
    /// 400 Hz.
    Hz400 = 0xC,
    /// 800 Hz.
    Hz800 = 0xD,
    /// 1600 Hz.
    Hz1600 = 0xE,
    /// 3200 Hz.
    Hz3200 = 0xF,
}

impl OutputDataRate {
    const ALL: [Self; 16] = [
        Self::Hz0_10,
        Self::Hz0_20,
        Self::Hz0_39,
        Self::Hz0_78,
        Self::Hz1_56,
        Self::Hz3_13,
        Self::Hz6_25,
        Self::Hz12_5,
        Self::Hz25,
        Self::Hz50,
        Self::Hz100,
        Self::Hz200,
        Self::Hz400,
        Self::Hz800,
        Self::Hz1600,
        Self::Hz3200,
    ];

    /// Returns the nominal output data rate in millihertz.
    pub const fn millihertz(self) -> u32 {
        // Every step halves the rate, starting from 3200 Hz at code 0xF.
        3_200_000 >> (15 - self as u32)
    }

    /// Selects the slowest rate that is at least `millihertz`, saturating at 3200 Hz.
    pub fn at_least(millihertz: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|rate| rate.millihertz() >= millihertz)
            .unwrap_or(Self::Hz3200)
    }
}

/// Measurement ranges encoded in `DATA_FORMAT.RANGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

impl Range {
    /// Decodes the two-bit range code, ignoring higher bits.
    pub const fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Self::G2,
            0b01 => Self::G4,
            0b10 => Self::G8,
            _ => Self::G16,
        }
    }

    /// Raw two-bit code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Sensitivity in units of 0.1 mg per LSB.
    pub const fn scale(self) -> u16 {
        RANGE_SCALE[self as usize]
    }

    /// Full-scale magnitude in g.
    pub const fn max_g(self) -> u8 {
        RANGE_MAX_G[self as usize]
    }

    /// Power-of-two exponent used by the fixed-point decoder output.
    pub const fn shift(self) -> i8 {
        RANGE_SHIFT[self as usize]
    }

    /// Smallest range that covers `g` (saturating at ±16 g).
    pub fn covering(g: u32) -> Self {
        [Self::G2, Self::G4, Self::G8, Self::G16]
            .into_iter()
            .find(|range| u32::from(range.max_g()) >= g)
            .unwrap_or(Self::G16)
    }
}

/// FIFO operating modes encoded in `FIFO_CTL.FIFO_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FifoMode {
    /// FIFO bypassed.
    Bypass = 0b00,
    /// Collects up to 32 samples, then stops.
    Fifo = 0b01,
    /// Holds the latest 32 samples, overwriting the oldest.
    Stream = 0b10,
    /// Holds samples around a trigger event.
    Trigger = 0b11,
}

/// Interrupt output selection, used by `INT_MAP` and `FIFO_CTL.TRIGGER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum IntLine {
    /// `INT1` pin.
    Int1 = 0,
    /// `INT2` pin.
    Int2 = 1,
}

/// Frequency of readings while in sleep mode (`POWER_CTL.WAKEUP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum WakeupRate {
    /// 8 Hz.
    Hz8 = 0b00,
    /// 4 Hz.
    Hz4 = 0b01,
    /// 2 Hz.
    Hz2 = 0b10,
    /// 1 Hz.
    Hz1 = 0b11,
}

/// Coupling used by the activity/inactivity detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Coupling {
    /// Compare against the absolute threshold.
    Dc = 0,
    /// Compare against the reference sampled when detection started.
    Ac = 1,
}

/// Two-dimensional orientation codes reported in `ORIENT[5:4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Orientation2d {
    /// Positive X axis points up.
    PositiveX = 0b00,
    /// Negative X axis points up.
    NegativeX = 0b01,
    /// Positive Y axis points up.
    PositiveY = 0b10,
    /// Negative Y axis points up.
    NegativeY = 0b11,
}
