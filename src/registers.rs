//! Register map definitions for the ADXL343/ADXL344/ADXL345/ADXL346 accelerometers.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{Coupling, FifoMode, IntLine, Orientation2d, OutputDataRate, Range, WakeupRate};

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// Register address of `THRESH_TAP`.
pub const REG_THRESH_TAP: u8 = 0x1D;
/// Register address of `OFSX`.
pub const REG_OFSX: u8 = 0x1E;
/// Register address of `OFSY`.
pub const REG_OFSY: u8 = 0x1F;
/// Register address of `OFSZ`.
pub const REG_OFSZ: u8 = 0x20;
/// Register address of `DUR`.
pub const REG_DUR: u8 = 0x21;
/// Register address of `LATENT`.
pub const REG_LATENT: u8 = 0x22;
/// Register address of `WINDOW`.
pub const REG_WINDOW: u8 = 0x23;
/// Register address of `THRESH_ACT`.
pub const REG_THRESH_ACT: u8 = 0x24;
/// Register address of `THRESH_INACT`.
pub const REG_THRESH_INACT: u8 = 0x25;
/// Register address of `TIME_INACT`.
pub const REG_TIME_INACT: u8 = 0x26;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `THRESH_FF`.
pub const REG_THRESH_FF: u8 = 0x28;
/// Register address of `TIME_FF`.
pub const REG_TIME_FF: u8 = 0x29;
/// Register address of `TAP_AXES`.
pub const REG_TAP_AXES: u8 = 0x2A;
/// Register address of `ACT_TAP_STATUS`.
pub const REG_ACT_TAP_STATUS: u8 = 0x2B;
/// Register address of `BW_RATE`.
pub const REG_BW_RATE: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `INT_MAP`.
pub const REG_INT_MAP: u8 = 0x2F;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x30;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0`, the first of six output data registers.
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `FIFO_CTL`.
pub const REG_FIFO_CTL: u8 = 0x38;
/// Register address of `FIFO_STATUS`.
pub const REG_FIFO_STATUS: u8 = 0x39;
/// Register address of `TAP_SIGN` (ADXL344/ADXL346 only).
pub const REG_TAP_SIGN: u8 = 0x3A;
/// Register address of `ORIENT_CONF` (ADXL344/ADXL346 only).
pub const REG_ORIENT_CONF: u8 = 0x3B;
/// Register address of `ORIENT` (ADXL344/ADXL346 only).
pub const REG_ORIENT: u8 = 0x3C;

/// `DEVID` of the ADXL343.
pub const ADXL343_DEVID: u8 = 0xE5;
/// `DEVID` of the ADXL344.
pub const ADXL344_DEVID: u8 = 0xE6;
/// `DEVID` of the ADXL345.
pub const ADXL345_DEVID: u8 = 0xE5;
/// `DEVID` of the ADXL346.
pub const ADXL346_DEVID: u8 = 0xE6;

/// Depth of the hardware FIFO in samples.
pub const MAX_FIFO_SIZE: u8 = 32;
/// Largest value accepted by `FIFO_CTL.SAMPLES`.
pub const MAX_FIFO_SAMPLES: u8 = 31;
/// Bytes per X/Y/Z frame read from `DATAX0..DATAZ1`.
pub const FRAME_LEN: usize = 6;

/// Sensitivity per range code, in units of 0.1 mg/LSB.
pub const RANGE_SCALE: [u16; 4] = [39, 78, 156, 312];
/// Full-scale magnitude per range code, in g.
pub const RANGE_MAX_G: [u8; 4] = [2, 4, 8, 16];
/// Fixed-point exponent per range code; `2^shift` m/s² bounds the full scale.
pub const RANGE_SHIFT: [i8; 4] = [5, 6, 7, 8];

/// Field masks, as documented in the datasheet register descriptions.
pub mod mask {
    /// `ACT_INACT_CTL` activity coupling.
    pub const ACT_INACT_CTL_ACT_ACDC: u8 = 1 << 7;
    /// `ACT_INACT_CTL` activity X enable.
    pub const ACT_INACT_CTL_ACT_X_ENABLE: u8 = 1 << 6;
    /// `ACT_INACT_CTL` activity Y enable.
    pub const ACT_INACT_CTL_ACT_Y_ENABLE: u8 = 1 << 5;
    /// `ACT_INACT_CTL` activity Z enable.
    pub const ACT_INACT_CTL_ACT_Z_ENABLE: u8 = 1 << 4;
    /// `ACT_INACT_CTL` inactivity coupling.
    pub const ACT_INACT_CTL_INACT_ACDC: u8 = 1 << 3;
    /// `ACT_INACT_CTL` inactivity X enable.
    pub const ACT_INACT_CTL_INACT_X_ENABLE: u8 = 1 << 2;
    /// `ACT_INACT_CTL` inactivity Y enable.
    pub const ACT_INACT_CTL_INACT_Y_ENABLE: u8 = 1 << 1;
    /// `ACT_INACT_CTL` inactivity Z enable.
    pub const ACT_INACT_CTL_INACT_Z_ENABLE: u8 = 1 << 0;

    /// `TAP_AXES` improved tap detection (ADXL344/ADXL346).
    pub const TAP_AXES_IMPROVED_TAP: u8 = 1 << 4;
    /// `TAP_AXES` suppress double tap.
    pub const TAP_AXES_SUPPRESS: u8 = 1 << 3;
    /// `TAP_AXES` tap X enable.
    pub const TAP_AXES_TAP_X_ENABLE: u8 = 1 << 2;
    /// `TAP_AXES` tap Y enable.
    pub const TAP_AXES_TAP_Y_ENABLE: u8 = 1 << 1;
    /// `TAP_AXES` tap Z enable.
    pub const TAP_AXES_TAP_Z_ENABLE: u8 = 1 << 0;

    /// `ACT_TAP_STATUS` activity X source.
    pub const ACT_TAP_STATUS_ACT_X_SOURCE: u8 = 1 << 6;
    /// `ACT_TAP_STATUS` activity Y source.
    pub const ACT_TAP_STATUS_ACT_Y_SOURCE: u8 = 1 << 5;
    /// `ACT_TAP_STATUS` activity Z source.
    pub const ACT_TAP_STATUS_ACT_Z_SOURCE: u8 = 1 << 4;
    /// `ACT_TAP_STATUS` asleep.
    pub const ACT_TAP_STATUS_ASLEEP: u8 = 1 << 3;
    /// `ACT_TAP_STATUS` tap X source.
    pub const ACT_TAP_STATUS_TAP_X_SOURCE: u8 = 1 << 2;
    /// `ACT_TAP_STATUS` tap Y source.
    pub const ACT_TAP_STATUS_TAP_Y_SOURCE: u8 = 1 << 1;
    /// `ACT_TAP_STATUS` tap Z source.
    pub const ACT_TAP_STATUS_TAP_Z_SOURCE: u8 = 1 << 0;

    /// `BW_RATE` low power.
    pub const BW_RATE_LOW_POWER: u8 = 1 << 4;
    /// `BW_RATE` rate code.
    pub const BW_RATE_RATE: u8 = 0x0F;

    /// `POWER_CTL` link.
    pub const POWER_CTL_LINK: u8 = 1 << 5;
    /// `POWER_CTL` auto sleep.
    pub const POWER_CTL_AUTO_SLEEP: u8 = 1 << 4;
    /// `POWER_CTL` measure.
    pub const POWER_CTL_MEASURE: u8 = 1 << 3;
    /// `POWER_CTL` sleep.
    pub const POWER_CTL_SLEEP: u8 = 1 << 2;
    /// `POWER_CTL` wakeup rate.
    pub const POWER_CTL_WAKEUP: u8 = 0x03;

    /// `INT_ENABLE`/`INT_MAP`/`INT_SOURCE` data ready.
    pub const INT_DATA_READY: u8 = 1 << 7;
    /// `INT_ENABLE`/`INT_MAP`/`INT_SOURCE` single tap.
    pub const INT_SINGLE_TAP: u8 = 1 << 6;
    /// `INT_ENABLE`/`INT_MAP`/`INT_SOURCE` double tap.
    pub const INT_DOUBLE_TAP: u8 = 1 << 5;
    /// `INT_ENABLE`/`INT_MAP`/`INT_SOURCE` activity.
    pub const INT_ACTIVITY: u8 = 1 << 4;
    /// `INT_ENABLE`/`INT_MAP`/`INT_SOURCE` inactivity.
    pub const INT_INACTIVITY: u8 = 1 << 3;
    /// `INT_ENABLE`/`INT_MAP`/`INT_SOURCE` free fall.
    pub const INT_FREE_FALL: u8 = 1 << 2;
    /// `INT_ENABLE`/`INT_MAP`/`INT_SOURCE` watermark.
    pub const INT_WATERMARK: u8 = 1 << 1;
    /// `INT_ENABLE`/`INT_MAP`/`INT_SOURCE` overrun.
    pub const INT_OVERRUN: u8 = 1 << 0;

    /// `DATA_FORMAT` self test.
    pub const DATA_FORMAT_SELF_TEST: u8 = 1 << 7;
    /// `DATA_FORMAT` 3-wire SPI.
    pub const DATA_FORMAT_SPI: u8 = 1 << 6;
    /// `DATA_FORMAT` active-low interrupts.
    pub const DATA_FORMAT_INT_INVERT: u8 = 1 << 5;
    /// `DATA_FORMAT` full resolution.
    pub const DATA_FORMAT_FULL_RES: u8 = 1 << 3;
    /// `DATA_FORMAT` left justify.
    pub const DATA_FORMAT_JUSTIFY: u8 = 1 << 2;
    /// `DATA_FORMAT` range code.
    pub const DATA_FORMAT_RANGE: u8 = 0x03;

    /// `FIFO_CTL` mode.
    pub const FIFO_CTL_FIFO_MODE: u8 = 0xC0;
    /// `FIFO_CTL` trigger line.
    pub const FIFO_CTL_TRIGGER: u8 = 1 << 5;
    /// `FIFO_CTL` samples.
    pub const FIFO_CTL_SAMPLES: u8 = 0x1F;

    /// `FIFO_STATUS` trigger occurred.
    pub const FIFO_STATUS_FIFO_TRIG: u8 = 1 << 7;
    /// `FIFO_STATUS` entries.
    pub const FIFO_STATUS_ENTRIES: u8 = 0x3F;

    /// `TAP_SIGN` X sign.
    pub const TAP_SIGN_XSIGN: u8 = 1 << 6;
    /// `TAP_SIGN` Y sign.
    pub const TAP_SIGN_YSIGN: u8 = 1 << 5;
    /// `TAP_SIGN` Z sign.
    pub const TAP_SIGN_ZSIGN: u8 = 1 << 4;
    /// `TAP_SIGN` X first tap.
    pub const TAP_SIGN_XTAP: u8 = 1 << 2;
    /// `TAP_SIGN` Y first tap.
    pub const TAP_SIGN_YTAP: u8 = 1 << 1;
    /// `TAP_SIGN` Z first tap.
    pub const TAP_SIGN_ZTAP: u8 = 1 << 0;

    /// `ORIENT_CONF` orientation interrupt enable.
    pub const ORIENT_CONF_INT_ORIENT: u8 = 1 << 7;
    /// `ORIENT_CONF` dead zone.
    pub const ORIENT_CONF_DEAD_ZONE: u8 = 0x70;
    /// `ORIENT_CONF` 3D interrupt.
    pub const ORIENT_CONF_INT_3D: u8 = 1 << 3;
    /// `ORIENT_CONF` divisor.
    pub const ORIENT_CONF_DIVISOR: u8 = 0x07;

    /// `ORIENT` 2D valid.
    pub const ORIENT_V2: u8 = 1 << 6;
    /// `ORIENT` 2D orientation.
    pub const ORIENT_2D_ORIENT: u8 = 0x30;
    /// `ORIENT` 3D valid.
    pub const ORIENT_V3: u8 = 1 << 3;
    /// `ORIENT` 3D orientation.
    pub const ORIENT_3D_ORIENT: u8 = 0x07;
}

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register: Copy + PartialEq + From<u8> + Into<u8> {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Reset/default value defined by the datasheet.
    const RESET_VALUE: u8;
    /// Bits carrying fields; reserved bits are dropped on decode.
    const FIELD_MASK: u8 = 0xFF;

    /// Decodes a raw register value, clearing reserved bits.
    fn decode(raw: u8) -> Self {
        Self::from(raw & Self::FIELD_MASK)
    }

    /// Encodes the register value for a bus write.
    fn encode(self) -> u8 {
        self.into()
    }
}

/// Which of the two silicon families answered the `DEVID` probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceFamily {
    /// ADXL343 or ADXL345 (`DEVID = 0xE5`).
    Adxl345,
    /// ADXL344 or ADXL346 (`DEVID = 0xE6`), with tap-sign and orientation registers.
    Adxl346,
}

impl DeviceFamily {
    /// Maps a `DEVID` value to its family.
    pub const fn from_devid(devid: u8) -> Option<Self> {
        match devid {
            ADXL345_DEVID => Some(Self::Adxl345),
            ADXL346_DEVID => Some(Self::Adxl346),
            _ => None,
        }
    }

    /// Returns `true` when `TAP_SIGN`, `ORIENT_CONF` and `ORIENT` exist.
    pub const fn has_extended_registers(self) -> bool {
        matches!(self, Self::Adxl346)
    }
}

macro_rules! byte_register {
    ($(#[$meta:meta])* $name:ident($inner:ty) @ $address:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name(pub $inner);

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                Self(value as $inner)
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.0 as u8
            }
        }

        impl Register for $name {
            const ADDRESS: u8 = $address;
            const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
            const RESET_VALUE: u8 = 0x00;
        }
    };
}

byte_register!(
    /// Tap threshold, 62.5 mg/LSB (`THRESH_TAP`).
    ThreshTap(u8) @ REG_THRESH_TAP
);
byte_register!(
    /// X-axis offset, two's complement, 15.6 mg/LSB (`OFSX`).
    OffsetX(i8) @ REG_OFSX
);
byte_register!(
    /// Y-axis offset, two's complement, 15.6 mg/LSB (`OFSY`).
    OffsetY(i8) @ REG_OFSY
);
byte_register!(
    /// Z-axis offset, two's complement, 15.6 mg/LSB (`OFSZ`).
    OffsetZ(i8) @ REG_OFSZ
);
byte_register!(
    /// Maximum tap duration, 625 µs/LSB (`DUR`).
    TapDuration(u8) @ REG_DUR
);
byte_register!(
    /// Wait between tap and double-tap window, 1.25 ms/LSB (`LATENT`).
    TapLatency(u8) @ REG_LATENT
);
byte_register!(
    /// Double-tap window, 1.25 ms/LSB (`WINDOW`).
    TapWindow(u8) @ REG_WINDOW
);
byte_register!(
    /// Activity threshold, 62.5 mg/LSB (`THRESH_ACT`).
    ThreshAct(u8) @ REG_THRESH_ACT
);
byte_register!(
    /// Inactivity threshold, 62.5 mg/LSB (`THRESH_INACT`).
    ThreshInact(u8) @ REG_THRESH_INACT
);
byte_register!(
    /// Inactivity time, 1 s/LSB (`TIME_INACT`).
    TimeInact(u8) @ REG_TIME_INACT
);
byte_register!(
    /// Free-fall threshold, 62.5 mg/LSB (`THRESH_FF`).
    ThreshFreeFall(u8) @ REG_THRESH_FF
);
byte_register!(
    /// Free-fall time, 5 ms/LSB (`TIME_FF`).
    TimeFreeFall(u8) @ REG_TIME_FF
);

macro_rules! bitfield_conversions {
    ($name:ident) => {
        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.into_bytes()[0]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Bitfield representation of the `ACT_INACT_CTL` register (address `0x27`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActInactCtl {
    // Inactivity Z participation (bit 0).
    pub inact_z_enable: bool,
    // Inactivity Y participation (bit 1).
    pub inact_y_enable: bool,
    // Inactivity X participation (bit 2).
    pub inact_x_enable: bool,
    // Inactivity ac/dc coupling (bit 3).
    pub inact_coupling: Coupling,
    // Activity Z participation (bit 4).
    pub act_z_enable: bool,
    // Activity Y participation (bit 5).
    pub act_y_enable: bool,
    // Activity X participation (bit 6).
    pub act_x_enable: bool,
    // Activity ac/dc coupling (bit 7).
    pub act_coupling: Coupling,
}

bitfield_conversions!(ActInactCtl);

/// Bitfield representation of the `TAP_AXES` register (address `0x2A`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapAxes {
    pub tap_z_enable: bool,
    pub tap_y_enable: bool,
    pub tap_x_enable: bool,
    // Suppress double tap when acceleration exceeds the threshold between taps (bit 3).
    pub suppress: bool,
    // Improved tap detection, ADXL344/ADXL346 (bit 4).
    pub improved_tap: bool,
    #[skip]
    __: B3,
}

bitfield_conversions!(TapAxes);

/// Bitfield representation of the `ACT_TAP_STATUS` register (address `0x2B`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActTapStatus {
    pub tap_z_source: bool,
    pub tap_y_source: bool,
    pub tap_x_source: bool,
    pub asleep: bool,
    pub act_z_source: bool,
    pub act_y_source: bool,
    pub act_x_source: bool,
    #[skip]
    __: B1,
}

bitfield_conversions!(ActTapStatus);

/// Bitfield representation of the `BW_RATE` register (address `0x2C`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwRate {
    // Output data rate (bits 3:0).
    pub rate: OutputDataRate,
    // Reduced power operation (bit 4).
    pub low_power: bool,
    #[skip]
    __: B3,
}

bitfield_conversions!(BwRate);

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerCtl {
    // Sampling rate while asleep (bits 1:0).
    pub wakeup: WakeupRate,
    pub sleep: bool,
    // Measurement mode; standby when cleared (bit 3).
    pub measure: bool,
    pub auto_sleep: bool,
    // Serial linking of activity and inactivity (bit 5).
    pub link: bool,
    #[skip]
    __: B2,
}

bitfield_conversions!(PowerCtl);

macro_rules! interrupt_register {
    ($(#[$meta:meta])* $name:ident @ $address:expr, $access:expr) => {
        $(#[$meta])*
        #[bitfield]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            pub overrun: bool,
            pub watermark: bool,
            pub free_fall: bool,
            pub inactivity: bool,
            pub activity: bool,
            pub double_tap: bool,
            pub single_tap: bool,
            pub data_ready: bool,
        }

        bitfield_conversions!($name);

        impl Register for $name {
            const ADDRESS: u8 = $address;
            const ACCESS: RegisterAccess = $access;
            const RESET_VALUE: u8 = 0x00;
        }
    };
}

interrupt_register!(
    /// Bitfield representation of the `INT_ENABLE` register (address `0x2E`).
    IntEnable @ REG_INT_ENABLE, RegisterAccess::ReadWrite
);
interrupt_register!(
    /// Bitfield representation of the `INT_MAP` register (address `0x2F`).
    ///
    /// A cleared bit routes the source to `INT1`, a set bit to `INT2`.
    IntMap @ REG_INT_MAP, RegisterAccess::ReadWrite
);
interrupt_register!(
    /// Bitfield representation of the `INT_SOURCE` register (address `0x30`).
    ///
    /// Reading the register clears the latched event bits.
    IntSource @ REG_INT_SOURCE, RegisterAccess::ReadOnly
);

impl IntMap {
    /// Routes every source to the given line.
    pub fn all_to(line: IntLine) -> Self {
        match line {
            IntLine::Int1 => Self::from(0x00),
            IntLine::Int2 => Self::from(0xFF),
        }
    }
}

impl IntSource {
    /// Data ready, watermark or overrun fired.
    pub fn any_data(self) -> bool {
        self.data_ready() || self.watermark() || self.overrun()
    }

    /// Any of the motion-like sources fired.
    pub fn any_motion(self) -> bool {
        self.single_tap()
            || self.double_tap()
            || self.free_fall()
            || self.activity()
            || self.inactivity()
    }
}

/// Bitfield representation of the `DATA_FORMAT` register (address `0x31`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // Measurement range (bits 1:0).
    pub range: Range,
    // Left-justified (MSB) output when set (bit 2).
    pub justify: bool,
    // Full resolution, 4 mg/LSB at every range (bit 3).
    pub full_res: bool,
    #[skip]
    __: B1,
    // Interrupts active low (bit 5).
    pub int_invert: bool,
    // 3-wire SPI (bit 6).
    pub spi: bool,
    pub self_test: bool,
}

bitfield_conversions!(DataFormat);

/// Bitfield representation of the `FIFO_CTL` register (address `0x38`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoCtl {
    // Watermark / trigger sample count (bits 4:0).
    pub samples: B5,
    // Line whose event triggers trigger mode (bit 5).
    pub trigger: IntLine,
    // FIFO mode (bits 7:6).
    pub mode: FifoMode,
}

bitfield_conversions!(FifoCtl);

/// Bitfield representation of the `FIFO_STATUS` register (address `0x39`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoStatus {
    // Number of samples stored in the FIFO (bits 5:0).
    pub entries: B6,
    #[skip]
    __: B1,
    // A trigger event occurred (bit 7).
    pub fifo_trig: bool,
}

bitfield_conversions!(FifoStatus);

/// Bitfield representation of the `TAP_SIGN` register (address `0x3A`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapSign {
    pub ztap: bool,
    pub ytap: bool,
    pub xtap: bool,
    #[skip]
    __: B1,
    pub zsign: bool,
    pub ysign: bool,
    pub xsign: bool,
    #[skip]
    __: B1,
}

bitfield_conversions!(TapSign);

/// Bitfield representation of the `ORIENT_CONF` register (address `0x3B`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientConf {
    // Averaging filter divisor (bits 2:0).
    pub divisor: B3,
    // 3D orientation interrupt when set, 2D otherwise (bit 3).
    pub int_3d: bool,
    // Dead zone angle code (bits 6:4).
    pub dead_zone: B3,
    pub int_orient: bool,
}

bitfield_conversions!(OrientConf);

/// Bitfield representation of the `ORIENT` register (address `0x3C`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orient {
    // 3D orientation code (bits 2:0).
    pub orient_3d: B3,
    pub v3: bool,
    pub orient_2d: Orientation2d,
    pub v2: bool,
    #[skip]
    __: B1,
}

bitfield_conversions!(Orient);

impl Register for ActInactCtl {
    const ADDRESS: u8 = REG_ACT_INACT_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: u8 = 0x00;
}

impl Register for TapAxes {
    const ADDRESS: u8 = REG_TAP_AXES;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: u8 = 0x00;
    const FIELD_MASK: u8 = 0x1F;
}

impl Register for ActTapStatus {
    const ADDRESS: u8 = REG_ACT_TAP_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: u8 = 0x00;
    const FIELD_MASK: u8 = 0x7F;
}

impl Register for BwRate {
    const ADDRESS: u8 = REG_BW_RATE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: u8 = 0x0A;
    const FIELD_MASK: u8 = 0x1F;
}

impl Register for PowerCtl {
    const ADDRESS: u8 = REG_POWER_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: u8 = 0x00;
    const FIELD_MASK: u8 = 0x3F;
}

impl Register for DataFormat {
    const ADDRESS: u8 = REG_DATA_FORMAT;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: u8 = 0x00;
    const FIELD_MASK: u8 = 0xEF;
}

impl Register for FifoCtl {
    const ADDRESS: u8 = REG_FIFO_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: u8 = 0x00;
}

impl Register for FifoStatus {
    const ADDRESS: u8 = REG_FIFO_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: u8 = 0x00;
    const FIELD_MASK: u8 = 0xBF;
}

impl Register for TapSign {
    const ADDRESS: u8 = REG_TAP_SIGN;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: u8 = 0x00;
    const FIELD_MASK: u8 = 0x77;
}

impl Register for OrientConf {
    const ADDRESS: u8 = REG_ORIENT_CONF;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: u8 = 0x25;
}

impl Register for Orient {
    const ADDRESS: u8 = REG_ORIENT;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: u8 = 0x00;
    const FIELD_MASK: u8 = 0x7F;
}
