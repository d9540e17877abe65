//! Configuration primitives for the ADXL34x driver.

use crate::params::{FifoMode, IntLine, OutputDataRate, Range};
use crate::registers::{
    ActInactCtl, BwRate, DataFormat, FifoCtl, IntEnable, IntMap, OffsetX, OffsetY, OffsetZ,
    OrientConf, PowerCtl, TapAxes, TapDuration, TapLatency, TapWindow, ThreshAct, ThreshFreeFall,
    ThreshInact, ThreshTap, TimeFreeFall, TimeInact, MAX_FIFO_SAMPLES,
};

/// Shadow copy of every cached device register.
///
/// Each field mirrors the value last written to, or last read from, the device.
/// A freshly constructed snapshot is all zeroes; `devid == 0` means "not probed yet".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// `DEVID`.
    pub devid: u8,
    /// `THRESH_TAP`.
    pub thresh_tap: ThreshTap,
    /// `OFSX`.
    pub ofsx: OffsetX,
    /// `OFSY`.
    pub ofsy: OffsetY,
    /// `OFSZ`.
    pub ofsz: OffsetZ,
    /// `DUR`.
    pub dur: TapDuration,
    /// `LATENT`.
    pub latent: TapLatency,
    /// `WINDOW`.
    pub window: TapWindow,
    /// `THRESH_ACT`.
    pub thresh_act: ThreshAct,
    /// `THRESH_INACT`.
    pub thresh_inact: ThreshInact,
    /// `TIME_INACT`.
    pub time_inact: TimeInact,
    /// `ACT_INACT_CTL`.
    pub act_inact_ctl: ActInactCtl,
    /// `THRESH_FF`.
    pub thresh_ff: ThreshFreeFall,
    /// `TIME_FF`.
    pub time_ff: TimeFreeFall,
    /// `TAP_AXES`.
    pub tap_axes: TapAxes,
    /// `BW_RATE`.
    pub bw_rate: BwRate,
    /// `POWER_CTL`.
    pub power_ctl: PowerCtl,
    /// `INT_ENABLE`.
    pub int_enable: IntEnable,
    /// `INT_MAP`.
    pub int_map: IntMap,
    /// `DATA_FORMAT`.
    pub data_format: DataFormat,
    /// `FIFO_CTL`.
    pub fifo_ctl: FifoCtl,
    /// `ORIENT_CONF` (ADXL344/ADXL346 only).
    pub orient_conf: OrientConf,
}

/// User-facing start-up configuration for the ADXL34x sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitConfig {
    /// Output data rate selection.
    pub odr: OutputDataRate,
    /// Measurement range.
    pub range: Range,
    /// Full-resolution output.
    pub full_res: bool,
    /// FIFO operating mode.
    pub fifo_mode: FifoMode,
    /// FIFO watermark in samples (1..=31); also the streaming burst size.
    pub fifo_watermark: u8,
    /// Device pin wired to the MCU interrupt line.
    pub int_line: IntLine,
    /// Interrupt polarity; `true` drives the line active low.
    pub int_active_low: bool,
}

impl InitConfig {
    /// Begins building an [`InitConfig`] using the builder pattern.
    pub fn new() -> InitConfigBuilder {
        InitConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.fifo_watermark == 0 || self.fifo_watermark > MAX_FIFO_SAMPLES {
            return Err(ConfigError::WatermarkOutOfRange);
        }

        Ok(())
    }

    /// Builds the register image applied by [`Adxl34x::init`](crate::Adxl34x::init).
    ///
    /// Interrupt enables stay cleared; they follow the registered triggers.
    pub fn apply_to(&self, base: &Config) -> Config {
        let mut cfg = *base;
        cfg.bw_rate = cfg.bw_rate.with_rate(self.odr).with_low_power(false);
        cfg.data_format = cfg
            .data_format
            .with_range(self.range)
            .with_full_res(self.full_res)
            .with_int_invert(self.int_active_low);
        cfg.fifo_ctl = FifoCtl::new()
            .with_mode(self.fifo_mode)
            .with_trigger(self.int_line)
            .with_samples(self.fifo_watermark);
        cfg.int_map = IntMap::all_to(self.int_line);
        cfg.int_enable = IntEnable::new();
        cfg.power_ctl = cfg.power_ctl.with_measure(true);
        cfg
    }
}

/// Builder for [`InitConfig`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct InitConfigBuilder {
    config: InitConfig,
}

impl InitConfigBuilder {
    /// Creates a new builder seeded with [`InitConfig::default()`].
    pub fn new() -> Self {
        Self {
            config: InitConfig::default(),
        }
    }

    /// Overrides the output data rate.
    pub fn odr(mut self, odr: OutputDataRate) -> Self {
        self.config.odr = odr;
        self
    }

    /// Overrides the measurement range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Enables or disables full-resolution output.
    pub fn full_res(mut self, full_res: bool) -> Self {
        self.config.full_res = full_res;
        self
    }

    /// Overrides the FIFO mode.
    pub fn fifo_mode(mut self, mode: FifoMode) -> Self {
        self.config.fifo_mode = mode;
        self
    }

    /// Overrides the FIFO watermark.
    pub fn fifo_watermark(mut self, samples: u8) -> Self {
        self.config.fifo_watermark = samples;
        self
    }

    /// Selects the device interrupt pin.
    pub fn int_line(mut self, line: IntLine) -> Self {
        self.config.int_line = line;
        self
    }

    /// Selects active-low interrupt polarity.
    pub fn int_active_low(mut self, active_low: bool) -> Self {
        self.config.int_active_low = active_low;
        self
    }

    /// Finalizes the builder and returns the [`InitConfig`].
    pub fn build(self) -> InitConfig {
        self.config
    }
}

impl Default for InitConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            odr: OutputDataRate::Hz100,
            range: Range::G2,
            full_res: false,
            fifo_mode: FifoMode::Stream,
            fifo_watermark: 16,
            int_line: IntLine::Int1,
            int_active_low: false,
        }
    }
}

/// Validation errors generated while verifying an [`InitConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// FIFO watermark outside 1..=31.
    WatermarkOutOfRange,
}
