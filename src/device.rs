//! High-level ADXL34x device driver implementation.

use crate::config::{Config, InitConfig};
use crate::decoder::micro_ms2;
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::pin::{InterruptPin, NoPin};
use crate::interface::spi::SpiInterface;
use crate::interface::Adxl34xInterface;
use crate::params::{OutputDataRate, Range};
use crate::registers::{DeviceFamily, OffsetX, OffsetY, OffsetZ, FRAME_LEN, REG_DATAX0};
use crate::sensor::{PmAction, PmState, SensorAttribute, SensorChannel, SensorValue};
use crate::trigger::{TriggerState, TriggerTable};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

// Standard gravity in µm/s².
const STANDARD_GRAVITY_UMS2: i64 = 9_806_650;
// One OFSx LSB (15.6 mg) in µm/s².
const OFFSET_LSB_UMS2: i64 = 152_984;

/// High-level synchronous driver for the ADXL34x accelerometer family.
///
/// The driver owns the register bus, the MCU interrupt pin, the register cache and the
/// trigger table. All methods take `&mut self`, so the cache has exactly one owner at a
/// time; share the driver between a foreground task and the interrupt worker through a
/// mutex.
pub struct Adxl34x<IFACE, PIN = NoPin> {
    pub(crate) interface: IFACE,
    pub(crate) int_pin: PIN,
    pub(crate) cfg: Config,
    pub(crate) init_config: InitConfig,
    pub(crate) pm_state: PmState,
    pub(crate) triggers: TriggerTable<IFACE, PIN>,
    pub(crate) trigger_state: TriggerState,
    sample: [i16; 3],
}

impl<IFACE, PIN> Adxl34x<IFACE, PIN> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface and interrupt pin.
    pub fn new(interface: IFACE, int_pin: PIN, init_config: InitConfig) -> Self {
        Self {
            interface,
            int_pin,
            cfg: Config::default(),
            init_config,
            pm_state: PmState::Unknown,
            triggers: TriggerTable::new(),
            trigger_state: TriggerState::Suspended,
            sample: [0; 3],
        }
    }

    /// Consumes the driver and returns the owned interface and pin.
    pub fn release(self) -> (IFACE, PIN) {
        (self.interface, self.int_pin)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns the register cache.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the start-up configuration.
    pub fn init_config(&self) -> &InitConfig {
        &self.init_config
    }

    /// Current power-management state.
    pub fn pm_state(&self) -> PmState {
        self.pm_state
    }

    /// Range the cache says is active.
    pub fn range(&self) -> Range {
        self.cfg.data_format.range()
    }
}

impl<SPI, PIN> Adxl34x<SpiInterface<SPI>, PIN>
where
    SPI: SpiDevice,
{
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, int_pin: PIN, init_config: InitConfig) -> Self {
        Self::new(SpiInterface::new(spi), int_pin, init_config)
    }
}

impl<I2C, PIN> Adxl34x<I2cInterface<I2C>, PIN>
where
    I2C: I2c,
{
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, address: u8, int_pin: PIN, init_config: InitConfig) -> Self {
        Self::new(I2cInterface::new(i2c, address), int_pin, init_config)
    }
}

impl<IFACE, PIN, CommE> Adxl34x<IFACE, PIN>
where
    IFACE: Adxl34xInterface<Error = CommE>,
    PIN: InterruptPin,
{
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Probes the device and applies the start-up configuration.
    ///
    /// The whole register file is read into the cache first, so only registers that differ
    /// from the start-up configuration are written.
    pub fn init(&mut self) -> Result<DeviceFamily, CommE> {
        self.init_config
            .validate()
            .map_err(|_| Error::InvalidConfig)?;

        self.interface.init()?;

        let devid = self.get_devid()?;
        let Some(family) = DeviceFamily::from_devid(devid) else {
            error!("unknown devid {=u8:#x}", devid);
            self.cfg.devid = 0;
            return Err(Error::DeviceIdMismatch(devid));
        };

        self.get_configuration()?;
        let target = self.init_config.apply_to(&self.cfg);
        self.configure(&target)?;
        self.flush_fifo()?;

        self.pm_state = PmState::Active;
        info!("adxl34x ready ({})", family);
        Ok(family)
    }

    // ==================================================================
    // == Power Management ==============================================
    // ==================================================================
    /// Enters or leaves standby.
    pub fn pm_action(&mut self, action: PmAction) -> Result<(), CommE> {
        match action {
            PmAction::Suspend => {
                self.int_pin
                    .disable_interrupt()
                    .map_err(|_| Error::Pin)?;
                let power = self.cfg.power_ctl.with_measure(false);
                self.set_power_ctl(power)?;
                self.pm_state = PmState::Suspended;
            }
            PmAction::Resume => {
                let power = self.cfg.power_ctl.with_measure(true);
                self.set_power_ctl(power)?;
                self.pm_state = PmState::Active;
                if self.trigger_state == TriggerState::Active {
                    self.int_pin.enable_interrupt().map_err(|_| Error::Pin)?;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn ensure_active(&self) -> Result<(), CommE> {
        match self.pm_state {
            PmState::Suspended | PmState::Off => Err(Error::NotReady),
            PmState::Active | PmState::Unknown => Ok(()),
        }
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the latest X/Y/Z sample into the driver.
    pub fn sample_fetch(&mut self, channel: SensorChannel) -> Result<(), CommE> {
        self.ensure_active()?;
        if !channel.is_accel() && channel != SensorChannel::All {
            return Err(Error::NotSupported);
        }

        let mut raw = [0u8; FRAME_LEN];
        self.interface.read_many(REG_DATAX0, &mut raw)?;
        self.sample = unpack_frame(&raw);
        Ok(())
    }

    /// Converts the last fetched sample to m/s².
    ///
    /// Writes one value for a single axis or three for [`SensorChannel::AccelXyz`] and
    /// returns how many were written.
    pub fn channel_get(
        &self,
        channel: SensorChannel,
        out: &mut [SensorValue],
    ) -> Result<usize, CommE> {
        let axes: &[usize] = match channel {
            SensorChannel::AccelX => &[0],
            SensorChannel::AccelY => &[1],
            SensorChannel::AccelZ => &[2],
            SensorChannel::AccelXyz => &[0, 1, 2],
            _ => return Err(Error::NotSupported),
        };
        if out.len() < axes.len() {
            return Err(Error::InvalidConfig);
        }

        let range = self.range();
        for (slot, &axis) in out.iter_mut().zip(axes) {
            *slot = SensorValue::from_micro(micro_ms2(self.sample[axis], range));
        }
        Ok(axes.len())
    }

    /// Last fetched raw sample.
    pub fn raw_sample(&self) -> [i16; 3] {
        self.sample
    }

    // ==================================================================
    // == Attributes ====================================================
    // ==================================================================
    /// Updates a run-time attribute.
    pub fn attr_set(
        &mut self,
        channel: SensorChannel,
        attribute: SensorAttribute,
        value: SensorValue,
    ) -> Result<(), CommE> {
        self.ensure_active()?;
        if !channel.is_accel() {
            return Err(Error::NotSupported);
        }

        match attribute {
            SensorAttribute::SamplingFrequency => {
                let millihertz = value.to_micro().clamp(0, i64::from(u32::MAX) * 1_000) / 1_000;
                let rate = OutputDataRate::at_least(millihertz as u32);
                let bw_rate = self.cfg.bw_rate.with_rate(rate);
                self.set_bw_rate(bw_rate)
            }
            SensorAttribute::Offset => {
                let lsb = (value.to_micro() / OFFSET_LSB_UMS2)
                    .clamp(i64::from(i8::MIN), i64::from(i8::MAX)) as i8;
                match channel {
                    SensorChannel::AccelX => self.set_ofsx(OffsetX(lsb)),
                    SensorChannel::AccelY => self.set_ofsy(OffsetY(lsb)),
                    SensorChannel::AccelZ => self.set_ofsz(OffsetZ(lsb)),
                    _ => {
                        let results = [
                            self.set_ofsx(OffsetX(lsb)),
                            self.set_ofsy(OffsetY(lsb)),
                            self.set_ofsz(OffsetZ(lsb)),
                        ];
                        results.into_iter().collect()
                    }
                }
            }
            SensorAttribute::FullScale => {
                let micro = value.to_micro().unsigned_abs();
                let g = micro.div_ceil(STANDARD_GRAVITY_UMS2 as u64);
                let range = Range::covering(g.min(u64::from(u32::MAX)) as u32);
                let format = self.cfg.data_format.with_range(range);
                self.set_data_format(format)
            }
            _ => Err(Error::NotSupported),
        }
    }

    /// Reads back a run-time attribute from the cache.
    pub fn attr_get(
        &mut self,
        channel: SensorChannel,
        attribute: SensorAttribute,
    ) -> Result<SensorValue, CommE> {
        self.ensure_active()?;
        if !channel.is_accel() {
            return Err(Error::NotSupported);
        }

        match attribute {
            SensorAttribute::SamplingFrequency => {
                let millihertz = self.cfg.bw_rate.rate().millihertz();
                Ok(SensorValue::from_micro(i64::from(millihertz) * 1_000))
            }
            SensorAttribute::Offset => {
                let lsb = match channel {
                    SensorChannel::AccelX => self.cfg.ofsx.0,
                    SensorChannel::AccelY => self.cfg.ofsy.0,
                    SensorChannel::AccelZ => self.cfg.ofsz.0,
                    _ => return Err(Error::NotSupported),
                };
                Ok(SensorValue::from_micro(i64::from(lsb) * OFFSET_LSB_UMS2))
            }
            SensorAttribute::FullScale => {
                let g = i64::from(self.range().max_g());
                Ok(SensorValue::from_micro(g * STANDARD_GRAVITY_UMS2))
            }
            _ => Err(Error::NotSupported),
        }
    }
}

#[inline]
pub(crate) fn unpack_frame(raw: &[u8]) -> [i16; 3] {
    [
        i16::from_le_bytes([raw[0], raw[1]]),
        i16::from_le_bytes([raw[2], raw[3]]),
        i16::from_le_bytes([raw[4], raw[5]]),
    ]
}
