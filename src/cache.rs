//! Write-through register cache.
//!
//! Every writable register has a shadow copy in [`Config`]. Loads always hit the bus and
//! refresh the shadow; sets compare against the shadow first and only touch the bus when a
//! field actually changes. On a failed write the shadow keeps its previous value, so it never
//! claims a state the device does not have.

use crate::config::Config;
use crate::device::Adxl34x;
use crate::error::{Error, Result};
use crate::interface::Adxl34xInterface;
use crate::registers::{
    ActInactCtl, ActTapStatus, BwRate, DataFormat, DeviceFamily, FifoCtl, FifoStatus, IntEnable,
    IntMap, IntSource, OffsetX, OffsetY, OffsetZ, Orient, OrientConf, PowerCtl, Register, TapAxes,
    TapDuration, TapLatency, TapSign, TapWindow, ThreshAct, ThreshFreeFall, ThreshInact, ThreshTap,
    TimeFreeFall, TimeInact, REG_DEVID,
};

/// A register with a shadow copy in [`Config`].
pub trait CachedRegister: Register {
    /// Only present on ADXL344/ADXL346.
    const EXTENDED: bool = false;

    /// Shadow copy of this register.
    fn cached(cfg: &Config) -> Self;

    /// Mutable shadow copy of this register.
    fn cached_mut(cfg: &mut Config) -> &mut Self;
}

macro_rules! cached_register {
    ($($ty:ty => $field:ident $(, extended = $ext:expr)?;)*) => {
        $(
            impl CachedRegister for $ty {
                $(const EXTENDED: bool = $ext;)?

                fn cached(cfg: &Config) -> Self {
                    cfg.$field
                }

                fn cached_mut(cfg: &mut Config) -> &mut Self {
                    &mut cfg.$field
                }
            }
        )*
    };
}

cached_register! {
    ThreshTap => thresh_tap;
    OffsetX => ofsx;
    OffsetY => ofsy;
    OffsetZ => ofsz;
    TapDuration => dur;
    TapLatency => latent;
    TapWindow => window;
    ThreshAct => thresh_act;
    ThreshInact => thresh_inact;
    TimeInact => time_inact;
    ActInactCtl => act_inact_ctl;
    ThreshFreeFall => thresh_ff;
    TimeFreeFall => time_ff;
    TapAxes => tap_axes;
    BwRate => bw_rate;
    PowerCtl => power_ctl;
    IntEnable => int_enable;
    IntMap => int_map;
    DataFormat => data_format;
    FifoCtl => fifo_ctl;
    OrientConf => orient_conf, extended = true;
}

/// Named accessors for one cached register.
macro_rules! register_accessors {
    ($($ty:ty: $get:ident, $set:ident;)*) => {
        $(
            #[doc = concat!("Returns `", stringify!($ty), "`, re-reading it first unless `use_cache` is set.")]
            pub fn $get(&mut self, use_cache: bool) -> Result<$ty, CommE> {
                self.get_register::<$ty>(use_cache)
            }

            #[doc = concat!("Writes `", stringify!($ty), "` if it differs from the cached copy.")]
            pub fn $set(&mut self, value: $ty) -> Result<(), CommE> {
                self.set_register(value)
            }
        )*
    };
}

impl<IFACE, PIN, CommE> Adxl34x<IFACE, PIN>
where
    IFACE: Adxl34xInterface<Error = CommE>,
{
    // ==================================================================
    // == Generic Cache Operations =======================================
    // ==================================================================
    fn check_extended<R: CachedRegister>(&self) -> Result<(), CommE> {
        if R::EXTENDED && !self.has_extended_registers() {
            return Err(Error::AddressNotAvailable);
        }
        Ok(())
    }

    /// Reads `R` from the device and overwrites its shadow copy.
    ///
    /// On a bus error the shadow copy is left untouched.
    pub fn load_register<R: CachedRegister>(&mut self) -> Result<R, CommE> {
        self.check_extended::<R>()?;

        let raw = self.interface.read_register(R::ADDRESS)?;
        let value = R::decode(raw);
        *R::cached_mut(&mut self.cfg) = value;
        trace!("load {=u8:#x} -> {=u8:#x}", R::ADDRESS, raw);
        Ok(value)
    }

    /// Returns the shadow copy of `R`, refreshing it from the device unless `use_cache`.
    pub fn get_register<R: CachedRegister>(&mut self, use_cache: bool) -> Result<R, CommE> {
        self.check_extended::<R>()?;

        if !use_cache {
            return self.load_register::<R>();
        }
        Ok(R::cached(&self.cfg))
    }

    /// Writes `value` when any field differs from the shadow copy.
    ///
    /// Equal values are a no-op without bus traffic. The shadow copy only changes after a
    /// successful write.
    pub fn set_register<R: CachedRegister>(&mut self, value: R) -> Result<(), CommE> {
        self.check_extended::<R>()?;

        if R::cached(&self.cfg) == value {
            return Ok(());
        }

        let raw = value.encode();
        debug!("set {=u8:#x} <- {=u8:#x}", R::ADDRESS, raw);
        self.interface.write_register(R::ADDRESS, raw)?;
        *R::cached_mut(&mut self.cfg) = value;
        Ok(())
    }

    /// Reads a status register; never cached since the device changes it on its own.
    pub fn read_status<R: Register>(&mut self) -> Result<R, CommE> {
        let raw = self.interface.read_register(R::ADDRESS)?;
        Ok(R::decode(raw))
    }

    // ==================================================================
    // == Named Register Accessors =======================================
    // ==================================================================
    register_accessors! {
        ThreshTap: get_thresh_tap, set_thresh_tap;
        OffsetX: get_ofsx, set_ofsx;
        OffsetY: get_ofsy, set_ofsy;
        OffsetZ: get_ofsz, set_ofsz;
        TapDuration: get_dur, set_dur;
        TapLatency: get_latent, set_latent;
        TapWindow: get_window, set_window;
        ThreshAct: get_thresh_act, set_thresh_act;
        ThreshInact: get_thresh_inact, set_thresh_inact;
        TimeInact: get_time_inact, set_time_inact;
        ActInactCtl: get_act_inact_ctl, set_act_inact_ctl;
        ThreshFreeFall: get_thresh_ff, set_thresh_ff;
        TimeFreeFall: get_time_ff, set_time_ff;
        TapAxes: get_tap_axes, set_tap_axes;
        BwRate: get_bw_rate, set_bw_rate;
        PowerCtl: get_power_ctl, set_power_ctl;
        IntEnable: get_int_enable, set_int_enable;
        IntMap: get_int_map, set_int_map;
        DataFormat: get_data_format, set_data_format;
        FifoCtl: get_fifo_ctl, set_fifo_ctl;
        OrientConf: get_orient_conf, set_orient_conf;
    }

    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Returns `DEVID`, reading it only while the cached value is still zero.
    pub fn get_devid(&mut self) -> Result<u8, CommE> {
        if self.cfg.devid == 0 {
            self.cfg.devid = self.interface.read_register(REG_DEVID)?;
            debug!("devid {=u8:#x}", self.cfg.devid);
        }
        Ok(self.cfg.devid)
    }

    /// Reads `ACT_TAP_STATUS`.
    pub fn get_act_tap_status(&mut self) -> Result<ActTapStatus, CommE> {
        self.read_status()
    }

    /// Reads and thereby acknowledges `INT_SOURCE`.
    pub fn get_int_source(&mut self) -> Result<IntSource, CommE> {
        self.read_status()
    }

    /// Reads `FIFO_STATUS`.
    pub fn get_fifo_status(&mut self) -> Result<FifoStatus, CommE> {
        self.read_status()
    }

    /// Reads `TAP_SIGN` (ADXL344/ADXL346 only).
    pub fn get_tap_sign(&mut self) -> Result<TapSign, CommE> {
        if !self.has_extended_registers() {
            return Err(Error::AddressNotAvailable);
        }
        self.read_status()
    }

    /// Reads `ORIENT` (ADXL344/ADXL346 only).
    pub fn get_orient(&mut self) -> Result<Orient, CommE> {
        if !self.has_extended_registers() {
            return Err(Error::AddressNotAvailable);
        }
        self.read_status()
    }

    // ==================================================================
    // == Whole-Snapshot Operations ======================================
    // ==================================================================
    /// Applies every register of `new_cfg`, in datasheet order.
    ///
    /// Every register is attempted even after a failure; the first failure is returned once
    /// all of them have been tried. `ORIENT_CONF` is only written on ADXL344/ADXL346.
    pub fn configure(&mut self, new_cfg: &Config) -> Result<(), CommE> {
        let results = [
            self.set_register(new_cfg.thresh_tap),
            self.set_register(new_cfg.ofsx),
            self.set_register(new_cfg.ofsy),
            self.set_register(new_cfg.ofsz),
            self.set_register(new_cfg.dur),
            self.set_register(new_cfg.latent),
            self.set_register(new_cfg.window),
            self.set_register(new_cfg.thresh_act),
            self.set_register(new_cfg.thresh_inact),
            self.set_register(new_cfg.time_inact),
            self.set_register(new_cfg.act_inact_ctl),
            self.set_register(new_cfg.thresh_ff),
            self.set_register(new_cfg.time_ff),
            self.set_register(new_cfg.tap_axes),
            self.set_register(new_cfg.bw_rate),
            self.set_register(new_cfg.power_ctl),
            self.set_register(new_cfg.int_enable),
            self.set_register(new_cfg.int_map),
            self.set_register(new_cfg.data_format),
            self.set_register(new_cfg.fifo_ctl),
            if self.has_extended_registers() {
                self.set_register(new_cfg.orient_conf)
            } else {
                Ok(())
            },
        ];
        first_failure(results)
    }

    /// Refreshes every cached register from the device.
    ///
    /// Same best-effort policy as [`configure`](Self::configure).
    pub fn get_configuration(&mut self) -> Result<(), CommE> {
        let results = [
            self.load_register::<ThreshTap>().map(drop),
            self.load_register::<OffsetX>().map(drop),
            self.load_register::<OffsetY>().map(drop),
            self.load_register::<OffsetZ>().map(drop),
            self.load_register::<TapDuration>().map(drop),
            self.load_register::<TapLatency>().map(drop),
            self.load_register::<TapWindow>().map(drop),
            self.load_register::<ThreshAct>().map(drop),
            self.load_register::<ThreshInact>().map(drop),
            self.load_register::<TimeInact>().map(drop),
            self.load_register::<ActInactCtl>().map(drop),
            self.load_register::<ThreshFreeFall>().map(drop),
            self.load_register::<TimeFreeFall>().map(drop),
            self.load_register::<TapAxes>().map(drop),
            self.load_register::<BwRate>().map(drop),
            self.load_register::<PowerCtl>().map(drop),
            self.load_register::<IntEnable>().map(drop),
            self.load_register::<IntMap>().map(drop),
            self.load_register::<DataFormat>().map(drop),
            self.load_register::<FifoCtl>().map(drop),
            if self.has_extended_registers() {
                self.load_register::<OrientConf>().map(drop)
            } else {
                Ok(())
            },
        ];
        first_failure(results)
    }

    /// Family detected from the cached `DEVID`, if probed.
    pub fn family(&self) -> Option<DeviceFamily> {
        DeviceFamily::from_devid(self.cfg.devid)
    }

    pub(crate) fn has_extended_registers(&self) -> bool {
        self.family()
            .is_some_and(DeviceFamily::has_extended_registers)
    }
}

fn first_failure<E, const N: usize>(results: [Result<(), E>; N]) -> Result<(), E> {
    results
        .into_iter()
        .find(|result| result.is_err())
        .unwrap_or(Ok(()))
}
