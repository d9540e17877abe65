//! Generic sensor-API vocabulary: channels, attributes, values, triggers and power states.

/// Measurement channels a caller may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorChannel {
    /// Acceleration along X.
    AccelX,
    /// Acceleration along Y.
    AccelY,
    /// Acceleration along Z.
    AccelZ,
    /// Acceleration along all three axes.
    AccelXyz,
    /// Die temperature.
    DieTemp,
    /// Angular velocity along all three axes.
    GyroXyz,
    /// Magnetic field along all three axes.
    MagnXyz,
    /// Every channel the driver supports.
    All,
}

impl SensorChannel {
    /// `true` for the four acceleration channels.
    pub const fn is_accel(self) -> bool {
        matches!(
            self,
            Self::AccelX | Self::AccelY | Self::AccelZ | Self::AccelXyz
        )
    }
}

/// A channel type plus its instance index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSpec {
    /// Channel type.
    pub channel: SensorChannel,
    /// Instance index; this driver only exposes index 0.
    pub index: u8,
}

impl ChannelSpec {
    /// Channel `channel`, instance 0.
    pub const fn new(channel: SensorChannel) -> Self {
        Self { channel, index: 0 }
    }
}

/// Attributes accepted by `attr_set`/`attr_get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorAttribute {
    /// Output data rate, in Hz.
    SamplingFrequency,
    /// Per-axis offset calibration, in m/s².
    Offset,
    /// Full-scale range, in m/s².
    FullScale,
    /// Any-motion threshold, in m/s².
    UpperThreshold,
    /// Oversampling ratio.
    Oversampling,
}

/// A fixed-point value split into integer and millionth parts, both carrying the sign.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorValue {
    /// Integer part.
    pub val1: i32,
    /// Fractional part in millionths.
    pub val2: i32,
}

impl SensorValue {
    /// Builds a value from millionths, saturating the integer part.
    pub fn from_micro(micro: i64) -> Self {
        let val1 = (micro / 1_000_000).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        Self {
            val1: val1 as i32,
            val2: (micro % 1_000_000) as i32,
        }
    }

    /// Returns the value in millionths.
    pub fn to_micro(self) -> i64 {
        i64::from(self.val1) * 1_000_000 + i64::from(self.val2)
    }
}

/// Abstract event classes a handler can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerKind {
    /// A new sample is available.
    DataReady,
    /// The FIFO reached its watermark.
    FifoWatermark,
    /// The FIFO is full and overwriting.
    FifoFull,
    /// Single tap.
    Tap,
    /// Double tap.
    DoubleTap,
    /// Free fall.
    FreeFall,
    /// Activity above threshold.
    Motion,
    /// Inactivity below threshold for the configured time.
    Stationary,
    /// Threshold crossing; not produced by this driver.
    Threshold,
}

/// Trigger description handed back to the handler unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerSpec {
    /// Event class.
    pub kind: TriggerKind,
    /// Channel the trigger applies to.
    pub channel: SensorChannel,
}

impl TriggerSpec {
    /// Trigger on `kind` for all acceleration axes.
    pub const fn accel(kind: TriggerKind) -> Self {
        Self {
            kind,
            channel: SensorChannel::AccelXyz,
        }
    }
}

/// Device power state as tracked by the power-management layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PmState {
    /// Measuring.
    Active,
    /// Standby, registers retained.
    Suspended,
    /// Powered off.
    Off,
    /// Not initialized yet.
    Unknown,
}

/// Power-management transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PmAction {
    /// Enter standby (`POWER_CTL.MEASURE = 0`).
    Suspend,
    /// Resume measuring (`POWER_CTL.MEASURE = 1`).
    Resume,
}
