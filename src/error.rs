//! Error handling primitives for the ADXL34x driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The channel, attribute or trigger is not handled by this driver.
    NotSupported,
    /// The device is suspended or powered off.
    NotReady,
    /// The FIFO does not hold enough samples yet.
    NoData,
    /// The register does not exist on the detected device variant.
    AddressNotAvailable,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
    /// The `DEVID` register returned an unknown value.
    DeviceIdMismatch(u8),
    /// The streaming request could not provide a large enough buffer.
    BufferUnavailable,
    /// The interrupt pin reported an error.
    Pin,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
