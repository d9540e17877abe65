//! Bus and interrupt-line abstractions for the ADXL34x driver.

pub mod i2c;
pub mod pin;
pub mod spi;

/// Abstraction over the low-level bus access required by the driver.
pub trait Adxl34xInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Prepares the bus before the first transaction.
    fn init(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;
}

impl<T: Adxl34xInterface + ?Sized> Adxl34xInterface for &mut T {
    type Error = T::Error;

    fn init(&mut self) -> core::result::Result<(), Self::Error> {
        T::init(self)
    }

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        T::write_register(self, register, value)
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        T::read_register(self, register)
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        T::read_many(self, register, buf)
    }
}
