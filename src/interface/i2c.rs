//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Adxl34xInterface;

/// I2C address when the `ALT ADDRESS` pin is tied low.
pub const I2C_ADDRESS_ALT_LOW: u8 = 0x53;
/// I2C address when the `ALT ADDRESS` pin is tied high.
pub const I2C_ADDRESS_ALT_HIGH: u8 = 0x1D;

/// I2C-based interface implementation for the ADXL34x driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface talking to the given 7-bit address.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Creates a new interface using the default address (`ALT ADDRESS` low).
    pub const fn default(i2c: I2C) -> Self {
        Self::new(i2c, I2C_ADDRESS_ALT_LOW)
    }

    /// Returns the configured device address.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Adxl34xInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        self.i2c.write_read(self.address, &[register], buf)
    }
}
