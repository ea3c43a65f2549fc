//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Adxl345Interface;

/// Default 7-bit slave address (ALT ADDRESS pin tied low).
pub const I2C_ADDR_DEFAULT: u8 = 0x53;
/// Alternative 7-bit slave address (ALT ADDRESS pin tied high).
pub const I2C_ADDR_ALT: u8 = 0x1D;

// Longest register burst the driver issues plus the address byte.
const WRITE_BUF_LEN: usize = 8;

/// Selection of the 7-bit slave address driven by the ALT ADDRESS pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveAddr {
    /// ALT ADDRESS pin low (`0x53`).
    Default,
    /// ALT ADDRESS pin high (`0x1D`).
    Alternative,
}

impl SlaveAddr {
    /// Returns the 7-bit bus address for this selection.
    pub const fn addr(self) -> u8 {
        match self {
            Self::Default => I2C_ADDR_DEFAULT,
            Self::Alternative => I2C_ADDR_ALT,
        }
    }
}

/// I2C-based interface implementation for the ADXL345 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface from the provided I2C bus abstraction.
    pub const fn new(i2c: I2C, address: SlaveAddr) -> Self {
        Self {
            i2c,
            address: address.addr(),
        }
    }

    /// Returns the 7-bit slave address in use.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Adxl345Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        self.i2c.write_read(self.address, &[register], buf)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        // Register address and payload must share one bus transaction; the
        // device auto-increments the register pointer for the extra bytes.
        debug_assert!(data.len() < WRITE_BUF_LEN, "burst exceeds write buffer");
        let mut buf = [0u8; WRITE_BUF_LEN];
        buf[0] = register;
        buf[1..=data.len()].copy_from_slice(data);
        self.i2c.write(self.address, &buf[..=data.len()])
    }
}
