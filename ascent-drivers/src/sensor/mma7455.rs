//! MMA7455 three-axis accelerometer (I2C)
//!
//! Run in 2 g measurement mode with 8-bit outputs: 64 counts per g, signed.

use ascent_core::traits::{Acceleration, SensorError};
use embedded_hal::i2c::I2c;

/// MMA7455 driver
pub struct Mma7455<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Mma7455<I2C> {
    /// Default I2C address
    pub const ADDR: u8 = 0x1D;
    /// 8-bit X output; Y and Z follow
    const XOUT8: u8 = 0x06;
    /// Device address register, reads back the bus address
    const I2CAD: u8 = 0x0D;
    /// Mode control
    const MCTL: u8 = 0x16;

    /// Measurement mode, 2 g range
    const MCTL_MEASURE_2G: u8 = 0x05;

    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Verify the device answers and start measuring
    pub fn init(&mut self) -> Result<(), SensorError> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(Self::ADDR, &[Self::I2CAD], &mut id)
            .map_err(|_| SensorError::NoResponse)?;

        if id[0] & 0x7F != Self::ADDR {
            return Err(SensorError::NoResponse);
        }

        self.i2c
            .write(Self::ADDR, &[Self::MCTL, Self::MCTL_MEASURE_2G])
            .map_err(|_| SensorError::NoResponse)
    }

    /// Read raw X/Y/Z counts
    pub fn read(&mut self) -> Result<Acceleration, SensorError> {
        let mut buf = [0u8; 3];
        self.i2c
            .write_read(Self::ADDR, &[Self::XOUT8], &mut buf)
            .map_err(|_| SensorError::NoResponse)?;

        Ok(Acceleration::new(buf[0] as i8, buf[1] as i8, buf[2] as i8))
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}
