//! Sensor drivers

pub mod die_temp;
pub mod light;
pub mod mma7455;

pub use die_temp::DieTemperature;
pub use light::LightSensor;
pub use mma7455::Mma7455;

/// ADC channel abstraction
///
/// embedded-hal 1.0 has no ADC trait, so boards wrap their converter in
/// this.
pub trait AdcReader {
    /// Read one conversion (12-bit, 0-4095)
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// Full-scale value of the 12-bit converter
pub const ADC_MAX: u16 = 4095;

/// Fixed ADC value for tests
#[cfg(test)]
pub struct DummyAdc(pub Result<u16, ()>);

#[cfg(test)]
impl AdcReader for DummyAdc {
    fn read(&mut self) -> Result<u16, ()> {
        self.0
    }
}
