//! Sensor port

/// Errors that can occur while reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not respond on its bus
    NoResponse,
    /// Reading outside the plausible range for the sensor
    OutOfRange,
    /// ADC conversion failed
    ConversionError,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::NoResponse => f.write_str("sensor not responding"),
            SensorError::OutOfRange => f.write_str("sensor reading out of range"),
            SensorError::ConversionError => f.write_str("sensor conversion failed"),
        }
    }
}

/// Raw accelerometer sample (signed counts per axis)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Acceleration {
    /// Create a sample from raw axis counts
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }
}

/// Thermal, inertial and optical sensors
///
/// Takes `&mut self` because bus and ADC reads typically require mutable
/// access.
pub trait SensorPort {
    /// Read the temperature in 0.1°C units (e.g. 205 = 20.5°C)
    fn read_temperature_deci_celsius(&mut self) -> Result<i32, SensorError>;

    /// Read raw acceleration counts
    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError>;

    /// Read the light/proximity intensity
    fn read_light(&mut self) -> Result<u32, SensorError>;

    /// Returns true once per obstacle threshold crossing (read-and-clear)
    fn obstacle_threshold_event(&mut self) -> bool;

    /// Enable or disable obstacle threshold events
    fn set_obstacle_armed(&mut self, armed: bool);
}
