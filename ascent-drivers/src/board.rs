//! Board composites implementing the core port traits

use ascent_core::shared::EdgeFlag;
use ascent_core::traits::{
    Acceleration, Channel, Glyph, IndicatorPort, SensorError, SensorPort,
};
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::indicator::{drive, LedBar, SevenSegment};
use crate::sensor::{AdcReader, DieTemperature, LightSensor, Mma7455};

/// Every sensor on the board behind one [`SensorPort`]
///
/// Obstacle crossings are raised on `obstacle` by the light sensor's
/// threshold interrupt; they only count while armed.
pub struct BoardSensors<T, I, L> {
    temperature: DieTemperature<T>,
    accel: Mma7455<I>,
    light: LightSensor<L>,
    obstacle: &'static EdgeFlag,
    armed: bool,
}

impl<T, I, L> BoardSensors<T, I, L>
where
    T: AdcReader,
    I: I2c,
    L: AdcReader,
{
    /// Assemble the board sensors, obstacle sensing disarmed
    pub fn new(
        temperature: DieTemperature<T>,
        accel: Mma7455<I>,
        light: LightSensor<L>,
        obstacle: &'static EdgeFlag,
    ) -> Self {
        Self {
            temperature,
            accel,
            light,
            obstacle,
            armed: false,
        }
    }

    /// Check if obstacle sensing is armed
    pub fn obstacle_armed(&self) -> bool {
        self.armed
    }
}

impl<T, I, L> SensorPort for BoardSensors<T, I, L>
where
    T: AdcReader,
    I: I2c,
    L: AdcReader,
{
    fn read_temperature_deci_celsius(&mut self) -> Result<i32, SensorError> {
        self.temperature.read_x10()
    }

    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError> {
        self.accel.read()
    }

    fn read_light(&mut self) -> Result<u32, SensorError> {
        self.light.read()
    }

    fn obstacle_threshold_event(&mut self) -> bool {
        let edge = self.obstacle.take();
        edge && self.armed
    }

    fn set_obstacle_armed(&mut self, armed: bool) {
        if armed && !self.armed {
            // Crossings seen while disarmed are stale
            self.obstacle.take();
        }
        self.armed = armed;
    }
}

/// Beacon LEDs, countdown digit and proximity bar behind one
/// [`IndicatorPort`]
pub struct BoardIndicators<P, const N: usize> {
    beacon_a: P,
    beacon_b: P,
    digit: SevenSegment<P>,
    bar: LedBar<P, N>,
}

impl<P: OutputPin, const N: usize> BoardIndicators<P, N> {
    /// Assemble the indicators with everything off
    pub fn new(beacon_a: P, beacon_b: P, digit: SevenSegment<P>, bar: LedBar<P, N>) -> Self {
        let mut indicators = Self {
            beacon_a,
            beacon_b,
            digit,
            bar,
        };
        indicators.set_channel(Channel::A, false);
        indicators.set_channel(Channel::B, false);
        indicators
    }

    /// Countdown digit
    pub fn digit(&self) -> &SevenSegment<P> {
        &self.digit
    }

    /// Proximity bar
    pub fn bar(&self) -> &LedBar<P, N> {
        &self.bar
    }
}

impl<P: OutputPin, const N: usize> IndicatorPort for BoardIndicators<P, N> {
    fn set_channel(&mut self, channel: Channel, on: bool) {
        let pin = match channel {
            Channel::A => &mut self.beacon_a,
            Channel::B => &mut self.beacon_b,
        };
        drive(pin, on, false);
    }

    fn set_seven_segment(&mut self, glyph: Glyph) {
        self.digit.show(glyph);
    }

    fn set_bar(&mut self, lit: u8) {
        self.bar.set(lit);
    }
}
