//! RP2040 on-die temperature sensor
//!
//! The sensor is an ADC channel whose voltage falls ~1.721 mV per degree
//! from 0.706 V at 27°C:
//!
//! T = 27 - (V - 0.706) / 0.001721
//!
//! Integer-only: the conversion runs in microvolts.

use ascent_core::traits::SensorError;

use super::{AdcReader, ADC_MAX};

/// ADC reference voltage (µV)
const VREF_UV: i64 = 3_300_000;
/// Sensor voltage at 27°C (µV)
const V27_UV: i64 = 706_000;
/// Slope (µV per °C)
const SLOPE_UV: i64 = 1_721;

/// Conversions averaged per reading
const OVERSAMPLE: u32 = 4;

/// Readings outside this range are treated as a broken conversion (0.1°C)
const PLAUSIBLE_X10: core::ops::RangeInclusive<i32> = -400..=1250;

/// On-die temperature sensor
pub struct DieTemperature<ADC> {
    adc: ADC,
    /// Calibration offset added to every reading (0.1°C)
    offset_x10: i32,
}

impl<ADC> DieTemperature<ADC> {
    /// Create a sensor reading from `adc`
    pub fn new(adc: ADC) -> Self {
        Self { adc, offset_x10: 0 }
    }

    /// Apply a calibration offset (0.1°C)
    pub fn with_offset(mut self, offset_x10: i32) -> Self {
        self.offset_x10 = offset_x10;
        self
    }

    /// Convert a raw conversion to 0.1°C
    pub fn raw_to_temp_x10(raw: u16) -> i32 {
        let uv = raw as i64 * VREF_UV / ADC_MAX as i64;
        // 270 - (uv - V27) * 10 / slope, rounded to nearest
        let delta = (uv - V27_UV) * 10;
        let steps = if delta >= 0 {
            (delta + SLOPE_UV / 2) / SLOPE_UV
        } else {
            (delta - SLOPE_UV / 2) / SLOPE_UV
        };
        (270 - steps) as i32
    }
}

impl<ADC: AdcReader> DieTemperature<ADC> {
    /// Read the temperature in 0.1°C units
    pub fn read_x10(&mut self) -> Result<i32, SensorError> {
        let mut sum = 0u32;
        for _ in 0..OVERSAMPLE {
            let raw = self.adc.read().map_err(|_| SensorError::ConversionError)?;
            if raw == 0 || raw >= ADC_MAX {
                return Err(SensorError::OutOfRange);
            }
            sum += raw as u32;
        }

        let temp = Self::raw_to_temp_x10((sum / OVERSAMPLE) as u16) + self.offset_x10;
        if !PLAUSIBLE_X10.contains(&temp) {
            return Err(SensorError::OutOfRange);
        }
        Ok(temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::DummyAdc;

    // 0.706 V on a 3.3 V / 4095 scale
    const RAW_27C: u16 = 876;

    #[test]
    fn test_reference_point() {
        let t = DieTemperature::<DummyAdc>::raw_to_temp_x10(RAW_27C);
        assert!((t - 270).abs() <= 5, "got {}", t);
    }

    #[test]
    fn test_voltage_falls_as_temperature_rises() {
        let cool = DieTemperature::<DummyAdc>::raw_to_temp_x10(RAW_27C + 10);
        let warm = DieTemperature::<DummyAdc>::raw_to_temp_x10(RAW_27C - 10);
        assert!(warm > cool);
    }

    #[test]
    fn test_read_applies_offset() {
        let mut sensor = DieTemperature::new(DummyAdc(Ok(RAW_27C))).with_offset(-20);
        let t = sensor.read_x10().unwrap();
        assert!((t - 250).abs() <= 5);
    }

    #[test]
    fn test_rail_readings_rejected() {
        let mut sensor = DieTemperature::new(DummyAdc(Ok(0)));
        assert_eq!(sensor.read_x10(), Err(SensorError::OutOfRange));

        let mut sensor = DieTemperature::new(DummyAdc(Ok(ADC_MAX)));
        assert_eq!(sensor.read_x10(), Err(SensorError::OutOfRange));
    }

    #[test]
    fn test_adc_failure() {
        let mut sensor = DieTemperature::new(DummyAdc(Err(())));
        assert_eq!(sensor.read_x10(), Err(SensorError::ConversionError));
    }
}
