//! Photodiode light channel
//!
//! Scales a 12-bit conversion to `0..=full_scale` light units.

use ascent_core::traits::SensorError;

use super::{AdcReader, ADC_MAX};

/// Light/proximity sensor on an ADC channel
pub struct LightSensor<ADC> {
    adc: ADC,
    full_scale: u32,
    /// Brighter light pulls the pin low
    inverted: bool,
}

impl<ADC> LightSensor<ADC> {
    /// Create a sensor that reports `0..=full_scale`
    pub fn new(adc: ADC, full_scale: u32) -> Self {
        Self {
            adc,
            full_scale,
            inverted: false,
        }
    }

    /// Create a sensor whose output voltage falls with light
    pub fn new_inverted(adc: ADC, full_scale: u32) -> Self {
        Self {
            adc,
            full_scale,
            inverted: true,
        }
    }

    fn scale(&self, raw: u16) -> u32 {
        let raw = raw.min(ADC_MAX);
        let raw = if self.inverted { ADC_MAX - raw } else { raw };
        (raw as u64 * self.full_scale as u64 / ADC_MAX as u64) as u32
    }
}

impl<ADC: AdcReader> LightSensor<ADC> {
    /// Read the light level
    pub fn read(&mut self) -> Result<u32, SensorError> {
        let raw = self.adc.read().map_err(|_| SensorError::ConversionError)?;
        Ok(self.scale(raw))
    }
}
