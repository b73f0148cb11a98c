//! Sensor readings gathered once per poll iteration

use crate::config::SequencerConfig;
use crate::traits::Acceleration;

/// Acceleration deviation from the calibrated rest position (milli-g)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDeviation {
    pub x_mg: i32,
    pub y_mg: i32,
    pub z_mg: i32,
}

impl AccelDeviation {
    /// Convert raw counts using the configured scale and constant offset
    pub fn from_raw(raw: Acceleration, config: &SequencerConfig) -> Self {
        let scale = config.accel_counts_per_g.max(1);
        let axis = |value: i8, offset: i8| (value as i32 - offset as i32) * 1000 / scale;
        Self {
            x_mg: axis(raw.x, config.accel_offset[0]),
            y_mg: axis(raw.y, config.accel_offset[1]),
            z_mg: axis(raw.z, config.accel_offset[2]),
        }
    }

    /// Check whether X or Y deviates by at least `threshold_mg`
    pub fn exceeds(&self, threshold_mg: i32) -> bool {
        self.x_mg.abs() >= threshold_mg || self.y_mg.abs() >= threshold_mg
    }
}

/// One poll iteration's readings
///
/// `None` means the sensor was not sampled this iteration or reported a
/// fault; either way nothing may be concluded from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Temperature (0.1°C)
    pub temperature_x10: Option<i32>,
    /// Acceleration deviation, only sampled in Launch
    pub acceleration: Option<AccelDeviation>,
    /// Light/proximity intensity
    pub light: Option<u32>,
    /// An obstacle threshold crossing was reported since the last poll
    pub obstacle_event: bool,
}
