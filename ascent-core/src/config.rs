//! Compiled-in tunables
//!
//! Thresholds, window lengths and periods. There is no persistence; the
//! firmware builds a `SequencerConfig` at boot and hands it to the sequencer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Over-temperature threshold (0.1°C units)
pub const TEMP_HIGH_X10: i32 = 350;
/// Temperature must drop this far below the threshold to re-arm (0.1°C units)
pub const TEMP_HYSTERESIS_X10: i32 = 5;
/// Acceleration deviation threshold on X or Y (milli-g)
pub const ACCEL_THRESHOLD_MG: i32 = 400;
/// Accelerometer counts per g (8-bit output, ±2 g range)
pub const ACCEL_COUNTS_PER_G: i32 = 64;
/// Light reading at or above which an obstacle counts as near
pub const OBSTACLE_NEAR_LIGHT: u32 = 600;
/// Light reading that lights the whole proximity bar
pub const LIGHT_FULL_SCALE: u32 = 1000;
/// LEDs in the proximity bar
pub const BAR_SEGMENTS: u8 = 16;

/// Gesture window after the first Toggle edge (ms)
pub const GESTURE_WINDOW_MS: u32 = 1000;
/// Edges closer than this to the previous accepted edge are bounce (ms)
pub const EDGE_HOLDOFF_MS: u32 = 30;
/// Countdown start value (shown as a hex digit)
pub const COUNTDOWN_START: u8 = 15;
/// Countdown step period (ms)
pub const COUNTDOWN_PERIOD_MS: u32 = 1000;
/// Beacon blink period (ms)
pub const BEACON_PERIOD_MS: u32 = 333;
/// Telemetry cadence tick period (ms)
pub const TELEMETRY_TICK_MS: u32 = 1000;
/// Telemetry cadence ticks per periodic report
pub const TELEMETRY_CADENCE: u8 = 10;

/// Sequencer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SequencerConfig {
    /// Temperature warning threshold (0.1°C, strictly above raises)
    pub temp_high_x10: i32,
    /// Re-arm hysteresis below the threshold (0.1°C)
    pub temp_hysteresis_x10: i32,
    /// Acceleration warning threshold (milli-g, at or above raises)
    pub accel_threshold_mg: i32,
    /// Accelerometer scale
    pub accel_counts_per_g: i32,
    /// Constant accelerometer offset subtracted from raw X/Y/Z counts
    pub accel_offset: [i8; 3],
    /// Obstacle near threshold on the light reading
    pub obstacle_near_light: u32,
    /// Light reading mapped to a full proximity bar
    pub light_full_scale: u32,
    /// Number of LEDs in the proximity bar
    pub bar_segments: u8,
    /// Gesture window (ms)
    pub gesture_window_ms: u32,
    /// Bounce hold-off (ms)
    pub edge_holdoff_ms: u32,
    /// Countdown start value
    pub countdown_start: u8,
    /// Countdown step period (ms)
    pub countdown_period_ms: u32,
    /// Beacon period (ms)
    pub beacon_period_ms: u32,
    /// Telemetry tick period (ms)
    pub telemetry_tick_ms: u32,
    /// Telemetry ticks per report
    pub telemetry_cadence: u8,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SequencerConfig {
    /// Default configuration
    pub const fn new() -> Self {
        Self {
            temp_high_x10: TEMP_HIGH_X10,
            temp_hysteresis_x10: TEMP_HYSTERESIS_X10,
            accel_threshold_mg: ACCEL_THRESHOLD_MG,
            accel_counts_per_g: ACCEL_COUNTS_PER_G,
            accel_offset: [0; 3],
            obstacle_near_light: OBSTACLE_NEAR_LIGHT,
            light_full_scale: LIGHT_FULL_SCALE,
            bar_segments: BAR_SEGMENTS,
            gesture_window_ms: GESTURE_WINDOW_MS,
            edge_holdoff_ms: EDGE_HOLDOFF_MS,
            countdown_start: COUNTDOWN_START,
            countdown_period_ms: COUNTDOWN_PERIOD_MS,
            beacon_period_ms: BEACON_PERIOD_MS,
            telemetry_tick_ms: TELEMETRY_TICK_MS,
            telemetry_cadence: TELEMETRY_CADENCE,
        }
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gesture_window_ms == 0
            || self.countdown_period_ms == 0
            || self.beacon_period_ms == 0
            || self.telemetry_tick_ms == 0
        {
            return Err(ConfigError::ZeroPeriod);
        }

        if self.edge_holdoff_ms >= self.gesture_window_ms {
            return Err(ConfigError::HoldoffExceedsWindow);
        }

        // The counter is shown as a single hex digit
        if self.countdown_start == 0 || self.countdown_start > 15 {
            return Err(ConfigError::CountdownOutOfRange);
        }

        if self.accel_counts_per_g <= 0 || self.light_full_scale == 0 {
            return Err(ConfigError::InvalidScale);
        }

        if self.telemetry_cadence == 0 {
            return Err(ConfigError::ZeroCadence);
        }

        if self.temp_hysteresis_x10 < 0 {
            return Err(ConfigError::NegativeHysteresis);
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timer period is zero
    ZeroPeriod,
    /// Bounce hold-off is not shorter than the gesture window
    HoldoffExceedsWindow,
    /// Countdown start is not a single hex digit
    CountdownOutOfRange,
    /// A sensor scale is zero or negative
    InvalidScale,
    /// Telemetry cadence is zero
    ZeroCadence,
    /// Temperature hysteresis is negative
    NegativeHysteresis,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ConfigError::ZeroPeriod => "timer period must be non-zero",
            ConfigError::HoldoffExceedsWindow => "edge hold-off must be shorter than gesture window",
            ConfigError::CountdownOutOfRange => "countdown start must be 1..=15",
            ConfigError::InvalidScale => "sensor scale must be positive",
            ConfigError::ZeroCadence => "telemetry cadence must be non-zero",
            ConfigError::NegativeHysteresis => "temperature hysteresis must not be negative",
        };
        f.write_str(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SequencerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_period_rejected() {
        let cfg = SequencerConfig {
            beacon_period_ms: 0,
            ..SequencerConfig::new()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroPeriod));
    }

    #[test]
    fn test_countdown_must_fit_one_digit() {
        let cfg = SequencerConfig {
            countdown_start: 16,
            ..SequencerConfig::new()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::CountdownOutOfRange));
    }

    #[test]
    fn test_holdoff_shorter_than_window() {
        let cfg = SequencerConfig {
            edge_holdoff_ms: 1000,
            ..SequencerConfig::new()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::HoldoffExceedsWindow));
    }
}
