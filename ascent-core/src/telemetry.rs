//! Telemetry scheduling and line formatting
//!
//! Periodic status lines go out every `cadence` ticks of the telemetry
//! clock while the mode reports telemetry. Warning raise/clear lines are
//! edge-triggered and formatted here, but emitted by the sequencer.

use core::fmt::{self, Write};

use heapless::String;

use crate::clock::{Periodic, Tick};
use crate::config::SequencerConfig;
use crate::render::Fixed2;
use crate::safety::WarningKind;
use crate::sample::{AccelDeviation, Sample};
use crate::state::Mode;

/// Maximum telemetry line length (without CRLF)
pub const MAX_LINE_LEN: usize = 48;

/// One telemetry line
pub type TelemetryLine = String<MAX_LINE_LEN>;

/// Integer reading, or `--.--` when missing
struct Reading(Option<u32>);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("--.--"),
        }
    }
}

fn line(args: fmt::Arguments<'_>) -> TelemetryLine {
    let mut out = TelemetryLine::new();
    // Fixed formats always fit; a pathological value is cut short
    let _ = out.write_fmt(args);
    out
}

/// `LAUNCH T=20.00 AX=0.12 AY=-0.05`
pub fn launch_line(temperature_x10: Option<i32>, acceleration: Option<AccelDeviation>) -> TelemetryLine {
    line(format_args!(
        "LAUNCH T={} AX={} AY={}",
        Fixed2::deci(temperature_x10),
        Fixed2::milli(acceleration.map(|a| a.x_mg)),
        Fixed2::milli(acceleration.map(|a| a.y_mg)),
    ))
}

/// `RETURN LIGHT=512 OBSTACLE=NEAR`
pub fn return_line(light: Option<u32>, obstacle_near: bool) -> TelemetryLine {
    line(format_args!(
        "RETURN LIGHT={} OBSTACLE={}",
        Reading(light),
        if obstacle_near { "NEAR" } else { "CLEAR" },
    ))
}

/// Warning raise line for `kind`
pub fn warn_line(kind: WarningKind, sample: &Sample) -> TelemetryLine {
    match kind {
        WarningKind::Temperature => line(format_args!(
            "WARN TEMP {}",
            Fixed2::deci(sample.temperature_x10)
        )),
        WarningKind::Acceleration => line(format_args!(
            "WARN ACCEL X={} Y={}",
            Fixed2::milli(sample.acceleration.map(|a| a.x_mg)),
            Fixed2::milli(sample.acceleration.map(|a| a.y_mg)),
        )),
        WarningKind::Obstacle => line(format_args!("WARN OBSTACLE LIGHT={}", Reading(sample.light))),
    }
}

/// Warning clear line for `kind`
pub fn clear_line(kind: WarningKind) -> TelemetryLine {
    line(format_args!("CLEAR {}", kind.tag()))
}

/// Periodic telemetry cadence
#[derive(Debug, Clone)]
pub struct TelemetryScheduler {
    timer: Periodic,
    counter: u8,
    cadence: u8,
}

impl TelemetryScheduler {
    /// Create a scheduler with the configured tick and cadence
    pub fn new(config: &SequencerConfig, now: Tick) -> Self {
        Self {
            timer: Periodic::new(config.telemetry_tick_ms, now),
            counter: 0,
            cadence: config.telemetry_cadence.max(1),
        }
    }

    /// Ticks counted toward the next report
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Restart the cadence from zero
    pub fn reset(&mut self, now: Tick) {
        self.counter = 0;
        self.timer.restart(now);
    }

    /// Advance with elapsed ticks; true when the cadence rolled over
    ///
    /// Several rollovers caught up in one call still report once.
    pub fn poll(&mut self, now: Tick) -> bool {
        let ticks = self.timer.poll(now);
        let mut rolled = false;
        for _ in 0..ticks {
            self.counter += 1;
            if self.counter >= self.cadence {
                self.counter = 0;
                rolled = true;
            }
        }
        rolled
    }

    /// Periodic report for `mode`, if the cadence rolled over and the mode
    /// reports telemetry
    pub fn report(
        &mut self,
        now: Tick,
        mode: Mode,
        sample: &Sample,
        obstacle_near: bool,
    ) -> Option<TelemetryLine> {
        if !self.poll(now) {
            return None;
        }
        match mode {
            Mode::Launch => Some(launch_line(sample.temperature_x10, sample.acceleration)),
            Mode::Return => Some(return_line(sample.light, obstacle_near)),
            Mode::Stationary | Mode::Countdown => None,
        }
    }
}
