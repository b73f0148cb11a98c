//! Alert beacon blink patterns
//!
//! Two channels, stepped by a 333 ms periodic tick:
//! - one category raised: its channel blinks at 50 % duty
//! - both raised: A-on, A-off, B-on, B-off, repeating
//! - none raised: both off

use crate::clock::{Periodic, Tick};

/// Channel states after a beacon step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeaconOutput {
    pub a: bool,
    pub b: bool,
}

impl BeaconOutput {
    /// Both channels off
    pub const OFF: Self = Self { a: false, b: false };
}

/// Dual-channel blink generator
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertBeacon {
    timer: Periodic,
    phase: u8,
    dual: bool,
    output: BeaconOutput,
}

impl AlertBeacon {
    /// Create a beacon with both channels off
    pub fn new(period_ms: u32, now: Tick) -> Self {
        Self {
            timer: Periodic::new(period_ms, now),
            phase: 0,
            dual: false,
            output: BeaconOutput::OFF,
        }
    }

    /// Current phase (0..=3 in the dual pattern, 0..=1 otherwise)
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Current channel states
    pub fn output(&self) -> BeaconOutput {
        self.output
    }

    /// Turn both channels off and restart the pattern
    pub fn reset(&mut self) {
        self.phase = 0;
        self.dual = false;
        self.output = BeaconOutput::OFF;
    }

    /// Advance by the ticks elapsed since the last poll
    ///
    /// `a_raised` / `b_raised` are the categories paired with each channel.
    /// Returns the new output when at least one tick elapsed.
    pub fn poll(&mut self, now: Tick, a_raised: bool, b_raised: bool) -> Option<BeaconOutput> {
        let ticks = self.timer.poll(now);
        if ticks == 0 {
            return None;
        }
        for _ in 0..ticks {
            self.step(a_raised, b_raised);
        }
        Some(self.output)
    }

    /// One beacon tick
    pub fn step(&mut self, a_raised: bool, b_raised: bool) -> BeaconOutput {
        match (a_raised, b_raised) {
            (false, false) => self.reset(),
            (true, true) => {
                if !self.dual {
                    // Start the cycle from a clean slate
                    self.dual = true;
                    self.phase = 0;
                }
                self.output = match self.phase {
                    0 => BeaconOutput { a: true, b: false },
                    2 => BeaconOutput { a: false, b: true },
                    _ => BeaconOutput::OFF,
                };
                self.phase = (self.phase + 1) % 4;
            }
            (a, b) => {
                if self.dual {
                    self.dual = false;
                    self.phase = 0;
                    self.output = BeaconOutput::OFF;
                }
                let on = self.phase == 0;
                self.output = BeaconOutput {
                    a: a && on,
                    b: b && on,
                };
                self.phase = (self.phase + 1) % 2;
            }
        }
        self.output
    }
}
