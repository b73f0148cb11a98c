//! Mode controller
//!
//! Owns the current mode, the countdown counter and the gesture gate, and
//! turns gestures, countdown ticks and the warning summary into table
//! transitions. Effects on other components (warnings, telemetry, ports)
//! are described by the returned [`Transition`]s and applied by the caller.

use heapless::Vec;

use super::events::Trigger;
use super::machine::{Mode, ObstacleAction, Transition};
use crate::clock::{Periodic, Tick};
use crate::config::SequencerConfig;
use crate::gesture::{DebounceGate, Gesture};
use crate::traits::Glyph;

/// Transitions fired by one controller call
pub type Transitions = Vec<Transition, 2>;

/// Warning state as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WarningSummary {
    /// Temperature warning raised
    pub temperature: bool,
    /// Any warning raised
    pub any: bool,
}

/// Countdown counter, reloaded to its start value and stepped down to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownCounter {
    value: u8,
    start: u8,
}

impl CountdownCounter {
    /// Create a counter loaded with `start`
    pub fn new(start: u8) -> Self {
        Self {
            value: start,
            start,
        }
    }

    /// Remaining count
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Reload the start value
    pub fn reset(&mut self) {
        self.value = self.start;
    }

    /// Step down by one; returns true when zero is reached
    pub fn step(&mut self) -> bool {
        self.value = self.value.saturating_sub(1);
        self.value == 0
    }

    /// Seven-segment glyph for the remaining count
    pub fn glyph(&self) -> Glyph {
        Glyph::Hex(self.value)
    }
}

/// Top-level mode state machine
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: Mode,
    countdown: CountdownCounter,
    countdown_timer: Periodic,
    gate: DebounceGate,
    obstacle_armed: bool,
}

impl ModeController {
    /// Create a controller in Stationary
    pub fn new(config: &SequencerConfig, now: Tick) -> Self {
        Self {
            mode: Mode::Stationary,
            countdown: CountdownCounter::new(config.countdown_start),
            countdown_timer: Periodic::new(config.countdown_period_ms, now),
            gate: DebounceGate::new(config.gesture_window_ms, config.edge_holdoff_ms),
            obstacle_armed: false,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Countdown counter
    pub fn countdown(&self) -> CountdownCounter {
        self.countdown
    }

    /// Whether the obstacle sensor should be armed
    pub fn obstacle_armed(&self) -> bool {
        self.obstacle_armed
    }

    /// Gesture gate
    pub fn gate(&self) -> &DebounceGate {
        &self.gate
    }

    /// Handle a Toggle edge captured at `at`
    ///
    /// A gesture window that elapsed before the edge is reported first, so
    /// up to two transitions can fire.
    pub fn on_toggle_edge(&mut self, at: Tick) -> Transitions {
        let mut fired = Transitions::new();

        if let Some(gesture) = self.gate.expire(at) {
            if let Some(t) = self.on_gesture(gesture, at) {
                let _ = fired.push(t);
            }
        }

        if let Some(gesture) = self.gate.on_edge(at) {
            if let Some(t) = self.on_gesture(gesture, at) {
                let _ = fired.push(t);
            }
        }

        fired
    }

    /// Periodic update: gesture expiry, countdown abort and countdown steps
    pub fn poll(&mut self, now: Tick, warnings: WarningSummary) -> Transitions {
        let mut fired = Transitions::new();

        if let Some(gesture) = self.gate.expire(now) {
            if let Some(t) = self.on_gesture(gesture, now) {
                let _ = fired.push(t);
            }
        }

        if self.mode != Mode::Countdown {
            return fired;
        }

        if warnings.temperature {
            if let Some(t) = self.fire(Trigger::TemperatureWarning, now) {
                let _ = fired.push(t);
            }
            return fired;
        }

        // Ticks that elapse while a warning is raised are skipped, not queued
        let ticks = self.countdown_timer.poll(now);
        if warnings.any {
            return fired;
        }

        for _ in 0..ticks {
            if self.countdown.step() {
                if let Some(t) = self.fire(Trigger::CountdownElapsed, now) {
                    let _ = fired.push(t);
                }
                break;
            }
        }

        fired
    }

    /// Interpret a gate report in the current mode
    fn on_gesture(&mut self, gesture: Gesture, now: Tick) -> Option<Transition> {
        let trigger = gesture_trigger(self.mode, gesture)?;
        self.fire(trigger, now)
    }

    /// Look up and apply a transition
    fn fire(&mut self, trigger: Trigger, now: Tick) -> Option<Transition> {
        let row = *self.mode.lookup(trigger)?;

        if row.actions.reset_countdown {
            self.countdown.reset();
        }
        match row.actions.obstacle {
            ObstacleAction::Arm => self.obstacle_armed = true,
            ObstacleAction::Disarm => self.obstacle_armed = false,
            ObstacleAction::Keep => {}
        }

        self.gate.reset();
        self.mode = row.to;

        if row.to == Mode::Countdown {
            // First step lands one full period after entry
            self.countdown_timer.restart(now);
        }

        Some(row)
    }
}

/// Map a gate report to a trigger for `mode`
///
/// Launch waits for the window to decide single vs. double; every other
/// mode treats any accepted edge as the gesture.
fn gesture_trigger(mode: Mode, gesture: Gesture) -> Option<Trigger> {
    match (mode, gesture) {
        (Mode::Launch, Gesture::Press { .. }) => None,
        (Mode::Launch, Gesture::DoublePress) => Some(Trigger::DoublePress),
        (Mode::Launch, Gesture::WindowElapsed { count: 1 }) => Some(Trigger::SingleElapsed),
        (_, Gesture::WindowElapsed { .. }) => None,
        (_, Gesture::Press { .. } | Gesture::DoublePress) => Some(Trigger::ToggleEdge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: WarningSummary = WarningSummary {
        temperature: false,
        any: false,
    };

    fn controller() -> ModeController {
        ModeController::new(&SequencerConfig::default(), Tick(0))
    }

    /// Drive a controller from Stationary into Launch
    fn launched() -> (ModeController, Tick) {
        let mut c = controller();
        c.on_toggle_edge(Tick(0));
        let fired = c.poll(Tick(15_000), CLEAR);
        assert_eq!(fired.len(), 1);
        assert_eq!(c.mode(), Mode::Launch);
        (c, Tick(15_000))
    }

    #[test]
    fn test_toggle_starts_countdown() {
        let mut c = controller();
        let fired = c.on_toggle_edge(Tick(10));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].to, Mode::Countdown);
        assert_eq!(c.mode(), Mode::Countdown);
        assert_eq!(c.countdown().value(), 15);
        assert_eq!(c.gate().count(), 0);
    }

    #[test]
    fn test_countdown_steps_once_per_second() {
        let mut c = controller();
        c.on_toggle_edge(Tick(0));

        assert!(c.poll(Tick(999), CLEAR).is_empty());
        assert_eq!(c.countdown().value(), 15);

        c.poll(Tick(1000), CLEAR);
        assert_eq!(c.countdown().value(), 14);

        c.poll(Tick(3500), CLEAR);
        assert_eq!(c.countdown().value(), 12);
        assert_eq!(c.mode(), Mode::Countdown);
    }

    #[test]
    fn test_countdown_reaches_launch_on_fifteenth_tick() {
        let mut c = controller();
        c.on_toggle_edge(Tick(0));
        for s in 1..15u32 {
            assert!(c.poll(Tick(s * 1000), CLEAR).is_empty());
        }
        assert_eq!(c.countdown().value(), 1);

        let fired = c.poll(Tick(15_000), CLEAR);
        assert_eq!(fired[0].trigger, Trigger::CountdownElapsed);
        assert_eq!(c.mode(), Mode::Launch);
        // Reloaded for the next cycle
        assert_eq!(c.countdown().value(), 15);
        assert!(!c.obstacle_armed());
    }

    #[test]
    fn test_temperature_aborts_countdown() {
        let mut c = controller();
        c.on_toggle_edge(Tick(0));
        c.poll(Tick(5000), CLEAR);
        assert_eq!(c.countdown().value(), 10);

        let hot = WarningSummary {
            temperature: true,
            any: true,
        };
        let fired = c.poll(Tick(5100), hot);
        assert_eq!(fired[0].trigger, Trigger::TemperatureWarning);
        assert_eq!(c.mode(), Mode::Stationary);
        assert_eq!(c.countdown().value(), 15);
    }

    #[test]
    fn test_other_warning_pauses_countdown() {
        let mut c = controller();
        c.on_toggle_edge(Tick(0));
        let other = WarningSummary {
            temperature: false,
            any: true,
        };
        c.poll(Tick(3000), other);
        assert_eq!(c.countdown().value(), 15);

        c.poll(Tick(4000), CLEAR);
        assert_eq!(c.countdown().value(), 14);
    }

    #[test]
    fn test_double_press_in_launch_enters_return() {
        let (mut c, t) = launched();
        assert!(c.on_toggle_edge(t.after(100)).is_empty());
        let fired = c.on_toggle_edge(t.after(400));
        assert_eq!(fired[0].to, Mode::Return);
        assert_eq!(c.mode(), Mode::Return);
        assert!(c.obstacle_armed());
    }

    #[test]
    fn test_single_press_in_launch_returns_to_stationary() {
        let (mut c, t) = launched();
        c.on_toggle_edge(t.after(100));
        assert!(c.poll(t.after(1099), CLEAR).is_empty());
        assert_eq!(c.mode(), Mode::Launch);

        let fired = c.poll(t.after(1100), CLEAR);
        assert_eq!(fired[0].trigger, Trigger::SingleElapsed);
        assert_eq!(c.mode(), Mode::Stationary);
    }

    #[test]
    fn test_late_second_edge_reports_elapse_first() {
        let (mut c, t) = launched();
        c.on_toggle_edge(t.after(100));
        // No poll in between: the window elapsed before this edge
        let fired = c.on_toggle_edge(t.after(1200));
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].to, Mode::Stationary);
        assert_eq!(fired[1].to, Mode::Countdown);
    }

    #[test]
    fn test_return_toggle_disarms_obstacle() {
        let (mut c, t) = launched();
        c.on_toggle_edge(t.after(100));
        c.on_toggle_edge(t.after(300));
        assert_eq!(c.mode(), Mode::Return);

        let fired = c.on_toggle_edge(t.after(2000));
        assert_eq!(fired[0].to, Mode::Stationary);
        assert!(!c.obstacle_armed());
    }

    #[test]
    fn test_toggle_ignored_during_countdown() {
        let mut c = controller();
        c.on_toggle_edge(Tick(0));
        assert!(c.on_toggle_edge(Tick(500)).is_empty());
        assert!(c.on_toggle_edge(Tick(700)).is_empty());
        assert_eq!(c.mode(), Mode::Countdown);
        // Window reports in Countdown never fire anything
        assert!(c.poll(Tick(999), CLEAR).is_empty());
    }
}
