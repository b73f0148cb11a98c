//! Warning monitor
//!
//! Evaluates temperature, acceleration and obstacle readings against their
//! thresholds. Each category is independent: raised by its own threshold,
//! announced once per raise (`message_shown`), and cleared only by the
//! acknowledge gesture or a mode transition.
//!
//! An acknowledged category stays quiet until its reading has been back on
//! the normal side of the threshold, so a reading that stays out of range
//! does not re-raise immediately. A transition clear, or a category that is
//! no longer sampled, starts fresh.

use heapless::Vec;

use crate::config::SequencerConfig;
use crate::sample::Sample;
use crate::state::{Mode, WarningSummary};
use crate::traits::Channel;

/// Warning categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WarningKind {
    Temperature,
    Acceleration,
    Obstacle,
}

impl WarningKind {
    /// All categories, in rendering precedence order
    pub const ALL: [WarningKind; 3] = [
        WarningKind::Temperature,
        WarningKind::Acceleration,
        WarningKind::Obstacle,
    ];

    /// Beacon channel paired with this category
    pub fn channel(&self) -> Channel {
        match self {
            WarningKind::Temperature => Channel::B,
            WarningKind::Acceleration | WarningKind::Obstacle => Channel::A,
        }
    }

    /// Temperature owns the primary warning line
    pub fn is_primary(&self) -> bool {
        matches!(self, WarningKind::Temperature)
    }

    /// Short telemetry tag
    pub fn tag(&self) -> &'static str {
        match self {
            WarningKind::Temperature => "TEMP",
            WarningKind::Acceleration => "ACCEL",
            WarningKind::Obstacle => "OBSTACLE",
        }
    }

    fn index(&self) -> usize {
        match self {
            WarningKind::Temperature => 0,
            WarningKind::Acceleration => 1,
            WarningKind::Obstacle => 2,
        }
    }
}

/// Set of warning categories
pub type WarningSet = Vec<WarningKind, 3>;

/// Per-category warning state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WarningState {
    raised: bool,
    message_shown: bool,
    /// Reading has been normal since the last clear
    rearmed: bool,
}

impl Default for WarningState {
    fn default() -> Self {
        Self {
            raised: false,
            message_shown: false,
            rearmed: true,
        }
    }
}

impl WarningState {
    /// Check if the warning is raised
    pub fn raised(&self) -> bool {
        self.raised
    }

    /// Check if the raise has been announced
    pub fn message_shown(&self) -> bool {
        self.message_shown
    }

    /// Feed a threshold comparison; returns true on a new raise
    fn update(&mut self, over: bool) -> bool {
        if !over {
            self.rearmed = true;
            return false;
        }
        if self.raised || !self.rearmed {
            return false;
        }
        self.raised = true;
        self.message_shown = false;
        self.rearmed = false;
        true
    }

    fn clear(&mut self) {
        self.raised = false;
        self.message_shown = false;
    }

    fn rearm(&mut self) {
        self.rearmed = true;
    }
}

/// Warning monitor for the three sensor categories
#[derive(Debug, Clone)]
pub struct WarningMonitor {
    states: [WarningState; 3],
    temp_high_x10: i32,
    temp_hysteresis_x10: i32,
    accel_threshold_mg: i32,
    obstacle_near_light: u32,
    /// Last obstacle verdict from a threshold event
    obstacle_near: bool,
    /// Obstacle must be checked without waiting for a threshold event
    obstacle_check_pending: bool,
}

impl WarningMonitor {
    /// Create a monitor with thresholds from `config`
    pub fn new(config: &SequencerConfig) -> Self {
        Self {
            states: [WarningState::default(); 3],
            temp_high_x10: config.temp_high_x10,
            temp_hysteresis_x10: config.temp_hysteresis_x10,
            accel_threshold_mg: config.accel_threshold_mg,
            obstacle_near_light: config.obstacle_near_light,
            obstacle_near: false,
            obstacle_check_pending: false,
        }
    }

    /// State of one category
    pub fn state(&self, kind: WarningKind) -> WarningState {
        self.states[kind.index()]
    }

    /// Check if a category is raised
    pub fn is_raised(&self, kind: WarningKind) -> bool {
        self.states[kind.index()].raised
    }

    /// Check if any category is raised
    pub fn any_raised(&self) -> bool {
        self.states.iter().any(|s| s.raised)
    }

    /// Summary for the mode controller
    pub fn summary(&self) -> WarningSummary {
        WarningSummary {
            temperature: self.is_raised(WarningKind::Temperature),
            any: self.any_raised(),
        }
    }

    /// Last obstacle verdict (false while disarmed)
    pub fn obstacle_near(&self) -> bool {
        self.obstacle_near
    }

    /// Obstacle sensing was just armed: check proximity on the next
    /// evaluation instead of waiting for a crossing
    pub fn obstacle_armed(&mut self) {
        self.obstacle_check_pending = true;
    }

    /// Evaluate one iteration's readings
    ///
    /// Acceleration is only considered in modes that sample it; obstacle
    /// only while `obstacle_armed`; a category that is not sampled is
    /// re-armed. Faulted or missing readings neither raise nor re-arm.
    /// Returns the categories raised by this call.
    pub fn evaluate(&mut self, mode: Mode, obstacle_armed: bool, sample: &Sample) -> WarningSet {
        let mut raised = WarningSet::new();

        if let Some(t) = sample.temperature_x10 {
            let state = &mut self.states[WarningKind::Temperature.index()];
            if t > self.temp_high_x10 {
                if state.update(true) {
                    let _ = raised.push(WarningKind::Temperature);
                }
            } else if t <= self.temp_high_x10.saturating_sub(self.temp_hysteresis_x10) {
                state.update(false);
            }
        }

        let state = &mut self.states[WarningKind::Acceleration.index()];
        if !mode.samples_acceleration() {
            state.rearm();
        } else if let Some(dev) = sample.acceleration {
            if state.update(dev.exceeds(self.accel_threshold_mg)) {
                let _ = raised.push(WarningKind::Acceleration);
            }
        }

        if !obstacle_armed {
            self.obstacle_near = false;
            self.obstacle_check_pending = false;
            self.states[WarningKind::Obstacle.index()].rearm();
        } else if sample.obstacle_event || self.obstacle_check_pending {
            if let Some(light) = sample.light {
                self.obstacle_check_pending = false;
                self.obstacle_near = light >= self.obstacle_near_light;
                if self.states[WarningKind::Obstacle.index()].update(self.obstacle_near) {
                    let _ = raised.push(WarningKind::Obstacle);
                }
            }
        }

        raised
    }

    /// Raised categories not yet announced, marking them announced
    pub fn take_unannounced(&mut self) -> WarningSet {
        let mut pending = WarningSet::new();
        for kind in WarningKind::ALL {
            let state = &mut self.states[kind.index()];
            if state.raised && !state.message_shown {
                state.message_shown = true;
                let _ = pending.push(kind);
            }
        }
        pending
    }

    /// Transition clear: every category is cleared and may raise again on
    /// its next out-of-range reading. Returns what was raised.
    pub fn clear_all(&mut self) -> WarningSet {
        let cleared = self.clear_raised();
        for state in &mut self.states {
            state.rearm();
        }
        cleared
    }

    /// Acknowledge gesture: clears all raised categories at once
    ///
    /// No effect when nothing is raised. A reading still out of range does
    /// not re-raise until it has returned to normal.
    pub fn acknowledge(&mut self) -> WarningSet {
        self.clear_raised()
    }

    fn clear_raised(&mut self) -> WarningSet {
        let mut cleared = WarningSet::new();
        for kind in WarningKind::ALL {
            let state = &mut self.states[kind.index()];
            if state.raised {
                state.clear();
                let _ = cleared.push(kind);
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::AccelDeviation;

    fn monitor() -> WarningMonitor {
        WarningMonitor::new(&SequencerConfig::default())
    }

    fn temp(t: i32) -> Sample {
        Sample {
            temperature_x10: Some(t),
            ..Sample::default()
        }
    }

    fn accel(x_mg: i32, y_mg: i32) -> Sample {
        Sample {
            temperature_x10: Some(200),
            acceleration: Some(AccelDeviation { x_mg, y_mg, z_mg: 1000 }),
            ..Sample::default()
        }
    }

    #[test]
    fn test_normal_operation() {
        let mut m = monitor();
        assert!(m.evaluate(Mode::Stationary, false, &temp(200)).is_empty());
        assert!(!m.any_raised());
    }

    #[test]
    fn test_temperature_threshold_is_strict() {
        let mut m = monitor();
        assert!(m.evaluate(Mode::Launch, false, &temp(350)).is_empty());
        let raised = m.evaluate(Mode::Launch, false, &temp(351));
        assert_eq!(raised.as_slice(), &[WarningKind::Temperature]);
        assert!(m.summary().temperature);
    }

    #[test]
    fn test_raise_reported_once() {
        let mut m = monitor();
        assert_eq!(m.evaluate(Mode::Launch, false, &temp(400)).len(), 1);
        assert!(m.evaluate(Mode::Launch, false, &temp(400)).is_empty());
        assert!(m.is_raised(WarningKind::Temperature));
    }

    #[test]
    fn test_raised_is_latched_until_cleared() {
        let mut m = monitor();
        m.evaluate(Mode::Launch, false, &temp(400));
        m.evaluate(Mode::Launch, false, &temp(200));
        assert!(m.is_raised(WarningKind::Temperature));
    }

    #[test]
    fn test_acknowledge_clears_all() {
        let mut m = monitor();
        m.evaluate(Mode::Launch, false, &temp(400));
        m.evaluate(Mode::Launch, false, &accel(500, 0));
        assert!(m.is_raised(WarningKind::Acceleration));

        let cleared = m.acknowledge();
        assert_eq!(
            cleared.as_slice(),
            &[WarningKind::Temperature, WarningKind::Acceleration]
        );
        assert!(!m.any_raised());
        assert!(!m.state(WarningKind::Temperature).message_shown());
    }

    #[test]
    fn test_acknowledge_without_warning_is_noop() {
        let mut m = monitor();
        assert!(m.acknowledge().is_empty());
        assert!(!m.any_raised());
    }

    #[test]
    fn test_rearm_requires_hysteresis() {
        let mut m = monitor();
        m.evaluate(Mode::Launch, false, &temp(400));
        m.acknowledge();

        // Still hot: stays cleared
        assert!(m.evaluate(Mode::Launch, false, &temp(400)).is_empty());
        // Inside the hysteresis band: still not re-armed
        m.evaluate(Mode::Launch, false, &temp(348));
        assert!(m.evaluate(Mode::Launch, false, &temp(400)).is_empty());
        // Back below the band, then hot again
        m.evaluate(Mode::Launch, false, &temp(345));
        assert_eq!(m.evaluate(Mode::Launch, false, &temp(400)).len(), 1);
    }

    #[test]
    fn test_fault_neither_raises_nor_rearms() {
        let mut m = monitor();
        m.evaluate(Mode::Launch, false, &temp(400));
        m.acknowledge();
        m.evaluate(Mode::Launch, false, &Sample::default());
        assert!(m.evaluate(Mode::Launch, false, &temp(400)).is_empty());
    }

    #[test]
    fn test_acceleration_only_in_launch() {
        let mut m = monitor();
        assert!(m.evaluate(Mode::Stationary, false, &accel(900, 0)).is_empty());
        let raised = m.evaluate(Mode::Launch, false, &accel(0, -400));
        assert_eq!(raised.as_slice(), &[WarningKind::Acceleration]);
    }

    #[test]
    fn test_obstacle_needs_arming_and_event() {
        let mut m = monitor();
        let near = Sample {
            light: Some(900),
            obstacle_event: true,
            ..Sample::default()
        };
        assert!(m.evaluate(Mode::Return, false, &near).is_empty());
        assert!(!m.obstacle_near());

        let quiet = Sample {
            light: Some(900),
            ..Sample::default()
        };
        assert!(m.evaluate(Mode::Return, true, &quiet).is_empty());

        let raised = m.evaluate(Mode::Return, true, &near);
        assert_eq!(raised.as_slice(), &[WarningKind::Obstacle]);
        assert!(m.obstacle_near());
    }

    #[test]
    fn test_obstacle_checked_on_arming() {
        let mut m = monitor();
        m.obstacle_armed();
        let near = Sample {
            light: Some(700),
            ..Sample::default()
        };
        assert_eq!(m.evaluate(Mode::Return, true, &near).len(), 1);
    }

    #[test]
    fn test_obstacle_clears_on_disarm() {
        let mut m = monitor();
        m.obstacle_armed();
        let near = Sample {
            light: Some(700),
            ..Sample::default()
        };
        m.evaluate(Mode::Return, true, &near);
        assert!(m.obstacle_near());
        m.evaluate(Mode::Stationary, false, &near);
        assert!(!m.obstacle_near());
    }

    #[test]
    fn test_unannounced_taken_once() {
        let mut m = monitor();
        m.evaluate(Mode::Launch, false, &temp(400));
        assert_eq!(m.take_unannounced().as_slice(), &[WarningKind::Temperature]);
        assert!(m.take_unannounced().is_empty());
        assert!(m.state(WarningKind::Temperature).message_shown());
    }

    #[test]
    fn test_extreme_thresholds_do_not_overflow() {
        let config = SequencerConfig {
            temp_high_x10: i32::MIN + 1,
            temp_hysteresis_x10: i32::MAX,
            ..SequencerConfig::new()
        };
        let mut m = WarningMonitor::new(&config);
        assert_eq!(m.evaluate(Mode::Launch, false, &temp(i32::MAX)).len(), 1);
        assert!(m.evaluate(Mode::Launch, false, &temp(i32::MIN)).is_empty());
    }

    #[test]
    fn test_transition_clear_rearms() {
        let mut m = monitor();
        m.evaluate(Mode::Launch, false, &temp(400));
        m.clear_all();
        assert_eq!(m.evaluate(Mode::Launch, false, &temp(400)).len(), 1);
    }

    #[test]
    fn test_acceleration_rearms_outside_launch() {
        let mut m = monitor();
        m.evaluate(Mode::Launch, false, &accel(500, 0));
        m.acknowledge();
        assert!(m.evaluate(Mode::Launch, false, &accel(500, 0)).is_empty());

        m.evaluate(Mode::Stationary, false, &accel(500, 0));
        let raised = m.evaluate(Mode::Launch, false, &accel(500, 0));
        assert_eq!(raised.as_slice(), &[WarningKind::Acceleration]);
    }

    #[test]
    fn test_obstacle_rearms_when_disarmed() {
        let mut m = monitor();
        let near = Sample {
            light: Some(900),
            ..Sample::default()
        };
        m.obstacle_armed();
        assert_eq!(m.evaluate(Mode::Return, true, &near).len(), 1);
        m.acknowledge();

        m.evaluate(Mode::Stationary, false, &near);
        m.obstacle_armed();
        assert_eq!(m.evaluate(Mode::Return, true, &near).len(), 1);
    }

    #[test]
    fn test_channel_pairing() {
        assert_eq!(WarningKind::Temperature.channel(), Channel::B);
        assert_eq!(WarningKind::Acceleration.channel(), Channel::A);
        assert_eq!(WarningKind::Obstacle.channel(), Channel::A);
    }
}
