//! Mode definitions and the transition table
//!
//! Display, indicator and telemetry behavior is a function of the current
//! mode; the mode itself only changes through a row of [`TRANSITIONS`].

use super::events::Trigger;

/// Mission phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// On the pad, idle
    #[default]
    Stationary,
    /// Counting down to launch
    Countdown,
    /// In flight, acceleration monitored
    Launch,
    /// Returning, obstacle sensing armed
    Return,
}

impl Mode {
    /// All modes, in mission order
    pub const ALL: [Mode; 4] = [Mode::Stationary, Mode::Countdown, Mode::Launch, Mode::Return];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Stationary => "STATIONARY",
            Mode::Countdown => "COUNTDOWN",
            Mode::Launch => "LAUNCH",
            Mode::Return => "RETURN",
        }
    }

    /// Check if acceleration is sampled in this mode
    pub fn samples_acceleration(&self) -> bool {
        matches!(self, Mode::Launch)
    }

    /// Check if this mode emits periodic telemetry
    pub fn reports_telemetry(&self) -> bool {
        matches!(self, Mode::Launch | Mode::Return)
    }

    /// Find the table row for `trigger` in this mode
    pub fn lookup(self, trigger: Trigger) -> Option<&'static Transition> {
        TRANSITIONS
            .iter()
            .find(|t| t.from == self && t.trigger == trigger)
    }

    /// Process a trigger and return the next mode
    ///
    /// Triggers without a table row leave the mode unchanged.
    pub fn transition(self, trigger: Trigger) -> Self {
        self.lookup(trigger).map_or(self, |t| t.to)
    }
}

/// What a transition does to the obstacle sensor port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObstacleAction {
    /// Leave the port as it is
    Keep,
    /// Enable obstacle threshold events
    Arm,
    /// Disable obstacle threshold events
    Disarm,
}

/// Entry actions performed when a transition fires
///
/// Every transition also resets the gesture window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryActions {
    /// Reload the countdown counter
    pub reset_countdown: bool,
    /// Clear every raised warning
    pub clear_warnings: bool,
    /// Restart the telemetry cadence
    pub reset_cadence: bool,
    /// Blank the countdown glyph
    pub clear_glyph: bool,
    /// Obstacle port arming
    pub obstacle: ObstacleAction,
}

impl EntryActions {
    /// No entry actions
    pub const NONE: Self = Self {
        reset_countdown: false,
        clear_warnings: false,
        reset_cadence: false,
        clear_glyph: false,
        obstacle: ObstacleAction::Keep,
    };
}

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Mode,
    pub trigger: Trigger,
    pub to: Mode,
    pub actions: EntryActions,
}

/// The complete transition table
pub const TRANSITIONS: [Transition; 6] = [
    Transition {
        from: Mode::Stationary,
        trigger: Trigger::ToggleEdge,
        to: Mode::Countdown,
        actions: EntryActions {
            reset_countdown: true,
            ..EntryActions::NONE
        },
    },
    Transition {
        from: Mode::Countdown,
        trigger: Trigger::CountdownElapsed,
        to: Mode::Launch,
        // Counter reloads for the next cycle; obstacle port stays disarmed
        actions: EntryActions {
            reset_countdown: true,
            clear_warnings: true,
            reset_cadence: true,
            ..EntryActions::NONE
        },
    },
    Transition {
        from: Mode::Countdown,
        trigger: Trigger::TemperatureWarning,
        to: Mode::Stationary,
        actions: EntryActions {
            reset_countdown: true,
            clear_glyph: true,
            ..EntryActions::NONE
        },
    },
    Transition {
        from: Mode::Launch,
        trigger: Trigger::DoublePress,
        to: Mode::Return,
        actions: EntryActions {
            clear_warnings: true,
            reset_cadence: true,
            obstacle: ObstacleAction::Arm,
            ..EntryActions::NONE
        },
    },
    Transition {
        from: Mode::Launch,
        trigger: Trigger::SingleElapsed,
        to: Mode::Stationary,
        actions: EntryActions {
            clear_warnings: true,
            obstacle: ObstacleAction::Disarm,
            ..EntryActions::NONE
        },
    },
    Transition {
        from: Mode::Return,
        trigger: Trigger::ToggleEdge,
        to: Mode::Stationary,
        actions: EntryActions {
            clear_warnings: true,
            obstacle: ObstacleAction::Disarm,
            ..EntryActions::NONE
        },
    },
];
