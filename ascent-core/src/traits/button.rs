//! Button edge events

use crate::clock::Tick;

/// Logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Mode gesture button
    Toggle,
    /// Warning acknowledge button
    Acknowledge,
}

/// A press edge captured by the button interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    /// Which button
    pub button: Button,
    /// When the edge was captured
    pub at: Tick,
}

impl ButtonEvent {
    /// Toggle edge at `at`
    pub fn toggle(at: Tick) -> Self {
        Self {
            button: Button::Toggle,
            at,
        }
    }

    /// Acknowledge edge at `at`
    pub fn acknowledge(at: Tick) -> Self {
        Self {
            button: Button::Acknowledge,
            at,
        }
    }
}
