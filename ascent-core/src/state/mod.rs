//! Mode state machine
//!
//! Defines the authoritative mission-phase behavior. The machine is
//! explicit, finite and deterministic: transitions are rows in a constant
//! table, and anything not in the table leaves the mode unchanged.

pub mod controller;
pub mod events;
pub mod machine;

pub use controller::{CountdownCounter, ModeController, Transitions, WarningSummary};
pub use events::Trigger;
pub use machine::{EntryActions, Mode, ObstacleAction, Transition, TRANSITIONS};
