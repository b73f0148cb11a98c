//! Board-agnostic core logic for the mission-phase sequencer
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Port traits for sensors, display, indicators and serial telemetry
//! - Millisecond tick clock and non-blocking timer schedules
//! - Toggle-button gesture detection
//! - Table-driven mode state machine
//! - Warning monitoring and alert beacon patterns
//! - Telemetry cadence and line formatting
//! - The poll-loop sequencer tying it all together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod clock;
pub mod config;
pub mod gesture;
pub mod render;
pub mod safety;
pub mod sample;
pub mod sequencer;
pub mod shared;
pub mod state;
pub mod telemetry;
pub mod traits;

#[cfg(test)]
mod mock;

pub use clock::{Tick, TickClock};
pub use config::SequencerConfig;
pub use sequencer::{Ports, Sequencer};
pub use state::Mode;
