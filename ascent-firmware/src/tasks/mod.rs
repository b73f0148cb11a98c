//! Embassy async tasks
//!
//! Producers publish into the shared state in `channels`; the sequencer task
//! polls it; the transmit tasks drain the output channels.

pub mod buttons;
pub mod display_tx;
pub mod sequencer;
pub mod serial_tx;
pub mod tick;

pub use buttons::{button_task, obstacle_task};
pub use display_tx::display_tx_task;
pub use sequencer::{sequencer_task, BoardSequencer};
pub use serial_tx::serial_tx_task;
pub use tick::tick_task;
