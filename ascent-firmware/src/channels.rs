//! Shared state between tasks and interrupt-driven producers
//!
//! Producers (tick, buttons, obstacle edge) publish into the core's shared
//! primitives; the sequencer task consumes them once per poll iteration.
//! Display and telemetry output leave through bounded embassy-sync channels
//! so the poll loop never waits on a UART.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use ascent_core::render::DISPLAY_COLS;
use ascent_core::shared::{EdgeFlag, EventQueue};
use ascent_core::telemetry::TelemetryLine;
use ascent_core::TickClock;

/// Depth of the display command channel
const DISPLAY_CHANNEL_SIZE: usize = 16;

/// Depth of the telemetry line channel
const TELEMETRY_CHANNEL_SIZE: usize = 8;

/// Millisecond clock advanced by the tick task
pub static CLOCK: TickClock = TickClock::new();

/// Button edges captured by the button tasks
pub static BUTTON_EVENTS: EventQueue = EventQueue::new();

/// Obstacle threshold crossings from the light comparator
pub static OBSTACLE_EDGE: EdgeFlag = EdgeFlag::new();

/// Commands for the character display
#[derive(Debug, Clone)]
pub enum DisplayCommand {
    /// Blank the whole screen
    Clear,
    /// Draw text at a position
    Line {
        row: u8,
        col: u8,
        text: String<DISPLAY_COLS>,
    },
}

/// Display commands from the sequencer
pub static DISPLAY_COMMANDS: Channel<CriticalSectionRawMutex, DisplayCommand, DISPLAY_CHANNEL_SIZE> =
    Channel::new();

/// Telemetry lines from the sequencer
pub static TELEMETRY_LINES: Channel<CriticalSectionRawMutex, TelemetryLine, TELEMETRY_CHANNEL_SIZE> =
    Channel::new();
