//! Firmware-side port implementations
//!
//! Display and serial ports queue work for the transmit tasks and return
//! immediately. ADC inputs share the single converter.

use core::cell::RefCell;

use embassy_rp::adc::{self, Adc};

use ascent_core::render::{DISPLAY_COLS, DISPLAY_ROWS};
use ascent_core::telemetry::TelemetryLine;
use ascent_core::traits::{DisplayError, DisplayPort, SerialError, SerialPort};
use ascent_drivers::sensor::AdcReader;
use heapless::String;

use crate::channels::{DisplayCommand, DISPLAY_COMMANDS, TELEMETRY_LINES};

/// Display port backed by the display command channel
pub struct ChannelDisplay;

impl DisplayPort for ChannelDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        DISPLAY_COMMANDS
            .try_send(DisplayCommand::Clear)
            .map_err(|_| DisplayError::Busy)
    }

    fn put_line(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= DISPLAY_ROWS || col as usize >= DISPLAY_COLS {
            return Err(DisplayError::OutOfBounds);
        }

        let mut line = String::new();
        line.push_str(text).map_err(|_| DisplayError::OutOfBounds)?;

        DISPLAY_COMMANDS
            .try_send(DisplayCommand::Line { row, col, text: line })
            .map_err(|_| DisplayError::Busy)
    }
}

/// Serial port backed by the telemetry channel
pub struct ChannelSerial;

impl SerialPort for ChannelSerial {
    fn send_line(&mut self, text: &str) -> Result<(), SerialError> {
        let mut line = TelemetryLine::new();
        line.push_str(text).map_err(|_| SerialError::TooLong)?;

        TELEMETRY_LINES
            .try_send(line)
            .map_err(|_| SerialError::Overflow)
    }
}

/// One channel of the shared blocking ADC
pub struct AdcInput {
    adc: &'static RefCell<Adc<'static, adc::Blocking>>,
    channel: adc::Channel<'static>,
}

impl AdcInput {
    pub fn new(
        adc: &'static RefCell<Adc<'static, adc::Blocking>>,
        channel: adc::Channel<'static>,
    ) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for AdcInput {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc
            .borrow_mut()
            .blocking_read(&mut self.channel)
            .map_err(|_| ())
    }
}
