//! Telemetry serial port

/// Errors reported by the serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// Transmit queue full, line dropped
    Overflow,
    /// Line longer than the link accepts
    TooLong,
}

impl core::fmt::Display for SerialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SerialError::Overflow => f.write_str("serial queue full"),
            SerialError::TooLong => f.write_str("serial line too long"),
        }
    }
}

/// Line-oriented telemetry output
///
/// Fire-and-forget: implementations queue the line and return without
/// waiting for transmission. The line terminator is added by the port.
pub trait SerialPort {
    /// Queue one line of text
    fn send_line(&mut self, text: &str) -> Result<(), SerialError>;
}
