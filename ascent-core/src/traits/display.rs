//! Character display port

/// Errors that can occur while driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Command queue to the display is full
    Busy,
    /// Bus or link failure
    Bus,
    /// Row or column outside the display
    OutOfBounds,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Busy => f.write_str("display busy"),
            DisplayError::Bus => f.write_str("display bus error"),
            DisplayError::OutOfBounds => f.write_str("display position out of bounds"),
        }
    }
}

/// Text display
///
/// The display is a dumb character grid; fonts and pixels live behind
/// the implementation.
pub trait DisplayPort {
    /// Clear the entire screen
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a position
    ///
    /// - `row`: Row number
    /// - `col`: Column number
    /// - `text`: ASCII text, overwriting whatever was there
    fn put_line(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;
}
