//! Single seven-segment digit
//!
//! Pins are ordered a..g; the glyph's segment mask is decoded here and
//! nowhere else.

use ascent_core::traits::Glyph;
use embedded_hal::digital::OutputPin;

use super::drive;

/// Seven-segment digit on seven GPIO pins
pub struct SevenSegment<P> {
    /// Segments a through g
    segments: [P; 7],
    /// Common-anode wiring: a segment lights when its pin is low
    active_low: bool,
    glyph: Glyph,
}

impl<P: OutputPin> SevenSegment<P> {
    /// Create a digit and blank it
    pub fn new(segments: [P; 7], active_low: bool) -> Self {
        let mut digit = Self {
            segments,
            active_low,
            glyph: Glyph::Blank,
        };
        digit.show(Glyph::Blank);
        digit
    }

    /// Show a glyph
    pub fn show(&mut self, glyph: Glyph) {
        let mask = glyph.segments();
        for (bit, pin) in self.segments.iter_mut().enumerate() {
            drive(pin, mask & (1 << bit) != 0, self.active_low);
        }
        self.glyph = glyph;
    }

    /// Glyph currently shown
    pub fn glyph(&self) -> Glyph {
        self.glyph
    }
}
