//! Indicator outputs: beacon channels, seven-segment digit, proximity bar

/// Beacon channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Acceleration / obstacle warnings
    A,
    /// Temperature warnings
    B,
}

/// Seven-segment glyph
///
/// Logical value only; segment encoding happens at the port boundary via
/// [`Glyph::segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    /// All segments off
    Blank,
    /// Hexadecimal digit 0..=15
    Hex(u8),
    /// Middle bar only
    Dash,
}

/// Segment masks for 0-F, bit order `.gfedcba`
const HEX_SEGMENTS: [u8; 16] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, //
    0x7F, 0x6F, 0x77, 0x7C, 0x39, 0x5E, 0x79, 0x71,
];

impl Glyph {
    /// Active-high segment mask, bit 0 = segment a, bit 6 = segment g
    pub fn segments(self) -> u8 {
        match self {
            Glyph::Blank => 0x00,
            Glyph::Hex(d) => HEX_SEGMENTS[(d & 0x0F) as usize],
            Glyph::Dash => 0x40,
        }
    }
}

/// Indicator outputs
pub trait IndicatorPort {
    /// Turn a beacon channel on or off
    fn set_channel(&mut self, channel: Channel, on: bool);

    /// Show a glyph on the seven-segment digit
    fn set_seven_segment(&mut self, glyph: Glyph);

    /// Light the first `lit` LEDs of the proximity bar
    fn set_bar(&mut self, lit: u8);
}
