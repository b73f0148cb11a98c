//! LED bar graph

use embedded_hal::digital::OutputPin;

use super::drive;

/// Row of `N` LEDs lit from the first pin upward
pub struct LedBar<P, const N: usize> {
    leds: [P; N],
    lit: u8,
}

impl<P: OutputPin, const N: usize> LedBar<P, N> {
    /// Create a bar with every LED off
    pub fn new(leds: [P; N]) -> Self {
        let mut bar = Self { leds, lit: 0 };
        bar.set(0);
        bar
    }

    /// Light the first `lit` LEDs
    pub fn set(&mut self, lit: u8) {
        let lit = (lit as usize).min(N);
        for (i, led) in self.leds.iter_mut().enumerate() {
            drive(led, i < lit, false);
        }
        self.lit = lit as u8;
    }

    /// LEDs currently lit
    pub fn lit(&self) -> u8 {
        self.lit
    }

    /// Number of LEDs
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}
