//! Indicator drivers over GPIO

pub mod led_bar;
pub mod seven_segment;

pub use led_bar::LedBar;
pub use seven_segment::SevenSegment;

use embedded_hal::digital::{OutputPin, PinState};

/// Drive a pin to a logical level, honoring active-low wiring
///
/// GPIO writes are infallible on the supported boards; errors are ignored.
pub(crate) fn drive<P: OutputPin>(pin: &mut P, on: bool, active_low: bool) {
    let _ = pin.set_state(PinState::from(on != active_low));
}
