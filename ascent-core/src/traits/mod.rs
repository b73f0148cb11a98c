//! Port traits
//!
//! These traits define the interface between the sequencer and the
//! board-specific implementations of sensors, display, indicators and the
//! telemetry serial link.

pub mod button;
pub mod display;
pub mod indicator;
pub mod sensor;
pub mod serial;

pub use button::{Button, ButtonEvent};
pub use display::{DisplayError, DisplayPort};
pub use indicator::{Channel, Glyph, IndicatorPort};
pub use sensor::{Acceleration, SensorError, SensorPort};
pub use serial::{SerialError, SerialPort};
