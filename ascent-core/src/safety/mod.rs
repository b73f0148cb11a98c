//! Warning monitoring
//!
//! Detects out-of-range sensor readings and drives the alert beacon.

pub mod beacon;
pub mod monitor;

pub use beacon::{AlertBeacon, BeaconOutput};
pub use monitor::{WarningKind, WarningMonitor, WarningSet, WarningState};
