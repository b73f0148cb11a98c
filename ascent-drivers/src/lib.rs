//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the port traits defined
//! in ascent-core:
//!
//! - Sensors (on-die temperature, MMA7455 accelerometer, light channel)
//! - Indicators (seven-segment digit, LED bar, beacon channels)
//! - Board composites implementing `SensorPort` and `IndicatorPort`

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod board;
pub mod indicator;
pub mod sensor;

pub use board::{BoardIndicators, BoardSensors};
