//! Edge capture tasks for the buttons and the obstacle comparator
//!
//! Each edge is timestamped with the shared clock and published; all
//! interpretation (debounce, gestures) happens in the sequencer.

use defmt::*;
use embassy_rp::gpio::Input;

use ascent_core::traits::{Button, ButtonEvent};

use crate::channels::{BUTTON_EVENTS, CLOCK, OBSTACLE_EDGE};

/// Button task - publishes a press edge (falling, pulled-up input)
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut pin: Input<'static>, button: Button) {
    info!("Button task started: {:?}", button);

    loop {
        pin.wait_for_falling_edge().await;
        let event = ButtonEvent {
            button,
            at: CLOCK.now(),
        };
        if !BUTTON_EVENTS.push(event) {
            warn!("Button queue full, {:?} edge dropped", button);
        }
    }
}

/// Obstacle task - publishes threshold crossings from the comparator
#[embassy_executor::task]
pub async fn obstacle_task(mut pin: Input<'static>) {
    info!("Obstacle task started");

    loop {
        pin.wait_for_rising_edge().await;
        OBSTACLE_EDGE.raise();
    }
}
