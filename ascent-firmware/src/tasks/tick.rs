//! Millisecond tick task
//!
//! Advances the shared clock once per millisecond. The ticker catches up
//! after a late wake-up, so the clock never drifts from real time.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::CLOCK;

/// Tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1;

/// Tick task - advances the millisecond clock
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;
        CLOCK.advance();
    }
}
