//! Sequencer poll task
//!
//! Runs the cooperative poll loop: each iteration reads the clock once,
//! drains the button queue and hands both to the core sequencer.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Ticker};

use ascent_core::Sequencer;
use ascent_drivers::{BoardIndicators, BoardSensors};

use crate::channels::{BUTTON_EVENTS, CLOCK};
use crate::ports::{AdcInput, ChannelDisplay, ChannelSerial};

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 5;

/// LEDs in the proximity bar
pub const BAR_LEDS: usize = 4;

/// Sensors as wired on the board
pub type Sensors = BoardSensors<AdcInput, I2c<'static, I2C0, i2c::Blocking>, AdcInput>;

/// Indicators as wired on the board
pub type Indicators = BoardIndicators<Output<'static>, BAR_LEDS>;

/// The sequencer with the board's ports
pub type BoardSequencer = Sequencer<Sensors, ChannelDisplay, Indicators, ChannelSerial>;

/// Sequencer task - the cooperative poll loop
#[embassy_executor::task]
pub async fn sequencer_task(mut sequencer: BoardSequencer) {
    info!("Sequencer task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut dropped = 0;

    loop {
        ticker.next().await;

        let now = CLOCK.now();
        sequencer.poll(now, BUTTON_EVENTS.drain());

        let lost = BUTTON_EVENTS.dropped();
        if lost != dropped {
            warn!("{} button edges dropped", lost - dropped);
            dropped = lost;
        }
    }
}
