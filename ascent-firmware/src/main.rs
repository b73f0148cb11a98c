//! Ascent - Mission-Phase Sequencer Firmware
//!
//! Main firmware binary for RP2040-based boards. Walks a small instrumented
//! device through Stationary, Countdown, Launch and Return, raising
//! temperature, acceleration and obstacle warnings along the way.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use ascent_core::traits::Button;
use ascent_core::{Ports, Sequencer, SequencerConfig};
use ascent_drivers::indicator::{LedBar, SevenSegment};
use ascent_drivers::sensor::{DieTemperature, LightSensor, Mma7455};
use ascent_drivers::{BoardIndicators, BoardSensors};

use crate::channels::{CLOCK, OBSTACLE_EDGE};
use crate::ports::{AdcInput, ChannelDisplay, ChannelSerial};
use crate::tasks::sequencer::BAR_LEDS;

mod channels;
mod ports;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TELEMETRY_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static TELEMETRY_RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static DISPLAY_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static DISPLAY_RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

// The ADC is shared by the temperature and light channels
static ADC: StaticCell<RefCell<Adc<'static, adc::Blocking>>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Ascent firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Telemetry UART (UART0: GPIO0 TX, GPIO1 RX), 115200 baud default
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(
        Irqs,
        TELEMETRY_TX_BUF.init([0u8; 256]),
        TELEMETRY_RX_BUF.init([0u8; 16]),
    );
    let (telemetry_tx, _telemetry_rx) = uart.split();

    // Display terminal UART (UART1: GPIO8 TX, GPIO9 RX)
    let uart = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, UartConfig::default());
    let uart = uart.into_buffered(
        Irqs,
        DISPLAY_TX_BUF.init([0u8; 256]),
        DISPLAY_RX_BUF.init([0u8; 16]),
    );
    let (display_tx, _display_rx) = uart.split();

    info!("UARTs initialized");

    // Sensors: on-die temperature and photodiode on the ADC, MMA7455 on I2C0
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let adc: &'static RefCell<_> = ADC.init(RefCell::new(adc));
    let temp_channel = adc::Channel::new_temp_sensor(p.ADC_TEMP_SENSOR);
    let light_channel = adc::Channel::new_pin(p.PIN_26, Pull::None);

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c::Config::default());
    let mut accel = Mma7455::new(i2c);
    if let Err(e) = accel.init() {
        // Keep going: reads will fault and render as unavailable
        warn!("Accelerometer init failed: {:?}", e);
    }

    let config = SequencerConfig {
        bar_segments: BAR_LEDS as u8,
        ..SequencerConfig::new()
    };

    let sensors = BoardSensors::new(
        DieTemperature::new(AdcInput::new(adc, temp_channel)),
        accel,
        LightSensor::new(AdcInput::new(adc, light_channel), config.light_full_scale),
        &OBSTACLE_EDGE,
    );

    info!("Sensors initialized");

    // Indicators: beacon A/B, seven-segment a..g, proximity bar
    let digit = SevenSegment::new(
        [
            Output::new(p.PIN_2, Level::Low),
            Output::new(p.PIN_3, Level::Low),
            Output::new(p.PIN_4, Level::Low),
            Output::new(p.PIN_5, Level::Low),
            Output::new(p.PIN_6, Level::Low),
            Output::new(p.PIN_7, Level::Low),
            Output::new(p.PIN_10, Level::Low),
        ],
        false,
    );
    let bar = LedBar::new([
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
    ]);
    let indicators = BoardIndicators::new(
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        digit,
        bar,
    );

    info!("Indicators initialized");

    // Inputs: Toggle and Acknowledge buttons to ground, comparator output
    let toggle = Input::new(p.PIN_14, Pull::Up);
    let acknowledge = Input::new(p.PIN_15, Pull::Up);
    let obstacle = Input::new(p.PIN_22, Pull::Down);

    let ports = Ports {
        sensors,
        display: ChannelDisplay,
        indicators,
        serial: ChannelSerial,
    };
    let sequencer = match Sequencer::new(config, ports, CLOCK.now()) {
        Ok(sequencer) => sequencer,
        Err(e) => core::panic!("invalid sequencer config: {}", e),
    };

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::button_task(toggle, Button::Toggle)).unwrap();
    spawner
        .spawn(tasks::button_task(acknowledge, Button::Acknowledge))
        .unwrap();
    spawner.spawn(tasks::obstacle_task(obstacle)).unwrap();
    spawner.spawn(tasks::serial_tx_task(telemetry_tx)).unwrap();
    spawner.spawn(tasks::display_tx_task(display_tx)).unwrap();
    spawner.spawn(tasks::sequencer_task(sequencer)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
