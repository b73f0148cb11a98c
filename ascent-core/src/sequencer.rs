//! Poll-loop sequencer
//!
//! One cooperative iteration per call to [`Sequencer::poll`]:
//!
//! 1. Sample sensors (faults become missing readings)
//! 2. Evaluate warnings and announce new raises
//! 3. Handle button edges (acknowledge, toggle gestures)
//! 4. Advance the mode controller (gesture expiry, countdown)
//! 5. Render the mode view unless a warning is showing
//! 6. Step the alert beacon and the telemetry cadence
//!
//! The sequencer never blocks and never fails: port errors are logged and
//! counted.

use crate::clock::Tick;
use crate::config::{ConfigError, SequencerConfig};
use crate::render::{self, ModeView, Renderer, View};
use crate::safety::{AlertBeacon, BeaconOutput, WarningKind, WarningMonitor, WarningSet};
use crate::sample::{AccelDeviation, Sample};
use crate::state::{Mode, ModeController, ObstacleAction, Transition};
use crate::telemetry::{self, TelemetryScheduler};
use crate::traits::{
    Button, ButtonEvent, Channel, DisplayPort, Glyph, IndicatorPort, SensorError, SensorPort,
    SerialPort,
};

/// The hardware the sequencer drives
#[derive(Debug)]
pub struct Ports<S, D, I, T> {
    pub sensors: S,
    pub display: D,
    pub indicators: I,
    pub serial: T,
}

/// Sensor fault onset latches, so each fault is logged once
#[derive(Debug, Clone, Copy, Default)]
struct FaultLatch {
    temperature: bool,
    acceleration: bool,
    light: bool,
}

fn reading<T>(
    latched: &mut bool,
    sensor: &'static str,
    result: Result<T, SensorError>,
) -> Option<T> {
    match result {
        Ok(value) => {
            if *latched {
                info!("{} sensor recovered", sensor);
                *latched = false;
            }
            Some(value)
        }
        Err(e) => {
            if !*latched {
                warn!("{} sensor fault: {:?}", sensor, e);
                *latched = true;
            }
            None
        }
    }
}

/// Port error counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortStats {
    pub display_errors: u32,
    pub serial_errors: u32,
}

/// Mission-phase sequencer
pub struct Sequencer<S, D, I, T> {
    config: SequencerConfig,
    ports: Ports<S, D, I, T>,
    controller: ModeController,
    monitor: WarningMonitor,
    beacon: AlertBeacon,
    telemetry: TelemetryScheduler,
    renderer: Renderer,
    faults: FaultLatch,
    sample: Sample,
    glyph: Glyph,
    bar: u8,
    stats: PortStats,
}

impl<S, D, I, T> Sequencer<S, D, I, T>
where
    S: SensorPort,
    D: DisplayPort,
    I: IndicatorPort,
    T: SerialPort,
{
    /// Create a sequencer in Stationary with every output off
    pub fn new(
        config: SequencerConfig,
        mut ports: Ports<S, D, I, T>,
        now: Tick,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        ports.sensors.set_obstacle_armed(false);
        ports.indicators.set_channel(Channel::A, false);
        ports.indicators.set_channel(Channel::B, false);
        ports.indicators.set_seven_segment(Glyph::Blank);
        ports.indicators.set_bar(0);

        info!("sequencer started in {:?}", Mode::Stationary);

        Ok(Self {
            controller: ModeController::new(&config, now),
            monitor: WarningMonitor::new(&config),
            beacon: AlertBeacon::new(config.beacon_period_ms, now),
            telemetry: TelemetryScheduler::new(&config, now),
            renderer: Renderer::new(),
            faults: FaultLatch::default(),
            sample: Sample::default(),
            glyph: Glyph::Blank,
            bar: 0,
            stats: PortStats::default(),
            config,
            ports,
        })
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Remaining countdown
    pub fn countdown(&self) -> u8 {
        self.controller.countdown().value()
    }

    /// Warning monitor
    pub fn warnings(&self) -> &WarningMonitor {
        &self.monitor
    }

    /// Alert beacon
    pub fn beacon(&self) -> &AlertBeacon {
        &self.beacon
    }

    /// Readings from the last iteration
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    /// Port error counters
    pub fn stats(&self) -> PortStats {
        self.stats
    }

    /// Active configuration
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Borrow the ports
    pub fn ports(&self) -> &Ports<S, D, I, T> {
        &self.ports
    }

    /// Mutably borrow the ports
    pub fn ports_mut(&mut self) -> &mut Ports<S, D, I, T> {
        &mut self.ports
    }

    /// Run one iteration at `now` with the button edges captured since the
    /// last iteration
    pub fn poll<E>(&mut self, now: Tick, events: E)
    where
        E: IntoIterator<Item = ButtonEvent>,
    {
        let mode = self.controller.mode();
        self.sample = self.read_sensors(mode);

        let raised = self
            .monitor
            .evaluate(mode, self.controller.obstacle_armed(), &self.sample);
        for kind in raised {
            warn!("{:?} warning raised in {:?}", kind, mode);
        }
        self.announce();

        for event in events {
            match event.button {
                Button::Acknowledge => self.acknowledge(),
                Button::Toggle => {
                    for row in self.controller.on_toggle_edge(event.at) {
                        self.apply(&row, now);
                    }
                }
            }
        }

        for row in self.controller.poll(now, self.monitor.summary()) {
            self.apply(&row, now);
        }

        self.render();
        self.update_beacon(now);

        let mode = self.controller.mode();
        if let Some(line) = self
            .telemetry
            .report(now, mode, &self.sample, self.monitor.obstacle_near())
        {
            self.send(&line);
        }
    }

    fn read_sensors(&mut self, mode: Mode) -> Sample {
        let sensors = &mut self.ports.sensors;
        let faults = &mut self.faults;

        let temperature_x10 = reading(
            &mut faults.temperature,
            "temperature",
            sensors.read_temperature_deci_celsius(),
        );

        let acceleration = if mode.samples_acceleration() {
            reading(&mut faults.acceleration, "accelerometer", sensors.read_acceleration())
                .map(|raw| AccelDeviation::from_raw(raw, &self.config))
        } else {
            None
        };

        // Read-and-clear even when disarmed so a stale edge never leaks
        let obstacle_event = sensors.obstacle_threshold_event();

        let light = if mode == Mode::Return || self.controller.obstacle_armed() {
            reading(&mut faults.light, "light", sensors.read_light())
        } else {
            None
        };

        Sample {
            temperature_x10,
            acceleration,
            light,
            obstacle_event,
        }
    }

    /// Show and report warnings raised but not yet announced
    fn announce(&mut self) {
        let pending = self.monitor.take_unannounced();
        if pending.is_empty() {
            return;
        }

        for kind in pending {
            let screen = self.renderer.begin(View::Warning);
            render::compose_warning(screen, kind, self.sample.temperature_x10);
            debug!("announcing {:?} warning", kind);
            let line = telemetry::warn_line(kind, &self.sample);
            self.send(&line);
        }
    }

    /// Acknowledge gesture: clear everything that is raised
    fn acknowledge(&mut self) {
        let cleared = self.monitor.acknowledge();
        if cleared.is_empty() {
            debug!("acknowledge with no warning raised");
            return;
        }
        info!("warnings acknowledged");
        self.after_clear(cleared);
    }

    fn clear_warnings(&mut self) {
        let cleared = self.monitor.clear_all();
        if !cleared.is_empty() {
            self.after_clear(cleared);
        }
    }

    fn after_clear(&mut self, cleared: WarningSet) {
        for kind in cleared {
            info!("{:?} warning cleared", kind);
            let line = telemetry::clear_line(kind);
            self.send(&line);
        }
        self.beacon.reset();
        self.write_beacon(BeaconOutput::OFF);
        // Next render starts from a blank screen
        self.renderer.reset_view();
    }

    /// Apply the entry actions of a fired transition
    fn apply(&mut self, row: &Transition, now: Tick) {
        info!("mode {:?} -> {:?} on {:?}", row.from, row.to, row.trigger);

        let actions = row.actions;
        if actions.clear_warnings {
            self.clear_warnings();
        }
        if actions.reset_cadence {
            self.telemetry.reset(now);
        }
        match actions.obstacle {
            ObstacleAction::Arm => {
                self.ports.sensors.set_obstacle_armed(true);
                self.monitor.obstacle_armed();
            }
            ObstacleAction::Disarm => self.ports.sensors.set_obstacle_armed(false),
            ObstacleAction::Keep => {}
        }
        if actions.clear_glyph {
            self.set_glyph(Glyph::Blank);
        }
    }

    fn render(&mut self) {
        let mode = self.controller.mode();

        let glyph = match mode {
            Mode::Countdown => self.controller.countdown().glyph(),
            _ => Glyph::Blank,
        };
        self.set_glyph(glyph);

        let bar = match (mode, self.sample.light) {
            (Mode::Return, Some(light)) => render::bar_level(
                light,
                self.config.light_full_scale,
                self.config.bar_segments,
            ),
            _ => 0,
        };
        if bar != self.bar {
            self.bar = bar;
            self.ports.indicators.set_bar(bar);
        }

        if !self.monitor.any_raised() {
            let view = ModeView {
                temperature_x10: self.sample.temperature_x10,
                acceleration: self.sample.acceleration,
                light: self.sample.light,
                obstacle_near: self.monitor.obstacle_near(),
            };
            let screen = self.renderer.begin(View::Mode(mode));
            render::compose_mode(screen, mode, &view);
        }

        if let Err(e) = self.renderer.flush(&mut self.ports.display) {
            self.stats.display_errors = self.stats.display_errors.wrapping_add(1);
            warn!("display error: {:?}", e);
        }
    }

    fn update_beacon(&mut self, now: Tick) {
        let (mut a, mut b) = (false, false);
        for kind in WarningKind::ALL {
            if self.monitor.is_raised(kind) {
                match kind.channel() {
                    Channel::A => a = true,
                    Channel::B => b = true,
                }
            }
        }
        if let Some(output) = self.beacon.poll(now, a, b) {
            self.write_beacon(output);
        }
    }

    fn write_beacon(&mut self, output: BeaconOutput) {
        self.ports.indicators.set_channel(Channel::A, output.a);
        self.ports.indicators.set_channel(Channel::B, output.b);
    }

    fn set_glyph(&mut self, glyph: Glyph) {
        if glyph != self.glyph {
            self.glyph = glyph;
            self.ports.indicators.set_seven_segment(glyph);
        }
    }

    fn send(&mut self, line: &str) {
        if let Err(e) = self.ports.serial.send_line(line) {
            self.stats.serial_errors = self.stats.serial_errors.wrapping_add(1);
            warn!("telemetry dropped: {:?}", e);
        }
    }
}
