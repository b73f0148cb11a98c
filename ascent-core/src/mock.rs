//! Recording port implementations for host tests

use crate::render::DISPLAY_ROWS;
use crate::traits::{
    Acceleration, Channel, DisplayError, DisplayPort, Glyph, IndicatorPort, SensorError,
    SensorPort, SerialError, SerialPort,
};

/// Sensors with settable readings
#[derive(Debug)]
pub struct MockSensors {
    pub temperature_x10: Result<i32, SensorError>,
    pub acceleration: Result<Acceleration, SensorError>,
    pub light: Result<u32, SensorError>,
    pub obstacle_event: bool,
    pub armed: bool,
    pub accel_reads: u32,
}

impl MockSensors {
    /// Room temperature, level, dark
    pub fn new() -> Self {
        Self {
            temperature_x10: Ok(200),
            acceleration: Ok(Acceleration::new(0, 0, 64)),
            light: Ok(100),
            obstacle_event: false,
            armed: false,
            accel_reads: 0,
        }
    }
}

impl SensorPort for MockSensors {
    fn read_temperature_deci_celsius(&mut self) -> Result<i32, SensorError> {
        self.temperature_x10
    }

    fn read_acceleration(&mut self) -> Result<Acceleration, SensorError> {
        self.accel_reads += 1;
        self.acceleration
    }

    fn read_light(&mut self) -> Result<u32, SensorError> {
        self.light
    }

    fn obstacle_threshold_event(&mut self) -> bool {
        core::mem::take(&mut self.obstacle_event)
    }

    fn set_obstacle_armed(&mut self, armed: bool) {
        self.armed = armed;
    }
}

/// Character grid that remembers what was drawn
#[derive(Debug)]
pub struct MockDisplay {
    pub rows: Vec<String>,
    pub clears: u32,
    pub writes: u32,
    pub fail_next: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            rows: (0..DISPLAY_ROWS).map(|_| String::new()).collect(),
            clears: 0,
            writes: 0,
            fail_next: false,
        }
    }

    /// Text currently shown on `row`
    pub fn line(&self, row: u8) -> &str {
        &self.rows[row as usize]
    }

    /// Text currently shown on `row`, without trailing padding
    pub fn text(&self, row: u8) -> &str {
        self.line(row).trim_end()
    }

    fn check(&mut self) -> Result<(), DisplayError> {
        if core::mem::take(&mut self.fail_next) {
            Err(DisplayError::Bus)
        } else {
            Ok(())
        }
    }
}

impl DisplayPort for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.clears += 1;
        for row in &mut self.rows {
            row.clear();
        }
        Ok(())
    }

    fn put_line(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.check()?;
        let line = self
            .rows
            .get_mut(row as usize)
            .ok_or(DisplayError::OutOfBounds)?;
        let mut chars: Vec<char> = line.chars().collect();
        let col = col as usize;
        if chars.len() < col {
            chars.resize(col, ' ');
        }
        for (i, c) in text.chars().enumerate() {
            match chars.get_mut(col + i) {
                Some(slot) => *slot = c,
                None => chars.push(c),
            }
        }
        *line = chars.into_iter().collect();
        self.writes += 1;
        Ok(())
    }
}

/// Indicator outputs with a record of channel changes
#[derive(Debug)]
pub struct MockIndicators {
    pub a: bool,
    pub b: bool,
    pub glyph: Glyph,
    pub bar: u8,
    pub channel_log: Vec<(bool, bool)>,
}

impl MockIndicators {
    pub fn new() -> Self {
        Self {
            a: false,
            b: false,
            glyph: Glyph::Blank,
            bar: 0,
            channel_log: Vec::new(),
        }
    }
}

impl IndicatorPort for MockIndicators {
    fn set_channel(&mut self, channel: Channel, on: bool) {
        match channel {
            Channel::A => self.a = on,
            Channel::B => self.b = on,
        }
        if channel == Channel::B {
            self.channel_log.push((self.a, self.b));
        }
    }

    fn set_seven_segment(&mut self, glyph: Glyph) {
        self.glyph = glyph;
    }

    fn set_bar(&mut self, lit: u8) {
        self.bar = lit;
    }
}

/// Serial link collecting every line sent
#[derive(Debug, Default)]
pub struct MockSerial {
    pub lines: Vec<String>,
    pub fail: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.lines.iter().filter(|l| l.starts_with(prefix)).count()
    }
}

impl SerialPort for MockSerial {
    fn send_line(&mut self, text: &str) -> Result<(), SerialError> {
        if self.fail {
            return Err(SerialError::Overflow);
        }
        self.lines.push(text.to_string());
        Ok(())
    }
}
