//! Screen rendering
//!
//! Builds screens for the mode views and the warning overlay, and pushes
//! only the rows that changed to the display.
//!
//! The display is a character grid of 8 rows of 16 characters.

use core::fmt::{self, Write};

use heapless::String;

use crate::sample::AccelDeviation;
use crate::safety::WarningKind;
use crate::state::Mode;
use crate::traits::{DisplayError, DisplayPort};

/// Display rows
pub const DISPLAY_ROWS: u8 = 8;
/// Display columns
pub const DISPLAY_COLS: usize = 16;

/// Row of the primary (temperature) warning line
pub const PRIMARY_WARNING_ROW: u8 = 0;
/// Row of the secondary (acceleration/obstacle) warning line
pub const SECONDARY_WARNING_ROW: u8 = 1;

/// One display row
pub type Line = String<DISPLAY_COLS>;

/// Fixed-point value printed with two decimals, or `--.--` when missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed2(Option<i32>);

impl Fixed2 {
    /// From 0.1 units (temperature); out-of-range values print as missing
    pub fn deci(value: Option<i32>) -> Self {
        Self(value.and_then(|v| v.checked_mul(10)))
    }

    /// From 0.001 units (milli-g)
    pub fn milli(value: Option<i32>) -> Self {
        Self(value.map(|v| v / 10))
    }
}

impl fmt::Display for Fixed2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("--.--"),
            Some(hundredths) => {
                let sign = if hundredths < 0 { "-" } else { "" };
                let abs = hundredths.unsigned_abs();
                write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
            }
        }
    }
}

/// Number of proximity bar LEDs to light for a light reading
pub fn bar_level(light: u32, full_scale: u32, segments: u8) -> u8 {
    let full_scale = full_scale.max(1) as u64;
    let lit = light as u64 * segments as u64 / full_scale;
    lit.min(segments as u64) as u8
}

/// A screen buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [Line; DISPLAY_ROWS as usize],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self {
            lines: [
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ],
        }
    }

    /// Clear the screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Set text at a specific row, truncated to the display width
    pub fn set_line(&mut self, row: u8, text: &str) {
        if let Some(line) = self.lines.get_mut(row as usize) {
            line.clear();
            let end = text
                .char_indices()
                .nth(DISPLAY_COLS)
                .map_or(text.len(), |(i, _)| i);
            let _ = line.push_str(&text[..end]);
        }
    }

    /// Set formatted text at a specific row
    pub fn set_fmt(&mut self, row: u8, args: fmt::Arguments<'_>) {
        let mut buf: String<32> = String::new();
        let _ = buf.write_fmt(args);
        self.set_line(row, &buf);
    }

    /// Get a line of text
    pub fn get_line(&self, row: u8) -> &str {
        self.lines.get(row as usize).map_or("", |l| l.as_str())
    }
}

/// What the mode views need to know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeView {
    pub temperature_x10: Option<i32>,
    pub acceleration: Option<AccelDeviation>,
    pub light: Option<u32>,
    pub obstacle_near: bool,
}

/// Build the normal screen for `mode`
pub fn compose_mode(screen: &mut Screen, mode: Mode, view: &ModeView) {
    screen.clear();

    let label = match mode {
        Mode::Return if view.obstacle_near => "OBSTACLE NEAR",
        _ => mode.label(),
    };
    screen.set_line(0, label);

    match mode {
        Mode::Stationary | Mode::Countdown => {
            screen.set_fmt(1, format_args!("Temp: {}", Fixed2::deci(view.temperature_x10)));
        }
        Mode::Launch => {
            screen.set_fmt(1, format_args!("Temp: {}", Fixed2::deci(view.temperature_x10)));
            let acc = view.acceleration;
            screen.set_fmt(2, format_args!("Acc X: {}", Fixed2::milli(acc.map(|a| a.x_mg))));
            screen.set_fmt(3, format_args!("Acc Y: {}", Fixed2::milli(acc.map(|a| a.y_mg))));
        }
        Mode::Return => match view.light {
            Some(light) => screen.set_fmt(1, format_args!("Light: {}", light)),
            None => screen.set_line(1, "Light: --"),
        },
    }
}

/// Write the warning line for `kind`
pub fn compose_warning(screen: &mut Screen, kind: WarningKind, temperature_x10: Option<i32>) {
    let row = if kind.is_primary() {
        PRIMARY_WARNING_ROW
    } else {
        SECONDARY_WARNING_ROW
    };
    match kind {
        WarningKind::Temperature => screen.set_fmt(
            row,
            format_args!("Temp high {}", Fixed2::deci(temperature_x10)),
        ),
        WarningKind::Acceleration => screen.set_line(row, "Accel warning"),
        WarningKind::Obstacle => screen.set_line(row, "Obstacle near!"),
    }
}

/// Which screen is on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Normal rendering for a mode
    Mode(Mode),
    /// Warning overlay
    Warning,
}

/// Keeps a shadow of the display and sends only changed rows
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    target: Screen,
    shown: Screen,
    view: Option<View>,
    needs_clear: bool,
}

impl Renderer {
    /// Create a renderer that clears the display on first flush
    pub fn new() -> Self {
        Self {
            target: Screen::new(),
            shown: Screen::new(),
            view: None,
            needs_clear: true,
        }
    }

    /// Current view
    pub fn view(&self) -> Option<View> {
        self.view
    }

    /// Screen being rendered
    pub fn target(&self) -> &Screen {
        &self.target
    }

    /// Switch to `view`; a change of view starts from a blank screen
    pub fn begin(&mut self, view: View) -> &mut Screen {
        if self.view != Some(view) {
            self.view = Some(view);
            self.target.clear();
            self.needs_clear = true;
        }
        &mut self.target
    }

    /// Forget the current view so the next `begin` starts fresh
    pub fn reset_view(&mut self) {
        self.view = None;
        self.target.clear();
        self.needs_clear = true;
    }

    /// Send changed rows to the display
    ///
    /// On error the shadow is discarded so the next flush redraws
    /// everything.
    pub fn flush<D: DisplayPort>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        let result = self.flush_inner(display);
        if result.is_err() {
            self.needs_clear = true;
        }
        result
    }

    fn flush_inner<D: DisplayPort>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        if self.needs_clear {
            display.clear()?;
            self.shown.clear();
            self.needs_clear = false;
        }

        for row in 0..DISPLAY_ROWS {
            let want = self.target.get_line(row);
            let have = self.shown.get_line(row);
            if want == have {
                continue;
            }

            // Overwrite leftovers from a longer previous line
            let mut padded: Line = String::new();
            let _ = padded.push_str(want);
            while padded.len() < have.len() {
                let _ = padded.push(' ');
            }

            display.put_line(row, 0, &padded)?;
            self.shown.set_line(row, want);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDisplay;

    fn line(value: Fixed2) -> String<16> {
        let mut s = String::new();
        write!(s, "{}", value).unwrap();
        s
    }

    #[test]
    fn test_fixed2_formatting() {
        assert_eq!(line(Fixed2::deci(Some(200))), "20.00");
        assert_eq!(line(Fixed2::deci(Some(395))), "39.50");
        assert_eq!(line(Fixed2::deci(Some(-5))), "-0.50");
        assert_eq!(line(Fixed2::milli(Some(120))), "0.12");
        assert_eq!(line(Fixed2::milli(Some(-1250))), "-1.25");
        assert_eq!(line(Fixed2::deci(None)), "--.--");
    }

    #[test]
    fn test_fixed2_out_of_range_is_unavailable() {
        assert_eq!(line(Fixed2::deci(Some(300_000_000))), "--.--");
        assert_eq!(line(Fixed2::deci(Some(i32::MIN))), "--.--");
        assert_eq!(line(Fixed2::deci(Some(214_748_364))), "21474836.40");
    }

    #[test]
    fn test_warning_rows_by_precedence() {
        let mut screen = Screen::new();
        compose_warning(&mut screen, WarningKind::Acceleration, Some(395));
        compose_warning(&mut screen, WarningKind::Temperature, Some(395));
        assert_eq!(screen.get_line(PRIMARY_WARNING_ROW), "Temp high 39.50");
        assert_eq!(screen.get_line(SECONDARY_WARNING_ROW), "Accel warning");

        compose_warning(&mut screen, WarningKind::Obstacle, None);
        assert_eq!(screen.get_line(SECONDARY_WARNING_ROW), "Obstacle near!");
    }

    #[test]
    fn test_bar_level() {
        assert_eq!(bar_level(0, 1000, 16), 0);
        assert_eq!(bar_level(500, 1000, 16), 8);
        assert_eq!(bar_level(1000, 1000, 16), 16);
        assert_eq!(bar_level(u32::MAX, 1000, 16), 16);
    }

    #[test]
    fn test_set_line_truncates() {
        let mut screen = Screen::new();
        screen.set_line(0, "0123456789ABCDEFGHIJ");
        assert_eq!(screen.get_line(0), "0123456789ABCDEF");
        assert_eq!(screen.get_line(42), "");
    }

    #[test]
    fn test_stationary_screen() {
        let mut screen = Screen::new();
        let view = ModeView {
            temperature_x10: Some(200),
            ..ModeView::default()
        };
        compose_mode(&mut screen, Mode::Stationary, &view);
        assert_eq!(screen.get_line(0), "STATIONARY");
        assert_eq!(screen.get_line(1), "Temp: 20.00");
    }

    #[test]
    fn test_launch_screen() {
        let mut screen = Screen::new();
        let view = ModeView {
            temperature_x10: Some(215),
            acceleration: Some(AccelDeviation {
                x_mg: 125,
                y_mg: -50,
                z_mg: 1000,
            }),
            ..ModeView::default()
        };
        compose_mode(&mut screen, Mode::Launch, &view);
        assert_eq!(screen.get_line(0), "LAUNCH");
        assert_eq!(screen.get_line(2), "Acc X: 0.12");
        assert_eq!(screen.get_line(3), "Acc Y: -0.05");
    }

    #[test]
    fn test_return_screen_obstacle_label() {
        let mut screen = Screen::new();
        let view = ModeView {
            light: Some(700),
            obstacle_near: true,
            ..ModeView::default()
        };
        compose_mode(&mut screen, Mode::Return, &view);
        assert_eq!(screen.get_line(0), "OBSTACLE NEAR");
        assert_eq!(screen.get_line(1), "Light: 700");
    }

    #[test]
    fn test_flush_sends_only_changes() {
        let mut display = MockDisplay::new();
        let mut renderer = Renderer::new();

        renderer.begin(View::Mode(Mode::Stationary)).set_line(0, "STATIONARY");
        renderer.flush(&mut display).unwrap();
        assert_eq!(display.clears, 1);
        assert_eq!(display.writes, 1);

        renderer.flush(&mut display).unwrap();
        assert_eq!(display.writes, 1);

        renderer.begin(View::Mode(Mode::Stationary)).set_line(0, "STAT");
        renderer.flush(&mut display).unwrap();
        assert_eq!(display.writes, 2);
        assert_eq!(display.line(0), "STAT      ");
        assert_eq!(display.clears, 1);
    }

    #[test]
    fn test_view_change_clears() {
        let mut display = MockDisplay::new();
        let mut renderer = Renderer::new();
        renderer.begin(View::Mode(Mode::Launch)).set_line(0, "LAUNCH");
        renderer.flush(&mut display).unwrap();

        renderer.begin(View::Warning).set_line(0, "Temp high 40.00");
        renderer.flush(&mut display).unwrap();
        assert_eq!(display.clears, 2);
        assert_eq!(display.line(0), "Temp high 40.00");
    }

    #[test]
    fn test_error_forces_redraw() {
        let mut display = MockDisplay::new();
        let mut renderer = Renderer::new();
        renderer.begin(View::Warning).set_line(1, "Accel warning");

        display.fail_next = true;
        assert!(renderer.flush(&mut display).is_err());

        renderer.flush(&mut display).unwrap();
        assert_eq!(display.line(1), "Accel warning");
    }
}
