//! Toggle-button gesture detection
//!
//! Counts Toggle edges inside a rolling window opened by the first edge.
//! The gate only reports what happened; which report constitutes a mode
//! gesture depends on the current mode and is decided by the controller.

use crate::clock::{OneShot, Tick};

/// Edges needed for a double press
pub const DOUBLE_PRESS_COUNT: u8 = 2;

/// What the gate observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// An accepted edge; `count` edges so far in the open window
    Press { count: u8 },
    /// Second edge before the window elapsed (window is reset)
    DoublePress,
    /// Window elapsed holding `count` edges (window is reset)
    WindowElapsed { count: u8 },
}

/// Edges counted since the last window reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToggleWindow {
    /// Accepted edges in this window
    pub count: u8,
    /// When the first edge opened the window
    pub window_start: Option<Tick>,
}

/// Debounced multi-press detector for the Toggle button
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceGate {
    window: ToggleWindow,
    expiry: OneShot,
    window_ms: u32,
    holdoff_ms: u32,
    last_edge: Option<Tick>,
}

impl DebounceGate {
    /// Create a gate with the given window and bounce hold-off
    pub fn new(window_ms: u32, holdoff_ms: u32) -> Self {
        Self {
            window: ToggleWindow::default(),
            expiry: OneShot::new(window_ms),
            window_ms,
            holdoff_ms,
            last_edge: None,
        }
    }

    /// Current window contents
    pub fn window(&self) -> ToggleWindow {
        self.window
    }

    /// Edges counted in the open window
    pub fn count(&self) -> u8 {
        self.window.count
    }

    /// Close the window without reporting anything
    pub fn reset(&mut self) {
        self.window = ToggleWindow::default();
        self.expiry.cancel();
    }

    /// Report an elapsed window
    ///
    /// Call before [`on_edge`](Self::on_edge) with the edge timestamp so a
    /// window that ran out before the edge arrived is reported first.
    pub fn expire(&mut self, now: Tick) -> Option<Gesture> {
        if self.expiry.poll(now) {
            let count = self.window.count;
            self.window = ToggleWindow::default();
            Some(Gesture::WindowElapsed { count })
        } else {
            None
        }
    }

    /// Register a Toggle edge
    ///
    /// Returns `None` for edges rejected as contact bounce.
    pub fn on_edge(&mut self, at: Tick) -> Option<Gesture> {
        if let Some(last) = self.last_edge {
            if !at.has_elapsed(last, self.holdoff_ms) {
                return None;
            }
        }
        self.last_edge = Some(at);

        // A window that outlived its deadline unreported starts over
        if let Some(start) = self.window.window_start {
            if at.has_elapsed(start, self.window_ms) {
                self.reset();
            }
        }

        self.window.count += 1;
        if self.window.count == 1 {
            self.window.window_start = Some(at);
            self.expiry.arm(at);
        }

        if self.window.count >= DOUBLE_PRESS_COUNT {
            self.reset();
            Some(Gesture::DoublePress)
        } else {
            Some(Gesture::Press {
                count: self.window.count,
            })
        }
    }
}
