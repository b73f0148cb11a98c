//! Triggers that drive mode transitions

/// Triggers that can cause a mode transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    // Gesture triggers
    /// A Toggle edge interpreted as a single-edge gesture
    ToggleEdge,
    /// Two Toggle edges inside the gesture window
    DoublePress,
    /// Gesture window elapsed holding exactly one edge
    SingleElapsed,

    // Timer triggers
    /// Countdown counter reached zero
    CountdownElapsed,

    // Safety triggers
    /// Temperature warning is raised
    TemperatureWarning,
}
