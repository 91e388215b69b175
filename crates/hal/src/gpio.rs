//! GPIO value, edge and configuration types.

/// GPIO pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

impl Level {
    /// Returns the opposite level.
    pub fn toggled(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Interrupt trigger edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Rising edge
    Rising,
    /// Falling edge
    Falling,
    /// Both edges
    Both,
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// Electrical pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinConfig {
    /// No pull resistor
    Floating,
    /// Pull-up resistor enabled
    PullUp,
    /// Pull-down resistor enabled
    PullDown,
    /// Open-drain output
    OpenDrain,
}
