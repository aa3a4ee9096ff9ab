//! Button and panel configuration.
//!
//! [`ButtonConfig`] is fixed once a button is constructed. [`PanelConfig`]
//! tunes the polling service that drives all buttons on a board.

use serde::{Deserialize, Serialize};

use crate::app::ports::PinId;
use crate::error::{Error, Result};

/// Default debounce window (milliseconds).
pub const DEFAULT_DEBOUNCE_MS: u32 = 25;

/// Per-button configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// Pin the button is wired to (local GPIO number or expander pin 0–15).
    pub pin: PinId,
    /// Minimum time after an accepted change before another is accepted.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Enable the internal pull-up resistor.
    #[serde(default = "default_true")]
    pub pull_up: bool,
    /// Interpret a low level as pressed.
    #[serde(default = "default_true")]
    pub invert: bool,
}

fn default_debounce_ms() -> u32 {
    DEFAULT_DEBOUNCE_MS
}

fn default_true() -> bool {
    true
}

impl ButtonConfig {
    /// Active-low button with internal pull-up and a 25 ms window.
    pub const fn new(pin: PinId) -> Self {
        Self {
            pin,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            pull_up: true,
            invert: true,
        }
    }

    pub const fn with_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub const fn with_pull_up(mut self, pull_up: bool) -> Self {
        self.pull_up = pull_up;
        self
    }

    pub const fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

/// Polling service configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Delay between two service ticks (milliseconds).
    pub poll_interval_ms: u32,
    /// Hold time that raises a long-press event. 0 disables it.
    pub long_press_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5,
            long_press_ms: 1000,
        }
    }
}

impl PanelConfig {
    /// Check that polling is finer than the button's debounce window.
    ///
    /// The engine trusts a single raw read once the window has elapsed, so
    /// a bounce that fits inside one polling gap can go unnoticed.
    pub fn check_cadence(&self, button: &ButtonConfig) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll interval must be non-zero"));
        }
        if self.poll_interval_ms >= button.debounce_ms {
            return Err(Error::Config("poll interval not finer than debounce window"));
        }
        Ok(())
    }
}
