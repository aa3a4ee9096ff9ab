//! Pin assignments for the button panel board.
//!
//! Single source of truth: the binary and any board-level code reference
//! this module rather than hard-coding pin numbers.

use crate::app::ports::PinId;

// ---------------------------------------------------------------------------
// Local buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button on the main board.
pub const BUTTON_GPIO: PinId = 16;

// ---------------------------------------------------------------------------
// I²C bus to the MCP23017 expander
// ---------------------------------------------------------------------------

// SDA and SCL are GPIO14 and GPIO15. esp-idf-hal hands those out as typed
// peripheral fields (`pins.gpio14`, `pins.gpio15`), so they have no constant.

/// Bus clock (400 kHz fast mode).
pub const I2C_FREQ_HZ: u32 = 400_000;

/// Expander address with A2..A0 tied low.
pub const EXPANDER_ADDRESS: u8 = 0x20;

// ---------------------------------------------------------------------------
// Expander buttons (GPA0.. on the front panel)
// ---------------------------------------------------------------------------

/// Momentary "select" button.
pub const EXPANDER_SELECT_PIN: PinId = 0;
/// Push-on / push-off "mode" button.
pub const EXPANDER_MODE_PIN: PinId = 1;
