//! Port traits: the boundary between the debounce core and the outside world.
//!
//! ```text
//!   Clock ──────────────▶ ┌────────────────┐
//!                         │ DebounceEngine │ ──▶ ButtonService ──▶ EventSink
//!   DigitalInputSource ─▶ └────────────────┘
//! ```
//!
//! Backends (local GPIO, MCP23017 expander, simulated pins) implement
//! [`DigitalInputSource`]; time comes from a [`Clock`]. The engine consumes
//! both via generics, so the filter logic never touches hardware directly.

use core::cell::RefCell;

/// Pin identifier: a local GPIO number or an expander pin (0–15).
pub type PinId = u8;

/// Milliseconds from a monotonic counter. Wraps at `u32::MAX`; always
/// compare with `wrapping_sub`.
pub type Millis = u32;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter. The engine never advances time itself.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Digital input port
// ───────────────────────────────────────────────────────────────

/// Instantaneous digital level of a pin.
///
/// Inversion happens once, at the lowest layer that can do it. A backend
/// that returns `true` from [`hardware_invert`](Self::hardware_invert)
/// applies `invert` during [`configure`](Self::configure) and hands back
/// already-inverted levels; otherwise the engine flips the level in
/// software.
///
/// Reads are infallible at this boundary. A backend that hits an I/O fault
/// deals with it itself (log, retry, fall back to a cached level) and still
/// returns a level.
pub trait DigitalInputSource {
    /// Set `pin` as an input, with or without pull-up, and push `invert`
    /// into hardware if supported.
    fn configure(&mut self, pin: PinId, pull_up: bool, invert: bool);

    /// Current logic level of `pin`.
    fn read_raw(&mut self, pin: PinId) -> bool;

    /// Whether [`read_raw`](Self::read_raw) already reflects `invert`.
    fn hardware_invert(&self) -> bool;
}

/// Share one source (typically an expander) between several buttons.
///
/// Every call takes a short mutable borrow. Sampling must stay
/// single-threaded and non-reentrant, which the polling model guarantees.
impl<T: DigitalInputSource + ?Sized> DigitalInputSource for &RefCell<T> {
    fn configure(&mut self, pin: PinId, pull_up: bool, invert: bool) {
        self.borrow_mut().configure(pin, pull_up, invert);
    }

    fn read_raw(&mut self, pin: PinId) -> bool {
        self.borrow_mut().read_raw(pin)
    }

    fn hardware_invert(&self) -> bool {
        self.borrow().hardware_invert()
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The [`ButtonService`](super::service::ButtonService) emits
/// [`ButtonEvent`](super::events::ButtonEvent)s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ButtonEvent);
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: &super::events::ButtonEvent) {
        (**self).emit(event);
    }
}
