//! Outbound button events.
//!
//! The [`ButtonService`](super::service::ButtonService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them.

use super::ports::PinId;

/// Edge-level events derived from debounced button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// A press edge was accepted.
    Pressed { pin: PinId },

    /// A release edge was accepted.
    Released { pin: PinId },

    /// The button has been held for the configured long-press time.
    /// Raised once per hold.
    LongPress { pin: PinId },

    /// A toggle button flipped on a press edge.
    Toggled { pin: PinId, on: bool },
}

impl ButtonEvent {
    /// Pin the event originated from.
    pub fn pin(&self) -> PinId {
        match *self {
            Self::Pressed { pin }
            | Self::Released { pin }
            | Self::LongPress { pin }
            | Self::Toggled { pin, .. } => pin,
        }
    }
}
