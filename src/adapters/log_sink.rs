//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing button events to the logger
//! (UART / USB-CDC in production). A future MQTT or BLE adapter would
//! implement the same trait.

use log::info;

use crate::app::events::ButtonEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ButtonEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { emitted: 0 }
    }

    /// Events logged so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ButtonEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            ButtonEvent::Pressed { pin } => info!("BTN | pin {} pressed", pin),
            ButtonEvent::Released { pin } => info!("BTN | pin {} released", pin),
            ButtonEvent::LongPress { pin } => info!("BTN | pin {} long press", pin),
            ButtonEvent::Toggled { pin, on } => {
                info!("BTN | pin {} toggled {}", pin, if *on { "ON" } else { "OFF" });
            }
        }
    }
}
