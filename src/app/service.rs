//! Button service: the polling loop around a board's buttons.
//!
//! [`ButtonService`] holds every attached button behind the object-safe
//! [`PollButton`] trait, so plain and toggle buttons on local GPIO and on
//! an expander are driven by the same loop.
//!
//! ```text
//!  PollButton ×N ──▶ ┌───────────────────────┐ ──▶ EventSink
//!                    │     ButtonService     │
//!                    │ edges · long press    │
//!                    └───────────────────────┘
//! ```
//!
//! Cooperative and single-threaded: one `tick()` samples each button
//! exactly once, in attach order.

use heapless::Vec;
use log::{info, warn};

use crate::config::PanelConfig;
use crate::drivers::button::PollButton;
use crate::error::{Error, Result};

use super::events::ButtonEvent;
use super::ports::EventSink;

/// Buttons one service can drive.
pub const MAX_BUTTONS: usize = 16;

struct Slot<'a> {
    button: &'a mut dyn PollButton,
    long_fired: bool,
}

pub struct ButtonService<'a, K: EventSink> {
    slots: Vec<Slot<'a>, MAX_BUTTONS>,
    sink: K,
    config: PanelConfig,
    tick_count: u64,
}

impl<'a, K: EventSink> ButtonService<'a, K> {
    pub fn new(config: PanelConfig, sink: K) -> Self {
        Self {
            slots: Vec::new(),
            sink,
            config,
            tick_count: 0,
        }
    }

    /// Add a button. It is not sampled until [`begin`](Self::begin).
    ///
    /// A button whose debounce window is not wider than the poll interval
    /// is still attached, with a warning.
    pub fn attach(&mut self, button: &'a mut dyn PollButton) -> Result<()> {
        if let Err(e) = self.config.check_cadence(button.config()) {
            warn!("button {}: {}", button.pin(), e);
        }
        let pin = button.pin();
        self.slots
            .push(Slot {
                button,
                long_fired: false,
            })
            .map_err(|_| Error::Config("button slots exhausted"))?;
        info!("button {}: attached ({} total)", pin, self.slots.len());
        Ok(())
    }

    /// Configure every attached button and take its baseline.
    pub fn begin(&mut self) {
        for slot in &mut self.slots {
            slot.button.begin();
            slot.long_fired = false;
        }
    }

    /// Sample every button once. Returns the number of events emitted.
    pub fn tick(&mut self) -> usize {
        self.tick_count += 1;
        let long_press_ms = self.config.long_press_ms;
        let mut emitted = 0;

        for slot in &mut self.slots {
            if let Some(event) = slot.button.poll() {
                self.sink.emit(&event);
                emitted += 1;
            }

            if !slot.button.is_pressed() {
                slot.long_fired = false;
            } else if long_press_ms > 0
                && !slot.long_fired
                && slot.button.pressed_for(long_press_ms)
            {
                slot.long_fired = true;
                self.sink.emit(&ButtonEvent::LongPress {
                    pin: slot.button.pin(),
                });
                emitted += 1;
            }
        }

        emitted
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }
}
