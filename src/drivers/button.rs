//! Time-guard debounced push-button with edge, hold, and toggle semantics.
//!
//! ## Filter
//!
//! Each [`read`](DebounceEngine::read) takes one raw sample and one
//! timestamp. Inside the guard window `[last_change, last_change + window)`
//! the debounced state is frozen; outside it the raw sample is accepted as-is.
//! This is not an oversampling filter: the caller must poll materially
//! faster than the debounce window, otherwise a bounce that falls entirely
//! between two samples is never seen.
//!
//! | Query           | True when                                         |
//! |-----------------|---------------------------------------------------|
//! | `is_pressed`    | debounced state is pressed                        |
//! | `was_pressed`   | the last `read()` accepted a release → press edge |
//! | `pressed_for(d)`| pressed, and `last_read - last_change >= d`       |
//!
//! ## Backends
//!
//! One engine serves every [`DigitalInputSource`]. Backends that can invert
//! in hardware (the MCP23017 IPOL register) do so; for the rest the engine
//! flips the level in software. The filter itself never knows which.

use log::{debug, info};

use crate::app::events::ButtonEvent;
use crate::app::ports::{Clock, DigitalInputSource, Millis, PinId};
use crate::config::ButtonConfig;

/// Debounced view of one physical button.
///
/// The engine owns its configuration and filter state. It holds the input
/// source and clock by value; pass references (`&RefCell<_>`, `&_`) to share
/// them between buttons.
pub struct DebounceEngine<S, C> {
    source: S,
    clock: C,
    config: ButtonConfig,
    /// `invert` requested but not applied by the backend.
    soft_invert: bool,
    state: bool,
    last_state: bool,
    changed: bool,
    time: Millis,
    last_change: Millis,
}

impl<S: DigitalInputSource, C: Clock> DebounceEngine<S, C> {
    pub fn new(source: S, clock: C, config: ButtonConfig) -> Self {
        let soft_invert = config.invert && !source.hardware_invert();
        Self {
            source,
            clock,
            config,
            soft_invert,
            state: false,
            last_state: false,
            changed: false,
            time: 0,
            last_change: 0,
        }
    }

    /// Configure the pin and take the baseline state.
    ///
    /// Call once before the first [`read`](Self::read). The baseline is
    /// accepted immediately, without waiting out a guard window.
    pub fn begin(&mut self) -> bool {
        let ButtonConfig {
            pin,
            pull_up,
            invert,
            ..
        } = self.config;
        self.source.configure(pin, pull_up, invert);

        self.state = self.sample_level();
        self.time = self.clock.now_ms();
        self.last_state = self.state;
        self.changed = false;
        self.last_change = self.time;

        info!(
            "button {}: begin (window={}ms, pull_up={}, invert={}{}) -> {}",
            pin,
            self.config.debounce_ms,
            pull_up,
            invert,
            if self.soft_invert { " sw" } else { "" },
            state_name(self.state),
        );
        self.state
    }

    /// Sample the pin and update the debounced state. Returns `true` while
    /// pressed. Call on every iteration of the polling loop.
    pub fn read(&mut self) -> bool {
        let now = self.clock.now_ms();
        let level = self.sample_level();

        if now.wrapping_sub(self.last_change) < self.config.debounce_ms {
            self.changed = false;
        } else {
            self.last_state = self.state;
            self.state = level;
            self.changed = self.state != self.last_state;
            if self.changed {
                self.last_change = now;
                debug!(
                    "button {}: {} at {}ms",
                    self.config.pin,
                    state_name(self.state),
                    now
                );
            }
        }

        self.time = now;
        self.state
    }

    fn sample_level(&mut self) -> bool {
        self.source.read_raw(self.config.pin) ^ self.soft_invert
    }
}

impl<S, C> DebounceEngine<S, C> {
    /// Debounced state at the last read.
    pub fn is_pressed(&self) -> bool {
        self.state
    }

    pub fn is_released(&self) -> bool {
        !self.state
    }

    /// The last read accepted a press edge.
    pub fn was_pressed(&self) -> bool {
        self.state && self.changed
    }

    /// The last read accepted a release edge.
    pub fn was_released(&self) -> bool {
        !self.state && self.changed
    }

    /// Pressed, and stable for at least `ms` as of the last read.
    pub fn pressed_for(&self, ms: Millis) -> bool {
        self.state && self.time.wrapping_sub(self.last_change) >= ms
    }

    /// Released, and stable for at least `ms` as of the last read.
    pub fn released_for(&self, ms: Millis) -> bool {
        !self.state && self.time.wrapping_sub(self.last_change) >= ms
    }

    /// Timestamp of the last accepted transition (or of `begin()`).
    pub fn last_change(&self) -> Millis {
        self.last_change
    }

    /// Debounced state before the most recent accepted transition.
    pub fn previous_state(&self) -> bool {
        self.last_state
    }

    pub fn pin(&self) -> PinId {
        self.config.pin
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Give back the input source and clock.
    pub fn release(self) -> (S, C) {
        (self.source, self.clock)
    }
}

fn state_name(pressed: bool) -> &'static str {
    if pressed { "pressed" } else { "released" }
}

// ───────────────────────────────────────────────────────────────
// Toggle ("push-on, push-off") button
// ───────────────────────────────────────────────────────────────

/// Flips a persistent on/off state on every accepted press edge.
///
/// Wraps a [`DebounceEngine`] by composition. The engine is only reachable
/// read-only, so every sample goes through [`read`](Self::read) and no
/// press edge can slip past the toggle.
pub struct ToggleAdapter<S, C> {
    button: DebounceEngine<S, C>,
    toggle_state: bool,
    changed: bool,
}

impl<S: DigitalInputSource, C: Clock> ToggleAdapter<S, C> {
    pub fn new(button: DebounceEngine<S, C>, initial_state: bool) -> Self {
        Self {
            button,
            toggle_state: initial_state,
            changed: false,
        }
    }

    pub fn begin(&mut self) -> bool {
        self.button.begin();
        self.changed = false;
        self.toggle_state
    }

    /// Sample the button and return the toggle state.
    pub fn read(&mut self) -> bool {
        self.button.read();
        if self.button.was_pressed() {
            self.toggle_state = !self.toggle_state;
            self.changed = true;
            debug!(
                "button {}: toggled {}",
                self.button.pin(),
                if self.toggle_state { "on" } else { "off" }
            );
        } else {
            self.changed = false;
        }
        self.toggle_state
    }
}

impl<S, C> ToggleAdapter<S, C> {
    /// The last read flipped the toggle.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn toggle_state(&self) -> bool {
        self.toggle_state
    }

    pub fn button(&self) -> &DebounceEngine<S, C> {
        &self.button
    }

    pub fn into_inner(self) -> DebounceEngine<S, C> {
        self.button
    }
}

// ───────────────────────────────────────────────────────────────
// Object-safe polling interface
// ───────────────────────────────────────────────────────────────

/// Uniform polling over plain and toggle buttons with different backends.
pub trait PollButton {
    fn pin(&self) -> PinId;

    /// The configuration the button was built with.
    fn config(&self) -> &ButtonConfig;

    /// Configure the pin and take the baseline state.
    fn begin(&mut self);

    /// Sample once; return the edge event this sample produced, if any.
    fn poll(&mut self) -> Option<ButtonEvent>;

    fn is_pressed(&self) -> bool;

    fn pressed_for(&self, ms: Millis) -> bool;
}

impl<S: DigitalInputSource, C: Clock> PollButton for DebounceEngine<S, C> {
    fn pin(&self) -> PinId {
        self.config.pin
    }

    fn config(&self) -> &ButtonConfig {
        &self.config
    }

    fn begin(&mut self) {
        DebounceEngine::begin(self);
    }

    fn poll(&mut self) -> Option<ButtonEvent> {
        self.read();
        let pin = self.config.pin;
        if self.was_pressed() {
            Some(ButtonEvent::Pressed { pin })
        } else if self.was_released() {
            Some(ButtonEvent::Released { pin })
        } else {
            None
        }
    }

    fn is_pressed(&self) -> bool {
        self.state
    }

    fn pressed_for(&self, ms: Millis) -> bool {
        DebounceEngine::pressed_for(self, ms)
    }
}

impl<S: DigitalInputSource, C: Clock> PollButton for ToggleAdapter<S, C> {
    fn pin(&self) -> PinId {
        self.button.pin()
    }

    fn config(&self) -> &ButtonConfig {
        &self.button.config
    }

    fn begin(&mut self) {
        ToggleAdapter::begin(self);
    }

    fn poll(&mut self) -> Option<ButtonEvent> {
        self.read();
        let pin = self.button.pin();
        if self.changed {
            Some(ButtonEvent::Toggled {
                pin,
                on: self.toggle_state,
            })
        } else if self.button.was_released() {
            Some(ButtonEvent::Released { pin })
        } else {
            None
        }
    }

    fn is_pressed(&self) -> bool {
        self.button.is_pressed()
    }

    fn pressed_for(&self, ms: Millis) -> bool {
        self.button.pressed_for(ms)
    }
}
