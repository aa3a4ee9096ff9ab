//! Local-pin input backends.
//!
//! - [`LocalGpio`]: the MCU's own GPIO bank. Raw ESP-IDF calls on target;
//!   an in-memory pin bank on the host, driven by `sim_*` helpers.
//! - [`HalPin`]: any single `embedded_hal::digital::InputPin`. Pull-up is
//!   whatever the HAL configured when the pin was created.
//!
//! Neither can invert in hardware; the debounce engine inverts in software.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU64, Ordering};

use embedded_hal::digital::InputPin;
use log::{debug, warn};

use crate::app::ports::{DigitalInputSource, PinId};
use crate::error::{Error, Result};

/// First GPIO number past the end of the bank (ESP32-S3: GPIO0–GPIO48).
pub const GPIO_COUNT: PinId = 49;

// ── Host simulation state ─────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_PULL_UPS: AtomicU64 = AtomicU64::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_DRIVEN: AtomicU64 = AtomicU64::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_LEVELS: AtomicU64 = AtomicU64::new(0);

/// Drive a simulated pin high or low, overriding its pull resistor.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: PinId, high: bool) {
    let bit = 1u64 << (pin % 64);
    if high {
        SIM_LEVELS.fetch_or(bit, Ordering::Relaxed);
    } else {
        SIM_LEVELS.fetch_and(!bit, Ordering::Relaxed);
    }
    SIM_DRIVEN.fetch_or(bit, Ordering::Relaxed);
}

/// Stop driving a simulated pin; it floats to its pull-up state.
#[cfg(not(target_os = "espidf"))]
pub fn sim_release(pin: PinId) {
    SIM_DRIVEN.fetch_and(!(1u64 << (pin % 64)), Ordering::Relaxed);
}

/// Whether a simulated pin has its pull-up enabled.
#[cfg(not(target_os = "espidf"))]
pub fn sim_pull_up(pin: PinId) -> bool {
    SIM_PULL_UPS.load(Ordering::Relaxed) & (1u64 << (pin % 64)) != 0
}

// ── LocalGpio ─────────────────────────────────────────────────

/// The MCU's own GPIO bank as a [`DigitalInputSource`].
pub struct LocalGpio;

impl Default for LocalGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalGpio {
    pub fn new() -> Self {
        Self
    }

    /// Configure `pin` as an input with optional pull-up, interrupts off.
    #[cfg(target_os = "espidf")]
    pub fn configure_input(&mut self, pin: PinId, pull_up: bool) -> Result<()> {
        use esp_idf_svc::sys::*;

        if pin >= GPIO_COUNT {
            return Err(Error::Config("gpio pin out of range"));
        }
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: if pull_up {
                gpio_pullup_t_GPIO_PULLUP_ENABLE
            } else {
                gpio_pullup_t_GPIO_PULLUP_DISABLE
            },
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: gpio_config only touches the pins in pin_bit_mask; the
        // config struct lives for the duration of the call.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::Gpio(ret));
        }
        Ok(())
    }

    /// Configure `pin` as an input with optional pull-up.
    #[cfg(not(target_os = "espidf"))]
    pub fn configure_input(&mut self, pin: PinId, pull_up: bool) -> Result<()> {
        if pin >= GPIO_COUNT {
            return Err(Error::Config("gpio pin out of range"));
        }
        let bit = 1u64 << pin;
        if pull_up {
            SIM_PULL_UPS.fetch_or(bit, Ordering::Relaxed);
        } else {
            SIM_PULL_UPS.fetch_and(!bit, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Instantaneous level of `pin`.
    #[cfg(target_os = "espidf")]
    pub fn level(&self, pin: PinId) -> bool {
        // SAFETY: gpio_get_level is a read-only register access.
        (unsafe { esp_idf_svc::sys::gpio_get_level(i32::from(pin)) }) != 0
    }

    /// Instantaneous level of `pin`. An undriven pin reads its pull-up.
    #[cfg(not(target_os = "espidf"))]
    pub fn level(&self, pin: PinId) -> bool {
        if pin >= GPIO_COUNT {
            return false;
        }
        let bit = 1u64 << pin;
        if SIM_DRIVEN.load(Ordering::Relaxed) & bit != 0 {
            SIM_LEVELS.load(Ordering::Relaxed) & bit != 0
        } else {
            SIM_PULL_UPS.load(Ordering::Relaxed) & bit != 0
        }
    }
}

impl DigitalInputSource for LocalGpio {
    fn configure(&mut self, pin: PinId, pull_up: bool, _invert: bool) {
        match self.configure_input(pin, pull_up) {
            Ok(()) => debug!("gpio {}: input, pull_up={}", pin, pull_up),
            Err(e) => warn!("gpio {}: {}", pin, e),
        }
    }

    fn read_raw(&mut self, pin: PinId) -> bool {
        self.level(pin)
    }

    fn hardware_invert(&self) -> bool {
        false
    }
}

// ── HalPin ────────────────────────────────────────────────────

/// One `embedded-hal` input pin as a [`DigitalInputSource`].
///
/// The pin id passed by the engine is only used for logging. A read error
/// is logged and reported as the last good level.
pub struct HalPin<P> {
    pin: P,
    last: bool,
}

impl<P: InputPin> HalPin<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, last: false }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> DigitalInputSource for HalPin<P> {
    fn configure(&mut self, pin: PinId, pull_up: bool, _invert: bool) {
        debug!("hal pin {}: pull_up={} (set by HAL)", pin, pull_up);
    }

    fn read_raw(&mut self, pin: PinId) -> bool {
        match self.pin.is_high() {
            Ok(high) => self.last = high,
            Err(e) => warn!("hal pin {}: read failed ({:?})", pin, e),
        }
        self.last
    }

    fn hardware_invert(&self) -> bool {
        false
    }
}
