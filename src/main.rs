//! Button panel firmware: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  LocalGpio (GPIO16)      Mcp23017 @0x20 (GPA0, GPA1)         │
//! │        │                   │ RefCell, shared                 │
//! │        ▼                   ▼                                 │
//! │  DebounceEngine      DebounceEngine   ToggleAdapter          │
//! │        └──────────── PollButton ──────────┘                  │
//! │                         │                                    │
//! │                   ButtonService ──▶ LogEventSink             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::cell::RefCell;

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::info;

use buttonkit::adapters::log_sink::LogEventSink;
use buttonkit::adapters::time::SystemClock;
use buttonkit::app::service::ButtonService;
use buttonkit::config::{ButtonConfig, PanelConfig};
use buttonkit::drivers::button::{DebounceEngine, ToggleAdapter};
use buttonkit::drivers::gpio::LocalGpio;
use buttonkit::drivers::mcp23017::Mcp23017;
use buttonkit::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("buttonkit v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Buses and backends ─────────────────────────────────
    let p = Peripherals::take()?;
    // SDA = GPIO14, SCL = GPIO15.
    let i2c_cfg = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let i2c = I2cDriver::new(p.i2c0, p.pins.gpio14, p.pins.gpio15, &i2c_cfg)?;
    let expander = RefCell::new(Mcp23017::new(i2c, pins::EXPANDER_ADDRESS));
    let clock = SystemClock::new();
    let panel = PanelConfig::default();

    // ── 3. Buttons ────────────────────────────────────────────
    let local_cfg = ButtonConfig::new(pins::BUTTON_GPIO);
    let select_cfg = ButtonConfig::new(pins::EXPANDER_SELECT_PIN);
    let mode_cfg = ButtonConfig::new(pins::EXPANDER_MODE_PIN).with_debounce_ms(40);

    let mut local = DebounceEngine::new(LocalGpio::new(), &clock, local_cfg);
    let mut select = DebounceEngine::new(&expander, &clock, select_cfg);
    let mut mode = ToggleAdapter::new(DebounceEngine::new(&expander, &clock, mode_cfg), false);

    let mut service = ButtonService::new(panel, LogEventSink::new());
    service.attach(&mut local)?;
    service.attach(&mut select)?;
    service.attach(&mut mode)?;
    service.begin();

    info!("System ready. Polling {} buttons.", service.len());

    // ── 4. Polling loop ───────────────────────────────────────
    loop {
        service.tick();
        FreeRtos::delay_ms(panel.poll_interval_ms);
    }
}
