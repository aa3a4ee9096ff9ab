//! Buttons on a (fake) MCP23017 shared over one I2C bus.

use std::cell::RefCell;

use buttonkit::config::ButtonConfig;
use buttonkit::drivers::button::{DebounceEngine, ToggleAdapter};
use buttonkit::drivers::mcp23017::{DEFAULT_ADDRESS, Mcp23017};

use crate::mock_hw::{FakeBus, GPPUA, IODIRA, IPOLA, MockClock};

#[test]
fn begin_programs_expander_registers() {
    let bus = FakeBus::new(DEFAULT_ADDRESS);
    let expander = RefCell::new(Mcp23017::new(bus.clone(), DEFAULT_ADDRESS));
    let clock = MockClock::new(0);

    let mut a = DebounceEngine::new(&expander, &clock, ButtonConfig::new(2));
    let mut b = DebounceEngine::new(
        &expander,
        &clock,
        ButtonConfig::new(10).with_pull_up(false).with_invert(false),
    );
    a.begin();
    b.begin();

    assert_eq!(bus.reg(IODIRA), 0b0000_0100);
    assert_eq!(bus.reg(IODIRA + 1), 0b0000_0100);
    assert_eq!(bus.reg(GPPUA), 0b0000_0100);
    assert_eq!(bus.reg(GPPUA + 1), 0);
    assert_eq!(bus.reg(IPOLA), 0b0000_0100, "invert goes to IPOL");
    assert_eq!(bus.reg(IPOLA + 1), 0);
}

#[test]
fn hardware_inverted_press_and_release() {
    let bus = FakeBus::new(DEFAULT_ADDRESS);
    let expander = RefCell::new(Mcp23017::new(bus.clone(), DEFAULT_ADDRESS));
    let clock = MockClock::new(0);
    let mut btn = DebounceEngine::new(&expander, &clock, ButtonConfig::new(7));

    assert!(!btn.begin(), "idle-high pin reads released through IPOL");

    bus.set_input(7, false);
    clock.set(15);
    assert!(!btn.read());
    clock.set(40);
    assert!(btn.read());
    assert!(btn.was_pressed());

    bus.set_input(7, true);
    clock.set(70);
    assert!(!btn.read());
    assert!(btn.was_released());
}

#[test]
fn shared_expander_serves_plain_and_toggle_buttons() {
    let bus = FakeBus::new(DEFAULT_ADDRESS);
    let expander = RefCell::new(Mcp23017::new(bus.clone(), DEFAULT_ADDRESS));
    let clock = MockClock::new(0);

    let mut select = DebounceEngine::new(&expander, &clock, ButtonConfig::new(0));
    let mut mode = ToggleAdapter::new(
        DebounceEngine::new(&expander, &clock, ButtonConfig::new(9)),
        false,
    );
    select.begin();
    mode.begin();

    bus.set_input(9, false);
    clock.set(30);
    assert!(!select.read());
    assert!(mode.read());
    assert!(mode.changed());
}

#[test]
fn bus_fault_holds_last_level() {
    let bus = FakeBus::new(DEFAULT_ADDRESS);
    let expander = RefCell::new(Mcp23017::new(bus.clone(), DEFAULT_ADDRESS));
    let clock = MockClock::new(0);
    let mut btn = DebounceEngine::new(&expander, &clock, ButtonConfig::new(4));
    btn.begin();

    bus.set_input(4, false);
    clock.set(30);
    assert!(btn.read());

    bus.set_offline(true);
    bus.set_input(4, true);
    clock.set(100);
    assert!(btn.read(), "no spurious release while the device is unreachable");
    assert!(!btn.was_released());

    bus.set_offline(false);
    clock.set(110);
    assert!(!btn.read());
    assert!(btn.was_released());
}

#[test]
fn wrong_address_reads_released() {
    let bus = FakeBus::new(0x21);
    let expander = RefCell::new(Mcp23017::new(bus.clone(), DEFAULT_ADDRESS));
    let clock = MockClock::new(0);
    let mut btn = DebounceEngine::new(&expander, &clock, ButtonConfig::new(1));
    assert!(!btn.begin());
    bus.set_input(1, false);
    clock.set(100);
    assert!(!btn.read(), "unreachable device surfaces as a wrong reading");
    assert_eq!(bus.transactions(), 0);
}
