//! ButtonService polling a mixed panel into a recording sink.

use std::cell::RefCell;

use buttonkit::app::events::ButtonEvent;
use buttonkit::app::service::{ButtonService, MAX_BUTTONS};
use buttonkit::config::{ButtonConfig, PanelConfig};
use buttonkit::drivers::button::{DebounceEngine, PollButton, ToggleAdapter};
use buttonkit::drivers::gpio::{self, LocalGpio};
use buttonkit::error::Error;

use crate::mock_hw::{MockClock, MockInputBank, RecordingSink};

fn panel(long_press_ms: u32) -> PanelConfig {
    PanelConfig {
        poll_interval_ms: 5,
        long_press_ms,
    }
}

#[test]
fn edges_and_long_press_are_emitted_once() {
    let clock = MockClock::new(0);
    let bank = RefCell::new(MockInputBank::software());
    let cfg = ButtonConfig::new(1);
    let mut btn = DebounceEngine::new(&bank, &clock, cfg);

    let mut sink = RecordingSink::new();
    let mut service = ButtonService::new(panel(500), &mut sink);
    service.attach(&mut btn).unwrap();
    service.begin();

    bank.borrow_mut().press(1);
    for t in (5..=1000).step_by(5) {
        clock.set(t);
        service.tick();
    }
    bank.borrow_mut().release(1);
    for t in (1005..=1100).step_by(5) {
        clock.set(t);
        service.tick();
    }
    assert_eq!(service.tick_count(), 220);
    drop(service);

    assert_eq!(
        sink.take(),
        vec![
            ButtonEvent::Pressed { pin: 1 },
            ButtonEvent::LongPress { pin: 1 },
            ButtonEvent::Released { pin: 1 },
        ]
    );
}

#[test]
fn long_press_rearms_after_release() {
    let clock = MockClock::new(0);
    let bank = RefCell::new(MockInputBank::software());
    let cfg = ButtonConfig::new(2);
    let mut btn = DebounceEngine::new(&bank, &clock, cfg);
    let mut sink = RecordingSink::new();
    let mut service = ButtonService::new(panel(100), &mut sink);
    service.attach(&mut btn).unwrap();
    service.begin();

    let mut t = 0;
    for _ in 0..2 {
        bank.borrow_mut().press(2);
        for _ in 0..40 {
            t += 5;
            clock.set(t);
            service.tick();
        }
        bank.borrow_mut().release(2);
        for _ in 0..10 {
            t += 5;
            clock.set(t);
            service.tick();
        }
    }
    drop(service);

    let longs = sink
        .events
        .iter()
        .filter(|e| matches!(e, ButtonEvent::LongPress { .. }))
        .count();
    assert_eq!(longs, 2);
}

#[test]
fn zero_long_press_disables_it() {
    let clock = MockClock::new(0);
    let bank = RefCell::new(MockInputBank::software());
    let cfg = ButtonConfig::new(3);
    let mut btn = DebounceEngine::new(&bank, &clock, cfg);
    let mut sink = RecordingSink::new();
    let mut service = ButtonService::new(panel(0), &mut sink);
    service.attach(&mut btn).unwrap();
    service.begin();

    bank.borrow_mut().press(3);
    for t in (5..5000).step_by(5) {
        clock.set(t);
        service.tick();
    }
    drop(service);
    assert_eq!(sink.events, vec![ButtonEvent::Pressed { pin: 3 }]);
}

#[test]
fn mixed_panel_local_and_toggle() {
    let clock = MockClock::new(0);
    let bank = RefCell::new(MockInputBank::hardware());

    let local_cfg = ButtonConfig::new(30);
    let mode_cfg = ButtonConfig::new(4);
    let mut local = DebounceEngine::new(LocalGpio::new(), &clock, local_cfg);
    let mut mode = ToggleAdapter::new(DebounceEngine::new(&bank, &clock, mode_cfg), false);

    let mut sink = RecordingSink::new();
    let mut service = ButtonService::new(panel(0), &mut sink);
    service.attach(&mut local).unwrap();
    service.attach(&mut mode).unwrap();
    assert_eq!(service.len(), 2);
    service.begin();
    assert!(gpio::sim_pull_up(30));

    gpio::sim_set_level(30, false);
    bank.borrow_mut().press(4);
    clock.set(30);
    assert_eq!(service.tick(), 2);

    bank.borrow_mut().release(4);
    gpio::sim_release(30);
    clock.set(60);
    assert_eq!(service.tick(), 2);
    drop(service);

    assert_eq!(
        sink.take(),
        vec![
            ButtonEvent::Pressed { pin: 30 },
            ButtonEvent::Toggled { pin: 4, on: true },
            ButtonEvent::Released { pin: 30 },
            ButtonEvent::Released { pin: 4 },
        ]
    );
}

#[test]
fn coarse_cadence_still_attaches() {
    let clock = MockClock::new(0);
    let bank = RefCell::new(MockInputBank::software());
    let cfg = ButtonConfig::new(1).with_debounce_ms(5);
    let mut btn = DebounceEngine::new(&bank, &clock, cfg);
    let mut service = ButtonService::new(panel(0), RecordingSink::new());
    assert!(service.attach(&mut btn).is_ok());
    assert_eq!(service.len(), 1);
    assert!(service.sink().events.is_empty());
}

#[test]
fn cadence_is_checked_against_each_buttons_own_window() {
    let clock = MockClock::new(0);
    let bank = RefCell::new(MockInputBank::hardware());
    let mut fine = DebounceEngine::new(&bank, &clock, ButtonConfig::new(5).with_debounce_ms(40));
    let mut coarse = ToggleAdapter::new(
        DebounceEngine::new(&bank, &clock, ButtonConfig::new(6).with_debounce_ms(5)),
        false,
    );
    let poll = panel(0);
    assert!(poll.check_cadence(fine.config()).is_ok());
    assert_eq!(PollButton::config(&coarse).debounce_ms, 5);
    assert!(poll.check_cadence(PollButton::config(&coarse)).is_err());

    let mut service = ButtonService::new(poll, RecordingSink::new());
    service.attach(&mut fine).unwrap();
    service.attach(&mut coarse).unwrap();
    service.begin();

    bank.borrow_mut().press(6);
    clock.set(10);
    assert_eq!(service.tick(), 1);
    assert_eq!(
        service.sink().events,
        vec![ButtonEvent::Toggled { pin: 6, on: true }]
    );
}

#[test]
fn slot_table_is_bounded() {
    let clock = MockClock::new(0);
    let bank = RefCell::new(MockInputBank::software());
    let mut buttons: Vec<_> = (0..=MAX_BUTTONS as u8)
        .map(|pin| DebounceEngine::new(&bank, &clock, ButtonConfig::new(pin)))
        .collect();

    let mut service = ButtonService::new(PanelConfig::default(), RecordingSink::new());
    assert!(service.is_empty());
    let mut results = buttons
        .iter_mut()
        .map(|b| service.attach(b))
        .collect::<Vec<_>>();

    assert_eq!(results.pop(), Some(Err(Error::Config("button slots exhausted"))));
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(service.len(), MAX_BUTTONS);
}
