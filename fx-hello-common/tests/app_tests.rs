// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Boot order and main loop behaviour against recording mocks.

mod support;

use fx_hello_common::clocks::{ClockDestination, DividerType};
use fx_hello_common::{
    boot, BootStage, LogConfig, LogInterface, ACTIVITY_PIN_A, ACTIVITY_PIN_B, LOOP_PERIOD_MS,
    SETTLE_DELAY_MS, STARTUP_BANNER,
};
use support::{booted, mock_board, Event, MockApp, MockSink, Trace, TEST_VERSION};

const VERSION_LINE: &str = "APP_VERSION: 1.2.3.45\r\n";

fn is_pin_init(event: &Event) -> bool {
    matches!(event, Event::PinInit(..))
}

#[test]
fn test_boot_sequence_order() {
    let (_app, trace) = booted();
    let events = trace.collapsed();

    let mut expected = vec![
        Event::DriverLibrary,
        Event::BoardInit,
        Event::SetDivider(DividerType::Div16, 1, 74),
        Event::EnableDivider(DividerType::Div16, 1),
        Event::DelayUs(10),
        Event::AssignDivider(ClockDestination::UsbssAdc, DividerType::Div16, 1),
        Event::SetDivider(DividerType::Div16, 2, 749),
        Event::EnableDivider(DividerType::Div16, 2),
        Event::DelayUs(10),
        Event::AssignDivider(ClockDestination::UsbfsBusReset, DividerType::Div16, 2),
    ];
    expected.extend(events.iter().filter(|e| is_pin_init(e)).cloned());
    expected.extend([
        Event::WatchdogUnlock,
        Event::WatchdogDisable,
        Event::InterruptsEnabled,
        Event::LogTransport(LogInterface::UartScb(1)),
        Event::DelayMs(SETTLE_DELAY_MS),
        Event::Console(format!("{}{}", STARTUP_BANNER, VERSION_LINE).into_bytes()),
    ]);

    assert_eq!(events.iter().filter(|e| is_pin_init(e)).count(), 2);
    assert_eq!(events, expected);
}

#[test]
fn test_boot_stages_reported_in_order() {
    let (_app, trace) = booted();
    let stages: Vec<BootStage> = trace
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Stage(stage) => Some(stage),
            _ => None,
        })
        .collect();

    assert_eq!(
        stages,
        vec![
            BootStage::DriverLibrary,
            BootStage::BoardClocks,
            BootStage::Peripherals,
            BootStage::Watchdog,
            BootStage::Interrupts,
            BootStage::LogTransport,
            BootStage::Settle,
            BootStage::Banner,
            BootStage::Running,
        ]
    );
}

#[test]
fn test_watchdog_disabled_before_first_iteration() {
    let (mut app, trace) = booted();
    app.iterate();

    let disable = trace.position(&Event::WatchdogDisable).unwrap();
    let unlock = trace.position(&Event::WatchdogUnlock).unwrap();
    let first_toggle = trace.position(&Event::Toggle(ACTIVITY_PIN_A)).unwrap();
    assert!(unlock < disable);
    assert!(disable < first_toggle);
}

#[test]
fn test_interrupts_enabled_before_log_transport() {
    let (_app, trace) = booted();

    let irq = trace.position(&Event::InterruptsEnabled).unwrap();
    let transport = trace
        .position(&Event::LogTransport(LogInterface::UartScb(1)))
        .unwrap();
    assert!(irq < transport);
}

#[test]
fn test_banner_once_then_version() {
    let (mut app, trace) = booted();
    for _ in 0..3 {
        app.iterate();
    }

    let console = trace.console();
    assert_eq!(console.matches(STARTUP_BANNER).count(), 1);
    assert!(console.starts_with(STARTUP_BANNER));
    assert_eq!(&console[STARTUP_BANNER.len()..][..VERSION_LINE.len()], VERSION_LINE);
}

#[test]
fn test_no_console_output_before_settle_delay() {
    let (_app, trace) = booted();
    let events = trace.events();

    let settle = trace.position(&Event::DelayMs(SETTLE_DELAY_MS)).unwrap();
    assert!(events[..settle]
        .iter()
        .all(|e| !matches!(e, Event::Console(_))));
}

#[test]
fn test_loop_lines_count_up_from_zero() {
    let (mut app, trace) = booted();
    trace.clear();

    for _ in 0..5 {
        app.iterate();
    }

    assert_eq!(
        trace.console(),
        "Completed 0 loops\r\n\
         Completed 1 loops\r\n\
         Completed 2 loops\r\n\
         Completed 3 loops\r\n\
         Completed 4 loops\r\n"
    );
    assert_eq!(app.loop_count(), 5);
}

#[test]
fn test_iteration_order() {
    let (mut app, trace) = booted();
    trace.clear();
    app.iterate();

    assert_eq!(
        trace.collapsed(),
        vec![
            Event::Toggle(ACTIVITY_PIN_A),
            Event::Console(b"Completed 0 loops\r\n".to_vec()),
            Event::Toggle(ACTIVITY_PIN_B),
            Event::DelayMs(LOOP_PERIOD_MS),
        ]
    );
}

#[test]
fn test_each_pin_toggles_once_per_iteration() {
    let (mut app, trace) = booted();
    trace.clear();

    for n in 1..=4 {
        app.iterate();
        let events = trace.events();
        let a = events
            .iter()
            .filter(|e| **e == Event::Toggle(ACTIVITY_PIN_A))
            .count();
        let b = events
            .iter()
            .filter(|e| **e == Event::Toggle(ACTIVITY_PIN_B))
            .count();
        assert_eq!(a, n);
        assert_eq!(b, n);
    }

    // Even number of toggles: both pins back at their reset level.
    assert!(!app.board().pin_a.high);
    assert!(!app.board().pin_b.high);
}

#[test]
fn test_one_period_between_toggles_of_same_pin() {
    let (mut app, trace) = booted();
    trace.clear();
    app.iterate();
    app.iterate();

    let events = trace.collapsed();
    let toggles: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| **e == Event::Toggle(ACTIVITY_PIN_A))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(toggles.len(), 2);

    let between = &events[toggles[0]..toggles[1]];
    let delays: Vec<&Event> = between
        .iter()
        .filter(|e| matches!(e, Event::DelayMs(_) | Event::DelayUs(_)))
        .collect();
    assert_eq!(delays, vec![&Event::DelayMs(LOOP_PERIOD_MS)]);
}

#[test]
fn test_loop_counter_wraps() {
    let (app, trace) = booted();
    let mut app: MockApp = app.with_loop_count(u32::MAX);
    trace.clear();

    app.iterate();
    app.iterate();

    assert_eq!(
        trace.console(),
        "Completed 4294967295 loops\r\nCompleted 0 loops\r\n"
    );
    assert_eq!(app.loop_count(), 1);
}

#[test]
fn test_usb_cdc_transport_selected_by_config() {
    let trace = Trace::new();
    let config = LogConfig {
        level: 3,
        interface: LogInterface::UsbfsCdc,
        print_now: true,
    };
    let app: MockApp = boot(mock_board(&trace), MockSink(trace.clone()), config, TEST_VERSION);

    assert!(trace
        .position(&Event::LogTransport(LogInterface::UsbfsCdc))
        .is_some());
    assert_eq!(app.logger().config().interface, LogInterface::UsbfsCdc);
}

#[test]
fn test_quiet_log_level_keeps_loop_running() {
    let trace = Trace::new();
    let config = LogConfig {
        level: 2,
        interface: LogInterface::UartScb(1),
        print_now: true,
    };
    let mut app: MockApp = boot(mock_board(&trace), MockSink(trace.clone()), config, TEST_VERSION);
    app.iterate();

    assert_eq!(trace.console(), "");
    assert!(trace.position(&Event::Toggle(ACTIVITY_PIN_B)).is_some());
    assert_eq!(app.loop_count(), 1);
}
