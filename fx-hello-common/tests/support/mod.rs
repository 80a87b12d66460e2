// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Recording mocks of the hardware traits.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use fx_hello_common::clocks::{ClockDestination, DividerType, PeripheralClocks};
use fx_hello_common::gpio::{PinConfig, PinConfigurator, PinId};
use fx_hello_common::{
    boot, App, AppVersion, Board, BootStage, LogConfig, LogInterface, LogSink, Platform,
    ACTIVITY_PIN_A, ACTIVITY_PIN_B,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Stage(BootStage),
    DriverLibrary,
    BoardInit,
    SetDivider(DividerType, u32, u32),
    EnableDivider(DividerType, u32),
    AssignDivider(ClockDestination, DividerType, u32),
    DelayUs(u32),
    DelayMs(u32),
    PinInit(PinId, PinConfig),
    WatchdogUnlock,
    WatchdogDisable,
    InterruptsEnabled,
    LogTransport(LogInterface),
    Toggle(PinId),
    Console(Vec<u8>),
}

#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Events with adjacent console writes merged and stage markers removed.
    pub fn collapsed(&self) -> Vec<Event> {
        let mut out: Vec<Event> = Vec::new();
        for event in self.events() {
            match event {
                Event::Stage(_) => {}
                Event::Console(bytes) => match out.last_mut() {
                    Some(Event::Console(prev)) => prev.extend(bytes),
                    _ => out.push(Event::Console(bytes)),
                },
                event => out.push(event),
            }
        }
        out
    }

    /// Everything written to the console, as text.
    pub fn console(&self) -> String {
        let bytes: Vec<u8> = self
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Console(bytes) => Some(bytes),
                _ => None,
            })
            .flatten()
            .collect();
        String::from_utf8(bytes).expect("console output is ASCII")
    }

    /// Index of the first event equal to `event`.
    pub fn position(&self, event: &Event) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }
}

pub struct MockPlatform(pub Trace);

impl Platform for MockPlatform {
    fn init_driver_library(&mut self) {
        self.0.push(Event::DriverLibrary);
    }

    fn init_board(&mut self) {
        self.0.push(Event::BoardInit);
    }

    fn unlock_watchdog(&mut self) {
        self.0.push(Event::WatchdogUnlock);
    }

    fn disable_watchdog(&mut self) {
        self.0.push(Event::WatchdogDisable);
    }

    fn enable_interrupts(&mut self) {
        self.0.push(Event::InterruptsEnabled);
    }

    fn init_log_transport(&mut self, interface: LogInterface) {
        self.0.push(Event::LogTransport(interface));
    }

    fn stage_reached(&mut self, stage: BootStage) {
        self.0.push(Event::Stage(stage));
    }
}

pub struct MockClocks(pub Trace);

impl PeripheralClocks for MockClocks {
    fn set_divider(&mut self, div_type: DividerType, index: u32, value: u32) {
        self.0.push(Event::SetDivider(div_type, index, value));
    }

    fn enable_divider(&mut self, div_type: DividerType, index: u32) {
        self.0.push(Event::EnableDivider(div_type, index));
    }

    fn assign_divider(&mut self, destination: ClockDestination, div_type: DividerType, index: u32) {
        self.0.push(Event::AssignDivider(destination, div_type, index));
    }
}

pub struct MockGpio(pub Trace);

impl PinConfigurator for MockGpio {
    fn pin_init(&mut self, pin: PinId, cfg: &PinConfig) {
        self.0.push(Event::PinInit(pin, *cfg));
    }
}

pub struct MockPin {
    pub id: PinId,
    pub high: bool,
    pub trace: Trace,
}

impl MockPin {
    pub fn new(id: PinId, trace: Trace) -> Self {
        Self {
            id,
            high: false,
            trace,
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for MockPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.high = !self.high;
        self.trace.push(Event::Toggle(self.id));
        Ok(())
    }
}

pub struct MockDelay(pub Trace);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayUs(ns / 1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}

pub struct MockSink(pub Trace);

impl LogSink for MockSink {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.0.push(Event::Console(bytes.to_vec()));
    }
}

pub type MockBoard = Board<MockPlatform, MockClocks, MockGpio, MockPin, MockPin, MockDelay>;
pub type MockApp =
    App<MockPlatform, MockClocks, MockGpio, MockPin, MockPin, MockDelay, MockSink, 1024>;

pub const TEST_VERSION: AppVersion = AppVersion::new(1, 2, 3, 45);

pub const UART_CONFIG: LogConfig = LogConfig {
    level: 3,
    interface: LogInterface::UartScb(1),
    print_now: true,
};

pub fn mock_board(trace: &Trace) -> MockBoard {
    Board {
        platform: MockPlatform(trace.clone()),
        clocks: MockClocks(trace.clone()),
        gpio: MockGpio(trace.clone()),
        pin_a: MockPin::new(ACTIVITY_PIN_A, trace.clone()),
        pin_b: MockPin::new(ACTIVITY_PIN_B, trace.clone()),
        delay: MockDelay(trace.clone()),
    }
}

/// Boot a mock board with the UART console configuration.
pub fn booted() -> (MockApp, Trace) {
    let trace = Trace::new();
    let app = boot(
        mock_board(&trace),
        MockSink(trace.clone()),
        UART_CONFIG,
        TEST_VERSION,
    );
    (app, trace)
}
