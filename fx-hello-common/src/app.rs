// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Boot sequencer and main loop.
//!
//! [`boot`] consumes a [`Board`] and returns a running [`App`]; there is no way
//! back to the un-booted board. The boot order is fixed:
//!
//! 1. driver library init
//! 2. board clock configuration
//! 3. peripheral clocks, then activity pins
//! 4. watchdog unlock and disable
//! 5. interrupt enable
//! 6. logging transport init
//! 7. settle delay
//! 8. banner and version lines
//!
//! The watchdog is never serviced by the loop, so it must be off before the
//! loop starts. Interrupts must be on before a USB-CDC transport can move data.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::StatefulOutputPin;

use crate::clocks::{init_peripheral_clocks, ClockEnables, PeripheralClocks};
use crate::gpio::{init_activity_pins, PinConfigurator};
use crate::logger::{LogConfig, LogInterface, LogSink, Logger};
use crate::version::AppVersion;

pub const STARTUP_BANNER: &str = "***** FX20: Hello World Application *****\r\n";
pub const VERSION_PREFIX: &str = "APP_VERSION: ";

/// Delay between logger init and the first console line.
pub const SETTLE_DELAY_MS: u32 = 500;
/// Main loop period.
pub const LOOP_PERIOD_MS: u32 = 1000;

/// Progress markers reported to [`Platform::stage_reached`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStage {
    DriverLibrary,
    BoardClocks,
    Peripherals,
    Watchdog,
    Interrupts,
    LogTransport,
    Settle,
    Banner,
    Running,
}

/// Device-level operations of the vendor platform.
///
/// All calls are treated as infallible.
pub trait Platform {
    /// Initialize the peripheral driver library.
    fn init_driver_library(&mut self);

    /// Board support clock configuration.
    fn init_board(&mut self);

    fn unlock_watchdog(&mut self);

    fn disable_watchdog(&mut self);

    /// Clear the interrupt priority mask and globally enable interrupts.
    fn enable_interrupts(&mut self);

    /// Bring up the hardware behind the console transport.
    fn init_log_transport(&mut self, interface: LogInterface);

    /// Called as each boot stage starts.
    fn stage_reached(&mut self, _stage: BootStage) {}
}

/// Everything the application drives.
pub struct Board<P, C, G, A, B, D> {
    pub platform: P,
    pub clocks: C,
    pub gpio: G,
    pub pin_a: A,
    pub pin_b: B,
    pub delay: D,
}

/// A booted application.
pub struct App<P, C, G, A, B, D, S, const N: usize> {
    board: Board<P, C, G, A, B, D>,
    logger: Logger<S, N>,
    loop_count: u32,
}

/// Run the boot sequence and hand back the running application.
pub fn boot<P, C, G, A, B, D, S, const N: usize>(
    mut board: Board<P, C, G, A, B, D>,
    sink: S,
    config: LogConfig,
    version: AppVersion,
) -> App<P, C, G, A, B, D, S, N>
where
    P: Platform,
    C: PeripheralClocks,
    G: PinConfigurator,
    D: DelayNs,
    S: LogSink,
{
    board.platform.stage_reached(BootStage::DriverLibrary);
    board.platform.init_driver_library();

    board.platform.stage_reached(BootStage::BoardClocks);
    board.platform.init_board();

    board.platform.stage_reached(BootStage::Peripherals);
    init_peripheral_clocks(&mut board.clocks, &mut board.delay, ClockEnables::ALL);
    init_activity_pins(&mut board.gpio);

    board.platform.stage_reached(BootStage::Watchdog);
    board.platform.unlock_watchdog();
    board.platform.disable_watchdog();

    board.platform.stage_reached(BootStage::Interrupts);
    board.platform.enable_interrupts();

    board.platform.stage_reached(BootStage::LogTransport);
    board.platform.init_log_transport(config.interface);
    let mut logger = Logger::new(sink, config);

    board.platform.stage_reached(BootStage::Settle);
    board.delay.delay_ms(SETTLE_DELAY_MS);

    board.platform.stage_reached(BootStage::Banner);
    app_info!(logger, "{}", STARTUP_BANNER);
    app_info!(logger, "{}{}\r\n", VERSION_PREFIX, version);

    board.platform.stage_reached(BootStage::Running);
    App {
        board,
        logger,
        loop_count: 0,
    }
}

impl<P, C, G, A, B, D, S, const N: usize> App<P, C, G, A, B, D, S, N>
where
    A: StatefulOutputPin,
    B: StatefulOutputPin,
    D: DelayNs,
    S: LogSink,
{
    /// One pass: toggle pin A, report, toggle pin B, count, wait.
    pub fn iterate(&mut self) {
        self.board.pin_a.toggle().ok();
        app_info!(self.logger, "Completed {} loops\r\n", self.loop_count);
        self.board.pin_b.toggle().ok();
        self.loop_count = self.loop_count.wrapping_add(1);
        self.board.delay.delay_ms(LOOP_PERIOD_MS);
    }

    /// Loop forever.
    pub fn run(mut self) -> ! {
        loop {
            self.iterate();
        }
    }
}

impl<P, C, G, A, B, D, S, const N: usize> App<P, C, G, A, B, D, S, N> {
    /// Number of completed iterations (wrapping).
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    /// Start counting from `count`. Only used by tests to reach counter
    /// wrap-around without four billion iterations.
    #[doc(hidden)]
    pub fn with_loop_count(mut self, count: u32) -> Self {
        self.loop_count = count;
        self
    }

    pub fn board(&self) -> &Board<P, C, G, A, B, D> {
        &self.board
    }

    pub fn logger(&self) -> &Logger<S, N> {
        &self.logger
    }
}
