// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Common types and logic for the FX10/FX20 hello world firmware.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for the firmware image
//! - `std` feature: Enables `std` support for host tools
//! - `defmt` feature: Derives `defmt::Format` and emits boot-stage traces
//!
//! Hardware access goes through small traits (`Platform`, `PeripheralClocks`,
//! `PinConfigurator`) plus the `embedded-hal` pin and delay traits, so the whole
//! boot sequence and main loop run unchanged against host-side mocks.

#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod macros;

pub mod app;
pub mod clocks;
pub mod gpio;
pub mod logger;
pub mod transcript;
pub mod version;

// Re-export commonly used types
pub use app::{boot, App, Board, BootStage, Platform};
pub use app::{LOOP_PERIOD_MS, SETTLE_DELAY_MS, STARTUP_BANNER, VERSION_PREFIX};
pub use clocks::{init_peripheral_clocks, ClockEnables, PeripheralClocks};
pub use gpio::{init_activity_pins, PinConfigurator, PinId, ACTIVITY_PIN_A, ACTIVITY_PIN_B};
pub use logger::{LogConfig, LogInterface, LogLevel, LogSink, Logger};
pub use transcript::{ConsoleLine, TranscriptChecker, TranscriptError};
pub use version::{AppVersion, VersionError};
