// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Build-time configuration.

use fx_hello_common::{AppVersion, LogConfig, LogInterface};

/// Serial communication block carrying the UART console.
pub const LOGGING_SCB_IDX: u8 = 1;
/// Highest console log level emitted (3 = info).
pub const DEBUG_LEVEL: u8 = 3;
/// Size of the console ring buffer.
pub const LOGBUF_SIZE: usize = 1024;

#[cfg(not(feature = "usbfs-logs"))]
pub const LOG_INTERFACE: LogInterface = LogInterface::UartScb(LOGGING_SCB_IDX);
#[cfg(feature = "usbfs-logs")]
pub const LOG_INTERFACE: LogInterface = LogInterface::UsbfsCdc;

pub const LOG_CONFIG: LogConfig = LogConfig {
    level: DEBUG_LEVEL,
    interface: LOG_INTERFACE,
    print_now: true,
};

/// Version from the workspace `VERSION` file.
pub const APP_VERSION: AppVersion = match AppVersion::parse(env!("APP_VERSION")) {
    Ok(version) => version,
    Err(_) => panic!("VERSION must be major.minor.patch.build (0-99, build 0-9999)"),
};
