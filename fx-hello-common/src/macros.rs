// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Console logging macros.

/// Log an error-level line through a [`Logger`](crate::logger::Logger).
#[macro_export]
macro_rules! app_err {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Error, format_args!($($arg)*))
    };
}

/// Log a warning-level line through a [`Logger`](crate::logger::Logger).
#[macro_export]
macro_rules! app_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Warning, format_args!($($arg)*))
    };
}

/// Log an info-level line through a [`Logger`](crate::logger::Logger).
#[macro_export]
macro_rules! app_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Info, format_args!($($arg)*))
    };
}

/// Log a trace-level line through a [`Logger`](crate::logger::Logger).
#[macro_export]
macro_rules! app_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::logger::LogLevel::Trace, format_args!($($arg)*))
    };
}

// defmt diagnostics, compiled out without the `defmt` feature.
macro_rules! diag_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    };
}

macro_rules! diag_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    };
}
