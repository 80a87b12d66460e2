// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Console byte sinks.

use core::ffi::c_void;

use fx_hello_common::LogSink;

use crate::pdl;

/// Blocking writes to an SCB configured as UART.
pub struct UartSink {
    base: *mut c_void,
}

impl UartSink {
    pub fn new(scb_index: u8) -> Self {
        Self {
            base: pdl::scb(scb_index),
        }
    }
}

impl LogSink for UartSink {
    fn write_bytes(&mut self, bytes: &[u8]) {
        // SAFETY: the PDL only reads `size` bytes from the buffer.
        unsafe {
            pdl::Cy_SCB_UART_PutArrayBlocking(
                self.base,
                bytes.as_ptr().cast_mut().cast(),
                bytes.len() as u32,
            );
        }
    }
}

/// Hands console bytes to the vendor USB-CDC debug transport.
#[cfg(feature = "usbfs-logs")]
pub struct CdcSink;

#[cfg(feature = "usbfs-logs")]
impl LogSink for CdcSink {
    fn write_bytes(&mut self, bytes: &[u8]) {
        // Already level-filtered by the logger, so use the most severe level.
        let level = fx_hello_common::LogLevel::Error as u8;
        unsafe {
            pdl::Cy_Debug_AddToLog(
                level,
                c"%.*s".as_ptr(),
                bytes.len() as core::ffi::c_int,
                bytes.as_ptr(),
            );
        }
    }
}

#[cfg(not(feature = "usbfs-logs"))]
pub type ConsoleSink = UartSink;
#[cfg(feature = "usbfs-logs")]
pub type ConsoleSink = CdcSink;

/// Sink for the transport selected at build time.
pub fn console_sink() -> ConsoleSink {
    #[cfg(not(feature = "usbfs-logs"))]
    {
        UartSink::new(crate::config::LOGGING_SCB_IDX)
    }
    #[cfg(feature = "usbfs-logs")]
    {
        CdcSink
    }
}
