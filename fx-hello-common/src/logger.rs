// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Console logger with a circular staging buffer.
//!
//! Messages are formatted into a fixed-size ring owned by the [`Logger`] and
//! handed to a [`LogSink`] (SCB UART or USB-CDC). In blocking mode
//! (`print_now`) every message goes out before `log` returns. Otherwise bytes
//! wait for [`Logger::drain`] and the oldest are discarded once the ring is
//! full.

use core::fmt;
use heapless::Deque;

/// Message severity. Lower is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LogLevel {
    Error = 1,
    Warning = 2,
    Info = 3,
    Trace = 4,
}

/// Transport the console output is carried on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogInterface {
    /// UART on the serial communication block with this index.
    UartScb(u8),
    /// USB full-speed CDC-ACM.
    UsbfsCdc,
}

/// Logger configuration, fixed at build time by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogConfig {
    /// Highest level that is emitted. `0` silences the logger.
    pub level: u8,
    pub interface: LogInterface,
    /// Push each message to the sink immediately instead of buffering it.
    pub print_now: bool,
}

/// Byte sink for console output.
pub trait LogSink {
    fn write_bytes(&mut self, bytes: &[u8]);
}

impl<T: LogSink + ?Sized> LogSink for &mut T {
    fn write_bytes(&mut self, bytes: &[u8]) {
        (**self).write_bytes(bytes)
    }
}

/// Leveled logger owning an `N`-byte ring buffer.
pub struct Logger<S, const N: usize> {
    sink: S,
    config: LogConfig,
    buffer: Deque<u8, N>,
    dropped: u32,
}

impl<S: LogSink, const N: usize> Logger<S, N> {
    pub fn new(sink: S, config: LogConfig) -> Self {
        Self {
            sink,
            config,
            buffer: Deque::new(),
            dropped: 0,
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Whether messages at `level` pass the configured threshold.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.config.level
    }

    /// Format one message into the ring, then flush it in blocking mode.
    pub fn log(&mut self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        let mut staging = Staging {
            buffer: &mut self.buffer,
            sink: &mut self.sink,
            print_now: self.config.print_now,
            dropped: &mut self.dropped,
        };
        // Staging never reports an error; overflow is accounted in `dropped`.
        let _ = fmt::write(&mut staging, args);

        if self.config.print_now {
            self.drain();
        }
    }

    /// Send everything buffered to the sink. Returns the number of bytes sent.
    pub fn drain(&mut self) -> usize {
        flush(&mut self.buffer, &mut self.sink)
    }

    /// Bytes waiting in the ring.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes discarded because the ring was full.
    pub fn dropped_bytes(&self) -> u32 {
        self.dropped
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

fn flush<S: LogSink, const N: usize>(buffer: &mut Deque<u8, N>, sink: &mut S) -> usize {
    let count = buffer.len();
    if count == 0 {
        return 0;
    }

    let (head, tail) = buffer.as_slices();
    sink.write_bytes(head);
    if !tail.is_empty() {
        sink.write_bytes(tail);
    }
    buffer.clear();
    count
}

/// `fmt::Write` adapter that feeds the ring.
struct Staging<'a, S, const N: usize> {
    buffer: &'a mut Deque<u8, N>,
    sink: &'a mut S,
    print_now: bool,
    dropped: &'a mut u32,
}

impl<S: LogSink, const N: usize> fmt::Write for Staging<'_, S, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &byte in s.as_bytes() {
            if self.buffer.is_full() {
                if self.print_now {
                    flush(&mut *self.buffer, &mut *self.sink);
                } else {
                    if *self.dropped == 0 {
                        diag_warn!("log buffer full, discarding oldest bytes");
                    }
                    self.buffer.pop_front();
                    *self.dropped = self.dropped.saturating_add(1);
                }
            }
            if self.buffer.push_back(byte).is_err() {
                *self.dropped = self.dropped.saturating_add(1);
            }
        }
        Ok(())
    }
}
