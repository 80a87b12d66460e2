// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Serial port access and CRLF line splitting.

use std::io::{self, Read};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serialport::SerialPort;

/// Longest line accepted before the stream is considered garbage.
const MAX_LINE_LEN: usize = 256;
const READ_CHUNK: usize = 64;

/// Open `port` as 8N1 at `baud`, with `timeout_ms` per read.
pub fn open(port: &str, baud: u32, timeout_ms: u64) -> Result<Box<dyn SerialPort>> {
    serialport::new(port, baud)
        .timeout(Duration::from_millis(timeout_ms))
        .open()
        .with_context(|| format!("Failed to open {port}"))
}

/// One console line with its terminator removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// Whether the line ended in `\r\n` rather than a bare `\n`.
    pub crlf: bool,
}

/// Splits a byte stream into `\n`-terminated lines.
pub struct LineReader<R> {
    inner: R,
    pending: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(MAX_LINE_LEN),
        }
    }

    /// Next complete line.
    ///
    /// Returns `Ok(None)` at end of stream; a trailing unterminated fragment is
    /// discarded. Read timeouts surface as `io::ErrorKind::TimedOut` with any
    /// partial line kept for the next call.
    pub fn next_line(&mut self) -> io::Result<Option<Line>> {
        loop {
            if let Some(line) = self.take_line()? {
                return Ok(Some(line));
            }

            let mut chunk = [0u8; READ_CHUNK];
            let count = match self.inner.read(&mut chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.pending.extend_from_slice(&chunk[..count]);
        }
    }

    fn take_line(&mut self) -> io::Result<Option<Line>> {
        let Some(end) = self.pending.iter().position(|&b| b == b'\n') else {
            if self.pending.len() > MAX_LINE_LEN {
                self.pending.clear();
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("no line terminator within {MAX_LINE_LEN} bytes"),
                ));
            }
            return Ok(None);
        };

        let mut raw: Vec<u8> = self.pending.drain(..=end).collect();
        raw.pop();
        let crlf = raw.last() == Some(&b'\r');
        if crlf {
            raw.pop();
        }

        Ok(Some(Line {
            text: String::from_utf8_lossy(&raw).into_owned(),
            crlf,
        }))
    }
}

/// Whether an I/O error is a read timeout.
pub fn is_timeout(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::TimedOut
}

/// Reject lines that are not CRLF-terminated.
pub fn require_crlf(line: &Line) -> Result<()> {
    if !line.crlf {
        bail!("line is not CRLF-terminated: {:?}", line.text);
    }
    Ok(())
}
