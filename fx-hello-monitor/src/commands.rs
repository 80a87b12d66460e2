// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Command implementations.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use fx_hello_common::{AppVersion, ConsoleLine, TranscriptChecker};
use indicatif::{ProgressBar, ProgressStyle};

use crate::serial::{self, Line, LineReader};

/// How a console session is checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Stop after this many verified loop lines.
    pub loops: Option<u64>,
    pub attach: bool,
    pub expect_version: Option<AppVersion>,
}

/// Transcript checking shared by `watch` and `check`.
#[derive(Debug)]
pub struct Session {
    checker: TranscriptChecker,
    target: Option<u64>,
    lines: u64,
}

impl Session {
    pub fn new(opts: SessionOptions) -> Self {
        let checker = if opts.attach {
            TranscriptChecker::attached(opts.expect_version)
        } else {
            TranscriptChecker::new(opts.expect_version)
        };
        Self {
            checker,
            target: opts.loops,
            lines: 0,
        }
    }

    /// Check one line. Errors name the offending line number.
    pub fn accept<'a>(&mut self, line: &'a Line) -> Result<ConsoleLine<'a>> {
        self.lines += 1;
        serial::require_crlf(line).with_context(|| format!("line {}", self.lines))?;
        self.checker
            .feed(&line.text)
            .with_context(|| format!("line {}: {:?}", self.lines, line.text))
    }

    /// Whether the requested number of loop lines has been verified.
    pub fn done(&self) -> bool {
        self.target
            .is_some_and(|target| self.checker.loops_verified() >= target)
    }

    pub fn checker(&self) -> &TranscriptChecker {
        &self.checker
    }
}

/// List serial ports.
pub fn ports() -> Result<()> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;

    if ports.is_empty() {
        println!("No serial ports found.");
        return Ok(());
    }

    for port in ports {
        match port.port_type {
            serialport::SerialPortType::UsbPort(usb) => println!(
                "{}  USB {:04x}:{:04x} {}",
                port.port_name,
                usb.vid,
                usb.pid,
                usb.product.unwrap_or_default()
            ),
            _ => println!("{}", port.port_name),
        }
    }

    Ok(())
}

/// Watch a live console until the requested loop count or the first error.
pub fn watch(port: &str, baud: u32, timeout_ms: u64, opts: SessionOptions) -> Result<()> {
    let mut reader = LineReader::new(serial::open(port, baud, timeout_ms)?);
    let mut session = Session::new(opts);

    println!("Watching {} at {} baud (Ctrl-C to stop)", port, baud);
    if !opts.attach {
        println!("Reset the device to capture the boot banner.");
    }
    println!();

    let pb = progress(opts.loops)?;
    let mut started = false;

    while !session.done() {
        let line = match reader.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                pb.abandon();
                bail!("{} closed", port);
            }
            // Until the device says something, keep waiting for it.
            Err(e) if serial::is_timeout(&e) && !started => continue,
            Err(e) if serial::is_timeout(&e) => {
                pb.abandon();
                bail!("No console output for {} ms", timeout_ms);
            }
            Err(e) => {
                pb.abandon();
                return Err(e).with_context(|| format!("Failed to read {port}"));
            }
        };
        started = true;
        pb.println(&line.text);

        let parsed = match session.accept(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };
        report(&pb, &session, parsed);
    }

    pb.finish_with_message("done");
    println!();
    summary(&session);
    Ok(())
}

/// Check a captured console log.
pub fn check(file: &Path, opts: SessionOptions) -> Result<()> {
    let f = File::open(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let session = check_stream(BufReader::new(f), opts)?;

    println!("{}: OK", file.display());
    summary(&session);
    Ok(())
}

/// Run every line of `input` through a session.
pub fn check_stream(input: impl Read, opts: SessionOptions) -> Result<Session> {
    let mut reader = LineReader::new(input);
    let mut session = Session::new(opts);

    while let Some(line) = reader.next_line().context("Failed to read capture")? {
        session.accept(&line)?;
    }

    if !opts.attach && session.checker().version().is_none() {
        bail!("Capture ended before the version line");
    }
    Ok(session)
}

fn progress(loops: Option<u64>) -> Result<ProgressBar> {
    let pb = match loops {
        Some(n) => {
            let pb = ProgressBar::new(n);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} loops {msg}")?
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos} loops {msg}")?,
            );
            pb
        }
    };
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn report(pb: &ProgressBar, session: &Session, parsed: ConsoleLine<'_>) {
    match parsed {
        ConsoleLine::Banner if session.checker().resets() > 0 => {
            pb.set_message(format!("device reset ({})", session.checker().resets()));
        }
        ConsoleLine::Version(version) => pb.set_message(format!("v{}", version)),
        ConsoleLine::Loop(_) => pb.set_position(session.checker().loops_verified()),
        _ => {}
    }
}

fn summary(session: &Session) {
    let checker = session.checker();
    match checker.version() {
        Some(version) => println!("  Version:      {}", version),
        None => println!("  Version:      not seen"),
    }
    println!("  Loops:        {}", checker.loops_verified());
    println!("  Resets:       {}", checker.resets());
    if checker.skipped_lines() > 0 {
        println!("  Skipped:      {} line(s) before the banner", checker.skipped_lines());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const BOOT: &str = "***** FX20: Hello World Application *****\r\n\
                        APP_VERSION: 1.0.0.3\r\n";

    fn opts() -> SessionOptions {
        SessionOptions::default()
    }

    #[test]
    fn test_check_stream_accepts_boot_capture() {
        let capture = format!("{BOOT}Completed 0 loops\r\nCompleted 1 loops\r\n");
        let session = check_stream(Cursor::new(capture), opts()).unwrap();

        assert_eq!(session.checker().loops_verified(), 2);
        assert_eq!(
            session.checker().version(),
            Some(AppVersion::new(1, 0, 0, 3))
        );
    }

    #[test]
    fn test_check_stream_rejects_skipped_loop() {
        let capture = format!("{BOOT}Completed 0 loops\r\nCompleted 2 loops\r\n");
        let err = check_stream(Cursor::new(capture), opts()).unwrap_err();

        assert!(format!("{err:#}").contains("line 4"));
        assert!(format!("{err:#}").contains("expected loop 1, got loop 2"));
    }

    #[test]
    fn test_check_stream_rejects_bare_newline() {
        let capture = "***** FX20: Hello World Application *****\n";
        assert!(check_stream(Cursor::new(capture), opts()).is_err());
    }

    #[test]
    fn test_check_stream_requires_version() {
        let capture = "***** FX20: Hello World Application *****\r\n";
        let err = check_stream(Cursor::new(capture), opts()).unwrap_err();
        assert!(err.to_string().contains("version line"));
    }

    #[test]
    fn test_check_stream_expected_version() {
        let options = SessionOptions {
            expect_version: Some(AppVersion::new(2, 0, 0, 0)),
            ..opts()
        };
        assert!(check_stream(Cursor::new(BOOT), options).is_err());
    }

    #[test]
    fn test_check_stream_attach() {
        let options = SessionOptions {
            attach: true,
            ..opts()
        };
        let session =
            check_stream(Cursor::new("Completed 7 loops\r\nCompleted 8 loops\r\n"), options)
                .unwrap();
        assert_eq!(session.checker().loops_verified(), 2);
    }

    #[test]
    fn test_check_stream_skips_leading_fragment() {
        let capture = format!("ops\r\n{BOOT}Completed 0 loops\r\n");
        let session = check_stream(Cursor::new(capture), opts()).unwrap();
        assert_eq!(session.checker().skipped_lines(), 1);
        assert_eq!(session.checker().loops_verified(), 1);

        let options = SessionOptions {
            attach: true,
            ..opts()
        };
        let session =
            check_stream(Cursor::new("ted 7 loops\r\nCompleted 8 loops\r\n"), options).unwrap();
        assert_eq!(session.checker().loops_verified(), 1);
    }

    #[test]
    fn test_session_done_after_target() {
        let mut session = Session::new(SessionOptions {
            loops: Some(1),
            ..opts()
        });
        let lines = [
            "***** FX20: Hello World Application *****",
            "APP_VERSION: 1.0.0.3",
            "Completed 0 loops",
        ];

        for text in lines {
            assert!(!session.done());
            session
                .accept(&Line {
                    text: text.to_string(),
                    crlf: true,
                })
                .unwrap();
        }
        assert!(session.done());
    }

    #[test]
    fn test_session_without_target_never_done() {
        let session = Session::new(opts());
        assert!(!session.done());
    }
}
