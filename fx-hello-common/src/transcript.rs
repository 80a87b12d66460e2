// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Parsing and checking of the firmware's console output.
//!
//! A well-formed session is the banner, the version line, then loop lines
//! numbered 0, 1, 2, ... Lines are passed in with their CRLF stripped.

use core::fmt;

use crate::app::{STARTUP_BANNER, VERSION_PREFIX};
use crate::version::AppVersion;

const LOOP_PREFIX: &str = "Completed ";
const LOOP_SUFFIX: &str = " loops";

/// One console line, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLine<'a> {
    Banner,
    Version(AppVersion),
    Loop(u32),
    Other(&'a str),
}

impl<'a> ConsoleLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line == banner_text() {
            return Self::Banner;
        }
        if let Some(version) = parse_version_line(line) {
            return Self::Version(version);
        }
        if let Some(count) = parse_loop_line(line) {
            return Self::Loop(count);
        }
        Self::Other(line)
    }
}

fn banner_text() -> &'static str {
    STARTUP_BANNER.trim_end_matches(['\r', '\n'])
}

/// Plain decimal as the firmware prints it: no sign, padding or spaces.
fn is_canonical_decimal(digits: &str) -> bool {
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && !(digits.len() > 1 && digits.starts_with('0'))
}

fn parse_loop_line(line: &str) -> Option<u32> {
    let digits = line.strip_prefix(LOOP_PREFIX)?.strip_suffix(LOOP_SUFFIX)?;
    if !is_canonical_decimal(digits) {
        return None;
    }
    digits.parse().ok()
}

/// Stricter than [`AppVersion::parse`], which also reads the `VERSION` file
/// and tolerates surrounding whitespace and zero padding there.
fn parse_version_line(line: &str) -> Option<AppVersion> {
    let rest = line.strip_prefix(VERSION_PREFIX)?;
    if !rest.split('.').all(is_canonical_decimal) {
        return None;
    }
    AppVersion::parse(rest).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TranscriptState {
    AwaitBanner,
    AwaitVersion,
    Looping { next: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TranscriptError {
    /// A line that is not part of the transcript.
    UnexpectedLine,
    VersionBeforeBanner,
    /// Something other than the version line followed the banner.
    MissingVersion,
    VersionMismatch {
        expected: AppVersion,
        found: AppVersion,
    },
    LoopOutOfOrder {
        expected: u32,
        found: u32,
    },
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedLine => f.write_str("unexpected console line"),
            Self::VersionBeforeBanner => f.write_str("version line arrived before the banner"),
            Self::MissingVersion => f.write_str("banner was not followed by the version line"),
            Self::VersionMismatch { expected, found } => {
                write!(f, "expected version {}, device reports {}", expected, found)
            }
            Self::LoopOutOfOrder { expected, found } => {
                write!(f, "expected loop {}, got loop {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TranscriptError {}

/// Incremental checker for a console session.
#[derive(Debug, Clone)]
pub struct TranscriptChecker {
    state: TranscriptState,
    expected_version: Option<AppVersion>,
    attach: bool,
    version: Option<AppVersion>,
    loops_verified: u64,
    resets: u32,
    skipped: u32,
}

impl TranscriptChecker {
    /// Checker for a session watched from power-on.
    pub fn new(expected_version: Option<AppVersion>) -> Self {
        Self {
            state: TranscriptState::AwaitBanner,
            expected_version,
            attach: false,
            version: None,
            loops_verified: 0,
            resets: 0,
            skipped: 0,
        }
    }

    /// Checker that may join a session already in its main loop.
    ///
    /// The first loop line seen before any banner sets the starting count.
    /// Partial lines ahead of it are skipped.
    pub fn attached(expected_version: Option<AppVersion>) -> Self {
        Self {
            attach: true,
            ..Self::new(expected_version)
        }
    }

    pub fn state(&self) -> TranscriptState {
        self.state
    }

    /// Version reported by the device, once seen.
    pub fn version(&self) -> Option<AppVersion> {
        self.version
    }

    /// Loop lines accepted so far, across resets.
    pub fn loops_verified(&self) -> u64 {
        self.loops_verified
    }

    /// Number of banners seen after the first session started.
    pub fn resets(&self) -> u32 {
        self.resets
    }

    /// Unrecognized lines skipped while waiting for the first banner, such as
    /// power-on glitches or the tail of a line cut off when the port opened.
    pub fn skipped_lines(&self) -> u32 {
        self.skipped
    }

    /// Feed one CRLF-stripped line.
    pub fn feed<'a>(&mut self, line: &'a str) -> Result<ConsoleLine<'a>, TranscriptError> {
        let parsed = ConsoleLine::classify(line);

        self.state = match (self.state, parsed) {
            (TranscriptState::AwaitBanner, ConsoleLine::Banner) => TranscriptState::AwaitVersion,
            (TranscriptState::AwaitBanner, ConsoleLine::Version(_)) => {
                return Err(TranscriptError::VersionBeforeBanner)
            }
            (TranscriptState::AwaitBanner, ConsoleLine::Loop(count)) if self.attach => {
                self.loops_verified += 1;
                TranscriptState::Looping {
                    next: count.wrapping_add(1),
                }
            }
            (TranscriptState::AwaitBanner, ConsoleLine::Other(_)) => {
                self.skipped = self.skipped.saturating_add(1);
                TranscriptState::AwaitBanner
            }
            (TranscriptState::AwaitBanner, ConsoleLine::Loop(_)) => {
                return Err(TranscriptError::UnexpectedLine)
            }

            (TranscriptState::AwaitVersion, ConsoleLine::Version(found)) => {
                if let Some(expected) = self.expected_version {
                    if expected != found {
                        return Err(TranscriptError::VersionMismatch { expected, found });
                    }
                }
                self.version = Some(found);
                TranscriptState::Looping { next: 0 }
            }
            (TranscriptState::AwaitVersion, _) => return Err(TranscriptError::MissingVersion),

            (TranscriptState::Looping { next }, ConsoleLine::Loop(found)) => {
                if found != next {
                    return Err(TranscriptError::LoopOutOfOrder {
                        expected: next,
                        found,
                    });
                }
                self.loops_verified += 1;
                TranscriptState::Looping {
                    next: next.wrapping_add(1),
                }
            }
            (TranscriptState::Looping { .. }, ConsoleLine::Banner) => {
                self.resets += 1;
                TranscriptState::AwaitVersion
            }
            (TranscriptState::Looping { .. }, _) => return Err(TranscriptError::UnexpectedLine),
        };

        Ok(parsed)
    }
}
