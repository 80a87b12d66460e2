// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Application version (`major.minor.patch.build`).

use core::fmt;

/// Largest accepted major, minor or patch number.
pub const MAX_COMPONENT: u8 = 99;
/// Largest accepted build number.
pub const MAX_BUILD: u16 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub build: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VersionError {
    Empty,
    /// Fewer than four dot-separated fields.
    MissingField,
    /// More than four dot-separated fields.
    TooManyFields,
    InvalidDigit,
    OutOfRange,
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty version string"),
            Self::MissingField => f.write_str("expected four fields: major.minor.patch.build"),
            Self::TooManyFields => f.write_str("more than four version fields"),
            Self::InvalidDigit => f.write_str("version field is not a decimal number"),
            Self::OutOfRange => f.write_str("version field out of range (0-99, build 0-9999)"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VersionError {}

impl AppVersion {
    pub const fn new(major: u8, minor: u8, patch: u8, build: u16) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Parse `major.minor.patch.build`.
    ///
    /// This is a `const fn` so a compiled-in version string is checked at build
    /// time. Surrounding ASCII whitespace is ignored.
    pub const fn parse(s: &str) -> Result<Self, VersionError> {
        let bytes = s.as_bytes();
        let mut start = 0;
        let mut end = bytes.len();
        while start < end && bytes[start].is_ascii_whitespace() {
            start += 1;
        }
        while end > start && bytes[end - 1].is_ascii_whitespace() {
            end -= 1;
        }
        if start == end {
            return Err(VersionError::Empty);
        }

        let mut fields = [0u32; 4];
        let mut field = 0;
        let mut digits = 0;
        let mut i = start;
        while i < end {
            let b = bytes[i];
            if b == b'.' {
                if digits == 0 {
                    return Err(VersionError::InvalidDigit);
                }
                field += 1;
                if field == fields.len() {
                    return Err(VersionError::TooManyFields);
                }
                digits = 0;
            } else if b.is_ascii_digit() {
                // Five digits already exceed every field's range.
                if digits == 5 {
                    return Err(VersionError::OutOfRange);
                }
                fields[field] = fields[field] * 10 + (b - b'0') as u32;
                digits += 1;
            } else {
                return Err(VersionError::InvalidDigit);
            }
            i += 1;
        }
        if digits == 0 || field < 3 {
            return Err(VersionError::MissingField);
        }

        let max = MAX_COMPONENT as u32;
        if fields[0] > max || fields[1] > max || fields[2] > max || fields[3] > MAX_BUILD as u32 {
            return Err(VersionError::OutOfRange);
        }

        Ok(Self::new(
            fields[0] as u8,
            fields[1] as u8,
            fields[2] as u8,
            fields[3] as u16,
        ))
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

impl core::str::FromStr for AppVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
