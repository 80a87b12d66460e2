// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! GPIO configuration for the activity indicator pins.

use core::fmt;

/// A pin on a GPIO port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    pub port: u8,
    pub pin: u8,
}

impl PinId {
    pub const fn new(port: u8, pin: u8) -> Self {
        Self { port, pin }
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}.{}", self.port, self.pin)
    }
}

/// Toggled before the loop message.
pub const ACTIVITY_PIN_A: PinId = PinId::new(0, 0);
/// Toggled after the loop message.
pub const ACTIVITY_PIN_B: PinId = PinId::new(0, 1);

/// Pin drive modes, numbered as the PDL numbers them.
///
/// Bit 3 turns the input buffer on; the `InOff` variants leave it off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum DriveMode {
    #[default]
    Analog = 0x00,
    PullUpInOff = 0x02,
    PullDownInOff = 0x03,
    OpenDrainDrivesLowInOff = 0x04,
    OpenDrainDrivesHighInOff = 0x05,
    StrongInOff = 0x06,
    PullUpDownInOff = 0x07,
    HighZ = 0x08,
    PullUp = 0x0A,
    PullDown = 0x0B,
    OpenDrainDrivesLow = 0x0C,
    OpenDrainDrivesHigh = 0x0D,
    Strong = 0x0E,
    PullUpDown = 0x0F,
}

impl DriveMode {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn input_buffer_enabled(self) -> bool {
        (self as u32) & 0x08 != 0
    }
}

/// High-speed IO matrix selection for a pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsiom(pub u32);

impl Hsiom {
    /// Pin driven by the GPIO port registers.
    pub const GPIO: Self = Self(0);
}

/// Pin configuration handed to the pin initializer.
///
/// `Default` is all zero, the reset-safe value of every field, so callers only
/// set what they need.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub out_val: bool,
    pub drive_mode: DriveMode,
    pub hsiom: Hsiom,
    pub int_edge: u32,
    pub int_mask: bool,
    pub vtrip: u32,
    pub slew_rate: u32,
    pub drive_sel: u32,
    pub vreg_en: bool,
    pub ibuf_mode: u32,
    pub vtrip_sel: u32,
    pub vref_sel: u32,
    pub voh_sel: u32,
}

/// Access to the PDL pin initializer.
pub trait PinConfigurator {
    fn pin_init(&mut self, pin: PinId, cfg: &PinConfig);
}

/// Configure both activity pins as strong outputs with the input buffer off.
///
/// Output levels stay at their reset value until the first toggle.
pub fn init_activity_pins(gpio: &mut impl PinConfigurator) {
    let cfg = PinConfig {
        drive_mode: DriveMode::StrongInOff,
        hsiom: Hsiom::GPIO,
        ..PinConfig::default()
    };

    gpio.pin_init(ACTIVITY_PIN_A, &cfg);
    gpio.pin_init(ACTIVITY_PIN_B, &cfg);
}
