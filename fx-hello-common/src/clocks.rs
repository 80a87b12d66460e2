// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Peripheral clock divider setup.
//!
//! Two clock domains hang off the 75 MHz PERI clock:
//! - the SAR ADC in the USBSS block, fed 1 MHz from 16-bit divider #1
//! - the USBFS bus-reset detector, fed 100 kHz from 16-bit divider #2
//!
//! Each domain is programmed with the same sequence: set the divider, enable it,
//! wait for it to settle, then route it to its destination.

use embedded_hal::delay::DelayNs;

/// Frequency of the PERI clock that feeds every peripheral divider.
pub const PERI_CLK_HZ: u32 = 75_000_000;

/// Settling time between enabling a divider and assigning it.
pub const DIVIDER_SETTLE_US: u32 = 10;

/// Hardware divider flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DividerType {
    Div8,
    Div16,
    /// 16-bit integer, 5-bit fractional
    Div16Frac5,
    /// 24-bit integer, 5-bit fractional
    Div24Frac5,
}

impl DividerType {
    /// Largest integer divisor the divider can produce.
    pub const fn max_divisor(self) -> u32 {
        match self {
            Self::Div8 => 1 << 8,
            Self::Div16 | Self::Div16Frac5 => 1 << 16,
            Self::Div24Frac5 => 1 << 24,
        }
    }
}

/// Peripheral clock inputs a divider can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockDestination {
    /// SAR ADC inside the LVDS/USB32 SuperSpeed block.
    UsbssAdc,
    /// USBFS bus-reset-detect clock.
    UsbfsBusReset,
}

/// One divider programmed for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DividerConfig {
    pub div_type: DividerType,
    pub index: u32,
    pub divisor: u32,
    pub destination: ClockDestination,
}

impl DividerConfig {
    /// Build a divider configuration.
    ///
    /// Panics (at compile time when used in a `const`) if `divisor` is zero or
    /// larger than the divider can count.
    pub const fn new(
        div_type: DividerType,
        index: u32,
        divisor: u32,
        destination: ClockDestination,
    ) -> Self {
        assert!(divisor >= 1, "divisor must be at least 1");
        assert!(
            divisor <= div_type.max_divisor(),
            "divisor exceeds divider width"
        );
        Self {
            div_type,
            index,
            divisor,
            destination,
        }
    }

    /// Value written to the divider register (divide-by minus one).
    pub const fn register_value(&self) -> u32 {
        self.divisor - 1
    }

    /// Output frequency for a given source frequency.
    pub const fn output_hz(&self, source_hz: u32) -> u32 {
        source_hz / self.divisor
    }
}

/// 1 MHz SAR ADC clock: PERI / 75 on 16-bit divider #1.
pub const ADC_CLOCK: DividerConfig =
    DividerConfig::new(DividerType::Div16, 1, 75, ClockDestination::UsbssAdc);

/// 100 kHz USBFS bus-reset-detect clock: PERI / 750 on 16-bit divider #2.
pub const USBFS_BUS_RESET_CLOCK: DividerConfig =
    DividerConfig::new(DividerType::Div16, 2, 750, ClockDestination::UsbfsBusReset);

/// Which clock domains to bring up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockEnables {
    pub adc: bool,
    pub usbfs: bool,
}

impl ClockEnables {
    pub const ALL: Self = Self {
        adc: true,
        usbfs: true,
    };
    pub const NONE: Self = Self {
        adc: false,
        usbfs: false,
    };
}

/// Access to the system clock peripheral dividers.
///
/// Implementations are treated as infallible.
pub trait PeripheralClocks {
    /// Program the integer divide value (`divisor - 1`).
    fn set_divider(&mut self, div_type: DividerType, index: u32, value: u32);

    /// Start the divider.
    fn enable_divider(&mut self, div_type: DividerType, index: u32);

    /// Route the divider output to a peripheral clock input.
    fn assign_divider(&mut self, destination: ClockDestination, div_type: DividerType, index: u32);
}

/// Enable clocks to the peripherals selected by `enables`.
///
/// The ADC domain is configured before the USBFS domain. A disabled domain is
/// not touched at all.
pub fn init_peripheral_clocks(
    clocks: &mut impl PeripheralClocks,
    delay: &mut impl DelayNs,
    enables: ClockEnables,
) {
    if enables.adc {
        configure_divider(clocks, delay, &ADC_CLOCK);
    }

    if enables.usbfs {
        configure_divider(clocks, delay, &USBFS_BUS_RESET_CLOCK);
    }
}

fn configure_divider(
    clocks: &mut impl PeripheralClocks,
    delay: &mut impl DelayNs,
    cfg: &DividerConfig,
) {
    clocks.set_divider(cfg.div_type, cfg.index, cfg.register_value());
    clocks.enable_divider(cfg.div_type, cfg.index);
    delay.delay_us(DIVIDER_SETTLE_US);
    clocks.assign_divider(cfg.destination, cfg.div_type, cfg.index);
    diag_trace!(
        "clock divider {} -> {} Hz",
        cfg.index,
        cfg.output_hz(PERI_CLK_HZ)
    );
}
