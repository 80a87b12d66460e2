// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! FX10 implementations of the hardware traits.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use fx_hello_common::clocks::{ClockDestination, DividerType, PeripheralClocks};
use fx_hello_common::gpio::{PinConfig, PinConfigurator, PinId};
use fx_hello_common::{BootStage, LogInterface, Platform};

use crate::pdl;

/// Device-level PDL calls.
pub struct PdlPlatform {
    #[cfg(feature = "usbfs-logs")]
    debug_cfg: &'static mut pdl::DebugConfig,
}

impl PdlPlatform {
    #[cfg(not(feature = "usbfs-logs"))]
    pub fn new() -> Self {
        Self {}
    }

    /// `debug_cfg` is handed to the vendor USB-CDC debug transport, which keeps
    /// referring to it and its buffer after init.
    #[cfg(feature = "usbfs-logs")]
    pub fn new(debug_cfg: &'static mut pdl::DebugConfig) -> Self {
        Self { debug_cfg }
    }
}

impl Platform for PdlPlatform {
    fn init_driver_library(&mut self) {
        // SAFETY: called once, before any other PDL call.
        unsafe { pdl::Cy_PDL_Init(pdl::device_ip_block_cfg()) }
    }

    fn init_board(&mut self) {
        unsafe {
            pdl::cybsp_init();
        }
    }

    fn unlock_watchdog(&mut self) {
        unsafe { pdl::Cy_WDT_Unlock() }
    }

    fn disable_watchdog(&mut self) {
        unsafe { pdl::Cy_WDT_Disable() }
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: no critical section is open during boot.
        unsafe {
            cortex_m::register::basepri::write(0);
            cortex_m::interrupt::enable();
        }
    }

    fn init_log_transport(&mut self, interface: LogInterface) {
        match interface {
            LogInterface::UartScb(index) => unsafe { pdl::InitUart(index) },
            #[cfg(feature = "usbfs-logs")]
            LogInterface::UsbfsCdc => unsafe {
                pdl::Cy_Debug_LogInit(&mut *self.debug_cfg);
            },
            #[cfg(not(feature = "usbfs-logs"))]
            LogInterface::UsbfsCdc => defmt::warn!("USB-CDC logging not built in"),
        }
    }

    fn stage_reached(&mut self, stage: BootStage) {
        defmt::debug!("boot: {}", stage);
    }
}

/// System clock peripheral dividers.
pub struct PdlClocks;

impl PeripheralClocks for PdlClocks {
    fn set_divider(&mut self, div_type: DividerType, index: u32, value: u32) {
        unsafe {
            pdl::Cy_SysClk_PeriphSetDivider(pdl::divider_type(div_type), index, value);
        }
    }

    fn enable_divider(&mut self, div_type: DividerType, index: u32) {
        unsafe {
            pdl::Cy_SysClk_PeriphEnableDivider(pdl::divider_type(div_type), index);
        }
    }

    fn assign_divider(&mut self, destination: ClockDestination, div_type: DividerType, index: u32) {
        unsafe {
            pdl::Cy_SysClk_PeriphAssignDivider(
                pdl::clock_destination(destination),
                pdl::divider_type(div_type),
                index,
            );
        }
    }
}

/// PDL pin initializer.
pub struct PdlGpio;

impl PinConfigurator for PdlGpio {
    fn pin_init(&mut self, pin: PinId, cfg: &PinConfig) {
        let raw = pdl::GpioPinConfig::from(cfg);
        unsafe {
            pdl::Cy_GPIO_Pin_Init(pdl::gpio_port(pin.port), pin.pin as u32, &raw);
        }
    }
}

/// Output pin driven through the port OUT/OUT_SET/OUT_CLR/OUT_INV registers.
pub struct ActivityPin {
    port: usize,
    mask: u32,
}

impl ActivityPin {
    pub fn new(pin: PinId) -> Self {
        Self {
            port: pdl::gpio_port(pin.port) as usize,
            mask: 1 << pin.pin,
        }
    }

    fn write(&self, offset: usize, value: u32) {
        // SAFETY: offset is one of the port's write-only set/clear/invert registers.
        unsafe { ((self.port + offset) as *mut u32).write_volatile(value) }
    }

    fn out(&self) -> u32 {
        unsafe { ((self.port + pdl::GPIO_PRT_OUT) as *const u32).read_volatile() }
    }
}

impl ErrorType for ActivityPin {
    type Error = Infallible;
}

impl OutputPin for ActivityPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(pdl::GPIO_PRT_OUT_CLR, self.mask);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(pdl::GPIO_PRT_OUT_SET, self.mask);
        Ok(())
    }
}

impl StatefulOutputPin for ActivityPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.out() & self.mask != 0)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.out() & self.mask == 0)
    }

    /// Single write to OUT_INV, no read-modify-write.
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.write(pdl::GPIO_PRT_OUT_INV, self.mask);
        Ok(())
    }
}

/// Busy-wait delays from the PDL system library.
pub struct SysLibDelay;

impl DelayNs for SysLibDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_us(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, mut us: u32) {
        while us > 0 {
            let chunk = us.min(u16::MAX as u32);
            unsafe { pdl::Cy_SysLib_DelayUs(chunk as u16) }
            us -= chunk;
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        unsafe { pdl::Cy_SysLib_Delay(ms) }
    }
}
