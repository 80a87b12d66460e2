// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Bindings to the vendor peripheral driver library (PDL) and board support.
//!
//! Only the entry points this firmware calls are declared. Enum values and
//! register addresses mirror the FX10 device headers shipped with the SDK; check
//! them against the SDK release the libraries come from.

#![allow(non_snake_case, non_upper_case_globals)]

#[cfg(feature = "usbfs-logs")]
use core::ffi::c_char;
use core::ffi::c_void;

use fx_hello_common::clocks::{ClockDestination, DividerType};
use fx_hello_common::gpio::PinConfig;

/// `cy_rslt_t` / `cy_en_*_status_t` return codes. Never inspected.
pub type Status = u32;

/// Opaque `cy_stc_device_t` IP block table.
#[repr(C)]
pub struct DeviceIpBlockCfg {
    _private: [u8; 0],
}

/// Mirror of `cy_stc_gpio_pin_config_t`.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct GpioPinConfig {
    pub outVal: u32,
    pub driveMode: u32,
    pub hsiom: u32,
    pub intEdge: u32,
    pub intMask: u32,
    pub vtrip: u32,
    pub slewRate: u32,
    pub driveSel: u32,
    pub vregEn: u32,
    pub ibufMode: u32,
    pub vtripSel: u32,
    pub vrefSel: u32,
    pub vohSel: u32,
}

impl From<&PinConfig> for GpioPinConfig {
    fn from(cfg: &PinConfig) -> Self {
        Self {
            outVal: cfg.out_val as u32,
            driveMode: cfg.drive_mode.bits(),
            hsiom: cfg.hsiom.0,
            intEdge: cfg.int_edge,
            intMask: cfg.int_mask as u32,
            vtrip: cfg.vtrip,
            slewRate: cfg.slew_rate,
            driveSel: cfg.drive_sel,
            vregEn: cfg.vreg_en as u32,
            ibufMode: cfg.ibuf_mode,
            vtripSel: cfg.vtrip_sel,
            vrefSel: cfg.vref_sel,
            vohSel: cfg.voh_sel,
        }
    }
}

/// Mirror of `cy_stc_debug_config_t`.
#[cfg(feature = "usbfs-logs")]
#[repr(C)]
pub struct DebugConfig {
    pub pBuffer: *mut u8,
    pub traceLvl: u8,
    pub bufSize: u16,
    pub dbgIntfce: u32,
    pub printNow: bool,
}

/// `cy_en_debug_interface_t::CY_DEBUG_INTFCE_USBFS_CDC`
#[cfg(feature = "usbfs-logs")]
pub const CY_DEBUG_INTFCE_USBFS_CDC: u32 = 2;

// cy_en_divider_types_t
pub const CY_SYSCLK_DIV_8_BIT: u32 = 0;
pub const CY_SYSCLK_DIV_16_BIT: u32 = 1;
pub const CY_SYSCLK_DIV_16_5_BIT: u32 = 2;
pub const CY_SYSCLK_DIV_24_5_BIT: u32 = 3;

// en_clk_dst_t
pub const PCLK_LVDS2USB32SS_CLOCK_SAR: u32 = 11;
pub const PCLK_USB_CLOCK_DEV_BRS: u32 = 12;

pub const fn divider_type(div_type: DividerType) -> u32 {
    match div_type {
        DividerType::Div8 => CY_SYSCLK_DIV_8_BIT,
        DividerType::Div16 => CY_SYSCLK_DIV_16_BIT,
        DividerType::Div16Frac5 => CY_SYSCLK_DIV_16_5_BIT,
        DividerType::Div24Frac5 => CY_SYSCLK_DIV_24_5_BIT,
    }
}

pub const fn clock_destination(destination: ClockDestination) -> u32 {
    match destination {
        ClockDestination::UsbssAdc => PCLK_LVDS2USB32SS_CLOCK_SAR,
        ClockDestination::UsbfsBusReset => PCLK_USB_CLOCK_DEV_BRS,
    }
}

// GPIO port register block
const GPIO_PRT0_BASE: usize = 0x4031_0000;
const GPIO_PRT_STRIDE: usize = 0x80;
pub const GPIO_PRT_OUT: usize = 0x00;
pub const GPIO_PRT_OUT_CLR: usize = 0x04;
pub const GPIO_PRT_OUT_SET: usize = 0x08;
pub const GPIO_PRT_OUT_INV: usize = 0x0C;

/// Base address of GPIO port `port`.
pub const fn gpio_port(port: u8) -> *mut c_void {
    (GPIO_PRT0_BASE + port as usize * GPIO_PRT_STRIDE) as *mut c_void
}

// Serial communication blocks
const SCB0_BASE: usize = 0x4060_0000;
const SCB_STRIDE: usize = 0x1_0000;

/// Base address of serial communication block `index`.
pub const fn scb(index: u8) -> *mut c_void {
    (SCB0_BASE + index as usize * SCB_STRIDE) as *mut c_void
}

unsafe extern "C" {
    pub static cy_deviceIpBlockCfgFX3G2: DeviceIpBlockCfg;

    pub fn Cy_PDL_Init(cfg: *const DeviceIpBlockCfg);
    pub fn cybsp_init() -> Status;

    pub fn Cy_SysClk_PeriphSetDivider(dividerType: u32, dividerNum: u32, dividerValue: u32)
        -> Status;
    pub fn Cy_SysClk_PeriphEnableDivider(dividerType: u32, dividerNum: u32) -> Status;
    pub fn Cy_SysClk_PeriphAssignDivider(ipBlock: u32, dividerType: u32, dividerNum: u32)
        -> Status;

    pub fn Cy_SysLib_Delay(milliseconds: u32);
    pub fn Cy_SysLib_DelayUs(microseconds: u16);

    pub fn Cy_GPIO_Pin_Init(base: *mut c_void, pinNum: u32, config: *const GpioPinConfig)
        -> Status;

    pub fn Cy_WDT_Unlock();
    pub fn Cy_WDT_Disable();

    /// SDK helper: configure SCB `scbIdx` as a 115200 8N1 UART and enable it.
    pub fn InitUart(scbIdx: u8);
    pub fn Cy_SCB_UART_PutArrayBlocking(base: *mut c_void, buffer: *mut c_void, size: u32);

    #[cfg(feature = "usbfs-logs")]
    pub fn Cy_Debug_LogInit(cfg: *mut DebugConfig) -> Status;
    #[cfg(feature = "usbfs-logs")]
    pub fn Cy_Debug_AddToLog(dbgLevel: u8, message: *const c_char, ...);
}

/// Address of the device IP block table passed to `Cy_PDL_Init`.
pub fn device_ip_block_cfg() -> *const DeviceIpBlockCfg {
    // SAFETY: only the address is taken, the table is never read from Rust.
    unsafe { core::ptr::addr_of!(cy_deviceIpBlockCfgFX3G2) }
}
