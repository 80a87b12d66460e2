// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

#![no_std]
#![no_main]

mod board;
mod config;
mod console;
mod pdl;

use defmt_rtt as _;
use panic_probe as _;

defmt::timestamp!("{=u64:us}", { 0 });

use cortex_m_rt::entry;
use fx_hello_common::{boot, Board, ACTIVITY_PIN_A, ACTIVITY_PIN_B};

#[entry]
fn main() -> ! {
    defmt::println!("FX hello world {}", config::APP_VERSION);

    let board = Board {
        platform: platform(),
        clocks: board::PdlClocks,
        gpio: board::PdlGpio,
        pin_a: board::ActivityPin::new(ACTIVITY_PIN_A),
        pin_b: board::ActivityPin::new(ACTIVITY_PIN_B),
        delay: board::SysLibDelay,
    };

    let app = boot::<_, _, _, _, _, _, _, { config::LOGBUF_SIZE }>(
        board,
        console::console_sink(),
        config::LOG_CONFIG,
        config::APP_VERSION,
    );

    defmt::println!("Firmware: entering main loop");
    app.run()
}

#[cfg(not(feature = "usbfs-logs"))]
fn platform() -> board::PdlPlatform {
    board::PdlPlatform::new()
}

#[cfg(feature = "usbfs-logs")]
fn platform() -> board::PdlPlatform {
    let Some(buffer) = cortex_m::singleton!(: [u8; config::LOGBUF_SIZE] = [0; config::LOGBUF_SIZE])
    else {
        unreachable!()
    };
    let Some(debug_cfg) = cortex_m::singleton!(: pdl::DebugConfig = pdl::DebugConfig {
        pBuffer: buffer.as_mut_ptr(),
        traceLvl: config::DEBUG_LEVEL,
        bufSize: config::LOGBUF_SIZE as u16,
        dbgIntfce: pdl::CY_DEBUG_INTFCE_USBFS_CDC,
        printNow: true,
    }) else {
        unreachable!()
    };
    board::PdlPlatform::new(debug_cfg)
}
