// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

//! Command-line interface definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fx_hello_common::AppVersion;

use crate::commands::{self, SessionOptions};

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "fx-hello-monitor")]
#[command(about = "Serial console monitor for the FX10/FX20 hello world firmware")]
pub struct Cli {
    /// Serial port (e.g., /dev/ttyUSB0)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Baud rate of the firmware UART
    #[arg(short, long, default_value = "115200")]
    pub baud: u32,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List serial ports
    Ports,

    /// Watch the console and check the boot transcript live
    Watch {
        /// Stop successfully after this many verified loop lines
        #[arg(short = 'n', long)]
        loops: Option<u64>,

        /// Join a device that is already in its main loop
        #[arg(long)]
        attach: bool,

        /// Version the device must report (major.minor.patch.build)
        #[arg(long, value_parser = parse_version)]
        expect_version: Option<AppVersion>,

        /// Longest allowed gap between lines once output has started
        #[arg(long, default_value = "3000")]
        timeout_ms: u64,
    },

    /// Check a captured console log
    Check {
        /// Raw capture of the serial output
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// The capture starts in the middle of the main loop
        #[arg(long)]
        attach: bool,

        /// Version the device must report (major.minor.patch.build)
        #[arg(long, value_parser = parse_version)]
        expect_version: Option<AppVersion>,
    },
}

/// Parse a `major.minor.patch.build` version argument.
fn parse_version(s: &str) -> Result<AppVersion, String> {
    AppVersion::parse(s).map_err(|e| format!("invalid version: {e}"))
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ports => commands::ports(),

        Commands::Check {
            file,
            attach,
            expect_version,
        } => commands::check(
            &file,
            SessionOptions {
                loops: None,
                attach,
                expect_version,
            },
        ),

        Commands::Watch {
            loops,
            attach,
            expect_version,
            timeout_ms,
        } => {
            let port = cli
                .port
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("--port is required for this command"))?;

            commands::watch(
                port,
                cli.baud,
                timeout_ms,
                SessionOptions {
                    loops,
                    attach,
                    expect_version,
                },
            )
        }
    }
}
