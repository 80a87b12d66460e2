// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 FX Hello Contributors

use std::env;
use std::fs;
use std::path::PathBuf;

const DEFAULT_PDL_LIBS: &str = "cy_pdl,cy_bsp,cy_debug";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let root_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
        .parent()
        .unwrap()
        .to_path_buf();
    let linker_dir = root_dir.join("linker_scripts");

    let linker_script =
        fs::read_to_string(linker_dir.join("fx10_cm4.x")).expect("Failed to read fx10_cm4.x");
    fs::write(out_dir.join("memory.x"), linker_script).expect("Failed to write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg=-Tlink.x");
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!(
        "cargo:rerun-if-changed={}",
        linker_dir.join("fx10_cm4.x").display()
    );
    println!("cargo:rerun-if-changed=build.rs");

    // Read version from project-root VERSION file (major.minor.patch.build)
    let version_file = root_dir.join("VERSION");
    let version = fs::read_to_string(&version_file)
        .expect("Failed to read VERSION file")
        .trim()
        .to_string();
    println!("cargo:rustc-env=APP_VERSION={}", version);
    println!("cargo:rerun-if-changed={}", version_file.display());

    // Prebuilt vendor PDL / BSP / debug libraries
    println!("cargo:rerun-if-env-changed=FX_PDL_LIB_DIR");
    println!("cargo:rerun-if-env-changed=FX_PDL_LIBS");
    match env::var("FX_PDL_LIB_DIR") {
        Ok(dir) => {
            println!("cargo:rustc-link-search=native={}", dir);
            let libs = env::var("FX_PDL_LIBS").unwrap_or_else(|_| DEFAULT_PDL_LIBS.to_string());
            for lib in libs.split(',').map(str::trim).filter(|l| !l.is_empty()) {
                println!("cargo:rustc-link-lib=static={}", lib);
            }
        }
        Err(_) => {
            println!("cargo:warning=FX_PDL_LIB_DIR is not set; the vendor PDL will not be linked");
        }
    }
}
