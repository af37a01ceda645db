//! Build script for the light-rover firmware
//!
//! Copies the RP2350 memory layout next to the build artifacts so
//! `cortex-m-rt`'s `link.x` can pick it up. Only the firmware build links
//! against it; host test builds ignore the search path.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();

    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
