//! Build script for Pantry
//!
//! Bumps the persistent build counter and embeds build metadata for `build_info`.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

/// Read the previous build number (0 when missing or unreadable) and return the next one
fn next_build_number(path: &Path) -> u64 {
    let previous = fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    previous + 1
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=Cargo.toml");

    let path = Path::new(BUILD_NUMBER_FILE);
    let build_number = next_build_number(path);

    if let Err(e) = fs::write(path, build_number.to_string()) {
        println!("cargo:warning=Could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=PANTRY_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=PANTRY_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:warning=Pantry Build #{} at {}", build_number, timestamp);
}
