//! Probes for the OpenCV system library when the `opencv` feature is enabled.

use std::env;
use std::process::Command;

/// pkg-config module names, newest first
const OPENCV_MODULES: [&str; 2] = ["opencv4", "opencv"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    if env::var_os("CARGO_FEATURE_OPENCV").is_none() {
        return;
    }

    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    match OPENCV_MODULES.iter().find_map(|module| pkg_config_version(module)) {
        Some(version) => println!("cargo:warning=Found OpenCV version: {version}"),
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config");
            println!("cargo:warning=Build without the 'opencv' feature to replay image directories");
            println!("cargo:warning=Install libopencv-dev and pkg-config (apt) or opencv (brew)");
        }
    }
}

/// `pkg-config --modversion`, or `None` if pkg-config or the module is missing
fn pkg_config_version(module: &str) -> Option<String> {
    let output = Command::new("pkg-config").args(["--modversion", module]).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
