// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Taking a photo without opening a window

use shutter::backends::camera::CameraBackendManager;
use shutter::backends::camera::types::{CameraBackendType, Facing};
use shutter::errors::{AppResult, CameraError};
use shutter::flash::{FlashDevice, FlashMode};
use shutter::pipelines::photo::encoding::write_jpeg;
use shutter::pipelines::photo::{
    BackendCaptureAdapter, CaptureAdapter, CaptureRequest, OutputSize, default_export_dir,
    export_jpeg,
};
use std::path::PathBuf;

/// List all available cameras
pub fn list_cameras(backend: CameraBackendType) -> AppResult<()> {
    let manager = CameraBackendManager::new(backend);
    let cameras = manager.enumerate_cameras().unwrap_or_default();

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        println!("  [{}] {}", index, camera.name);
        println!("      Path: {}", camera.path);
        if let Some(location) = camera.location {
            println!("      Facing: {}", location);
        }
        println!();
    }

    for facing in [Facing::Back, Facing::Front] {
        match manager.device_for(facing) {
            Ok(device) => println!("{} camera: {}", facing, device.name),
            Err(_) => println!("{} camera: none", facing),
        }
    }

    Ok(())
}

/// Take a photo with the camera facing `facing`
pub fn take_photo(
    backend: CameraBackendType,
    facing: Facing,
    flash: FlashMode,
    output: Option<PathBuf>,
) -> AppResult<()> {
    let manager = CameraBackendManager::new(backend);
    let device = manager.device_for(facing).map_err(CameraError::from)?;
    println!("Using camera: {}", device.name);

    let flash_devices = FlashDevice::discover();
    // No preview in the CLI, so Auto has no scene reading and stays dark
    let fire_led = facing == Facing::Back && !flash_devices.is_empty() && flash.fires_led(None);

    let adapter = BackendCaptureAdapter::new(manager, OutputSize::default()).with_flash(flash_devices);
    let photo = adapter.trigger(&CaptureRequest { facing, fire_led })?;

    let path = match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            write_jpeg(&photo, &path)?;
            path
        }
        None => export_jpeg(&photo, &default_export_dir())?,
    };

    println!(
        "Photo saved: {} ({}x{})",
        path.display(),
        photo.width(),
        photo.height()
    );
    Ok(())
}
