// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use shutter::Config;
use shutter::backends::camera::types::CameraBackendType;
use shutter::config::AppTheme;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(
        config.mirror_front_preview,
        "Front preview should be mirrored by default"
    );
    assert_eq!(config.backend, CameraBackendType::GStreamer);
    assert_eq!(config.app_theme, AppTheme::System);
    assert_eq!(config.key_debounce_ms, 1000);
    assert!(config.front_camera_path.is_empty());
    assert!(config.back_camera_path.is_empty());
}

#[test]
fn test_output_size_defaults_to_1280x960() {
    let size = Config::default().output_size();
    assert_eq!((size.width, size.height), (1280, 960));
}

#[test]
fn test_zero_output_size_falls_back() {
    let config = Config {
        photo_width: 0,
        photo_height: 480,
        ..Config::default()
    };
    let size = config.output_size();
    assert_eq!((size.width, size.height), (1280, 480));
}

#[test]
fn test_front_flash_threshold_is_a_percentage() {
    let config = Config {
        front_flash_min_battery: 250,
        ..Config::default()
    };
    assert_eq!(config.front_flash_threshold(), 100);
    assert_eq!(Config::default().front_flash_threshold(), 15);
}

#[test]
fn test_theme_dropdown_order() {
    assert_eq!(
        AppTheme::ALL,
        [AppTheme::System, AppTheme::Dark, AppTheme::Light]
    );
}
