// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::CameraBackendType;
use crate::constants::{capture, timing};
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use cosmic::{Theme, theme};
use serde::{Deserialize, Serialize};

/// Application theme preference
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AppTheme {
    /// Follow system theme (dark or light based on system setting)
    #[default]
    System,
    Dark,
    Light,
}

impl AppTheme {
    /// Order used by the theme dropdown
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    /// Get the COSMIC theme for this app theme preference
    pub fn theme(&self) -> Theme {
        match self {
            Self::Dark => {
                let mut theme = theme::system_dark();
                theme.theme_type.prefer_dark(Some(true));
                theme
            }
            Self::Light => {
                let mut theme = theme::system_light();
                theme.theme_type.prefer_dark(Some(false));
                theme
            }
            Self::System => theme::system_preference(),
        }
    }
}

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Application theme preference (System, Dark, Light)
    pub app_theme: AppTheme,
    /// Camera backend to use
    pub backend: CameraBackendType,
    /// Device path pinned to the front camera (empty = automatic)
    pub front_camera_path: String,
    /// Device path pinned to the back camera (empty = automatic)
    pub back_camera_path: String,
    /// Width every photo is scaled to
    pub photo_width: u32,
    /// Height every photo is scaled to
    pub photo_height: u32,
    /// Minimum battery percentage for the simulated front flash
    pub front_flash_min_battery: u8,
    /// Ignore volume-key presses for this long after a handled one
    pub key_debounce_ms: u64,
    /// Mirror the front camera preview horizontally (selfie mode)
    pub mirror_front_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_theme: AppTheme::default(),
            backend: CameraBackendType::default(),
            front_camera_path: String::new(),
            back_camera_path: String::new(),
            photo_width: capture::OUTPUT_WIDTH,
            photo_height: capture::OUTPUT_HEIGHT,
            front_flash_min_battery: capture::FRONT_FLASH_MIN_BATTERY,
            key_debounce_ms: timing::HARDWARE_KEY_DEBOUNCE_MS,
            mirror_front_preview: true,
        }
    }
}

impl Config {
    /// Output size, with zero dimensions replaced by the defaults
    pub fn output_size(&self) -> crate::pipelines::photo::OutputSize {
        let width = if self.photo_width == 0 {
            capture::OUTPUT_WIDTH
        } else {
            self.photo_width
        };
        let height = if self.photo_height == 0 {
            capture::OUTPUT_HEIGHT
        } else {
            self.photo_height
        };
        crate::pipelines::photo::OutputSize { width, height }
    }

    /// Battery threshold clamped to a percentage
    pub fn front_flash_threshold(&self) -> u8 {
        self.front_flash_min_battery.min(100)
    }
}
