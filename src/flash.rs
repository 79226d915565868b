// SPDX-License-Identifier: GPL-3.0-only

//! Flash control
//!
//! Back cameras use the hardware flash LED exposed at
//! `/sys/class/leds/*:flash`, driven in torch mode through the
//! group-writable `brightness` file. Front cameras fake a flash with a white
//! overlay and the display backlight at full brightness.

use crate::constants::capture;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const LEDS_DIR: &str = "/sys/class/leds";
const BACKLIGHT_DIR: &str = "/sys/class/backlight";

/// Flash operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashMode {
    #[default]
    Off,
    /// Flash fires on every capture
    On,
    /// Flash fires when the scene is dark
    Auto,
}

impl FlashMode {
    /// Cycle to the next mode: Off -> On -> Auto -> Off
    pub fn next(self) -> Self {
        match self {
            FlashMode::Off => FlashMode::On,
            FlashMode::On => FlashMode::Auto,
            FlashMode::Auto => FlashMode::Off,
        }
    }

    /// Whether the LED should fire given the preview's mean luminance
    ///
    /// Without a preview frame `Auto` stays dark.
    pub fn fires_led(self, scene_luminance: Option<f32>) -> bool {
        match self {
            FlashMode::Off => false,
            FlashMode::On => true,
            FlashMode::Auto => scene_luminance
                .is_some_and(|luma| luma < capture::AUTO_FLASH_LUMINANCE_THRESHOLD),
        }
    }
}

/// Read a positive integer from a sysfs attribute
fn read_level(path: &Path) -> Option<u32> {
    match std::fs::read_to_string(path) {
        Ok(s) => s.trim().parse::<u32>().ok(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Cannot read sysfs attribute");
            None
        }
    }
}

/// A flash LED device discovered via sysfs
#[derive(Debug, Clone)]
pub struct FlashDevice {
    /// Sysfs path, e.g. `/sys/class/leds/white:flash`
    path: PathBuf,
    max_brightness: u32,
    name: String,
}

impl FlashDevice {
    /// All writable `*:flash` LEDs on this machine
    pub fn discover() -> Vec<FlashDevice> {
        Self::discover_in(Path::new(LEDS_DIR))
    }

    /// Scan `root` for `*:flash` entries we can write to
    pub fn discover_in(root: &Path) -> Vec<FlashDevice> {
        let Ok(entries) = std::fs::read_dir(root) else {
            debug!(dir = %root.display(), "No LED class directory, flash discovery skipped");
            return Vec::new();
        };

        let mut devices = Vec::new();

        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name_str) = name.to_str() else {
                continue;
            };

            // "white:flash", "yellow:flash"
            if !name_str.ends_with(":flash") {
                continue;
            }

            let led_path = entry.path();
            let Some(max_brightness) =
                read_level(&led_path.join("max_brightness")).filter(|v| *v > 0)
            else {
                warn!(name = name_str, "Invalid max_brightness, skipping flash LED");
                continue;
            };

            if let Err(e) = std::fs::OpenOptions::new()
                .write(true)
                .open(led_path.join("brightness"))
            {
                warn!(
                    name = name_str,
                    error = %e,
                    "Flash LED not writable - user may need to be in 'feedbackd' group"
                );
                continue;
            }

            info!(name = name_str, max_brightness, "Discovered flash LED");
            devices.push(FlashDevice {
                path: led_path,
                max_brightness,
                name: name_str.to_string(),
            });
        }

        // White before yellow
        devices.sort_by(|a, b| a.name.cmp(&b.name));
        devices
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set raw brightness value (0 = off, max_brightness = full)
    pub fn set_brightness(&self, value: u32) -> io::Result<()> {
        std::fs::write(
            self.path.join("brightness"),
            value.min(self.max_brightness).to_string(),
        )
    }
}

/// Turn on all flash LEDs at full brightness
pub fn all_on(devices: &[FlashDevice]) {
    for dev in devices {
        if let Err(e) = dev.set_brightness(dev.max_brightness) {
            warn!(device = %dev.name, error = %e, "Failed to turn on flash LED");
        }
    }
}

/// Turn off all flash LEDs
pub fn all_off(devices: &[FlashDevice]) {
    for dev in devices {
        if let Err(e) = dev.set_brightness(0) {
            warn!(device = %dev.name, error = %e, "Failed to turn off flash LED");
        }
    }
}

/// Display backlight override for the simulated front flash
///
/// `boost` remembers the current level once; `restore` writes it back and
/// forgets it, so repeated calls are harmless.
#[derive(Debug, Clone)]
pub struct ScreenBrightness {
    path: PathBuf,
    max_brightness: u32,
    saved: Option<u32>,
}

impl ScreenBrightness {
    /// First writable backlight on this machine
    pub fn discover() -> Option<Self> {
        Self::discover_in(Path::new(BACKLIGHT_DIR))
    }

    /// First writable backlight under `root`
    pub fn discover_in(root: &Path) -> Option<Self> {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(root)
            .ok()?
            .flatten()
            .map(|entry| entry.path())
            .collect();
        candidates.sort();

        for path in candidates {
            let Some(max_brightness) = read_level(&path.join("max_brightness")).filter(|v| *v > 0)
            else {
                continue;
            };
            if std::fs::OpenOptions::new()
                .write(true)
                .open(path.join("brightness"))
                .is_err()
            {
                debug!(backlight = %path.display(), "Backlight not writable");
                continue;
            }
            info!(backlight = %path.display(), max_brightness, "Using backlight for front flash");
            return Some(Self {
                path,
                max_brightness,
                saved: None,
            });
        }

        None
    }

    /// Raise the backlight to maximum, remembering the current level
    pub fn boost(&mut self) {
        if self.saved.is_none() {
            self.saved = read_level(&self.path.join("brightness"));
        }
        if let Err(e) = self.write(self.max_brightness) {
            warn!(error = %e, "Failed to raise screen brightness");
        }
    }

    /// Put back the level saved by `boost`
    pub fn restore(&mut self) {
        let Some(level) = self.saved.take() else {
            return;
        };
        if let Err(e) = self.write(level) {
            warn!(error = %e, "Failed to restore screen brightness");
        }
    }

    /// Whether a boost is waiting to be restored
    pub fn is_boosted(&self) -> bool {
        self.saved.is_some()
    }

    fn write(&self, level: u32) -> io::Result<()> {
        std::fs::write(
            self.path.join("brightness"),
            level.min(self.max_brightness).to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shutter-{}-{}", tag, uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_flash_cycle_has_period_three() {
        let mut mode = FlashMode::Off;
        let mut seen = Vec::new();
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![FlashMode::On, FlashMode::Auto, FlashMode::Off, FlashMode::On]
        );
    }

    #[test]
    fn test_auto_fires_only_in_the_dark() {
        assert!(FlashMode::On.fires_led(None));
        assert!(!FlashMode::Off.fires_led(Some(0.0)));
        assert!(FlashMode::Auto.fires_led(Some(10.0)));
        assert!(!FlashMode::Auto.fires_led(Some(200.0)));
        assert!(!FlashMode::Auto.fires_led(None));
    }

    #[test]
    fn test_led_discovery_filters_names() {
        let root = scratch_dir("leds");
        for name in ["white:flash", "green:status"] {
            let led = root.join(name);
            std::fs::create_dir_all(&led).unwrap();
            std::fs::write(led.join("max_brightness"), "255\n").unwrap();
            std::fs::write(led.join("brightness"), "0\n").unwrap();
        }

        let devices = FlashDevice::discover_in(&root);
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name(), "white:flash");

        all_on(&devices);
        assert_eq!(
            std::fs::read_to_string(root.join("white:flash/brightness")).unwrap(),
            "255"
        );
        all_off(&devices);
        assert_eq!(
            std::fs::read_to_string(root.join("white:flash/brightness")).unwrap(),
            "0"
        );

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_backlight_boost_and_restore() {
        let root = scratch_dir("backlight");
        let panel = root.join("intel_backlight");
        std::fs::create_dir_all(&panel).unwrap();
        std::fs::write(panel.join("max_brightness"), "1000\n").unwrap();
        std::fs::write(panel.join("brightness"), "420\n").unwrap();

        let mut backlight = ScreenBrightness::discover_in(&root).unwrap();
        backlight.boost();
        backlight.boost();
        assert!(backlight.is_boosted());
        assert_eq!(std::fs::read_to_string(panel.join("brightness")).unwrap(), "1000");

        backlight.restore();
        assert!(!backlight.is_boosted());
        assert_eq!(std::fs::read_to_string(panel.join("brightness")).unwrap(), "420");

        std::fs::remove_dir_all(&root).unwrap();
    }
}
