// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen view-model
//!
//! Owns facing, flash mode, the capture-in-flight flag and the photos taken
//! during this session. Side effects are requested through one-shot signals:
//! the screen takes the photo on `TakePhoto` and puts the display brightness
//! back on `ResetBrightness`.

use crate::app::signal::{Delivery, OneShot};
use crate::backends::camera::types::Facing;
use crate::constants::capture;
use crate::flash::FlashMode;
use crate::pipelines::photo::{Photo, PhotoId};
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn};

/// Input to [`CameraViewModel::on_event`]
#[derive(Debug, Clone)]
pub enum CameraEvent {
    ToggleCameraFacing,
    CycleFlashMode,
    CaptureFailed,
    /// Shutter pressed; battery level read at press time
    TriggerCapture { battery_percent: u8 },
    PhotoCaptured(Photo),
    DeletePhoto(PhotoId),
}

/// One-shot output of the camera screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSignal {
    TakePhoto,
    /// Restore the backlight after a simulated front flash, whether the
    /// capture succeeded or failed
    ResetBrightness,
}

/// Camera screen state
#[derive(Debug, Clone, Default)]
pub struct CameraState {
    photos: Vec<Photo>,
    facing: Facing,
    flash_mode: FlashMode,
    is_capturing: bool,
    capture_icon_toggled: bool,
    simulate_front_flash: bool,
    /// Bumped on every write of `capture_icon_toggled`
    icon_animation: u64,
}

impl CameraState {
    /// Photos in capture order
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn flash_mode(&self) -> FlashMode {
        self.flash_mode
    }

    pub fn is_capturing(&self) -> bool {
        self.is_capturing
    }

    pub fn capture_icon_toggled(&self) -> bool {
        self.capture_icon_toggled
    }

    /// White overlay and full backlight requested for the running capture
    pub fn simulate_front_flash(&self) -> bool {
        self.simulate_front_flash
    }

    /// Changes whenever the capture icon should start animating
    pub fn icon_animation(&self) -> u64 {
        self.icon_animation
    }

    fn set_icon_toggled(&mut self, toggled: bool) {
        self.capture_icon_toggled = toggled;
        self.icon_animation = self.icon_animation.wrapping_add(1);
    }
}

/// Reducer for the camera screen
#[derive(Debug)]
pub struct CameraViewModel {
    state: CameraState,
    signals: OneShot<CameraSignal>,
    front_flash_min_battery: u8,
}

impl Default for CameraViewModel {
    fn default() -> Self {
        Self::new(capture::FRONT_FLASH_MIN_BATTERY)
    }
}

impl CameraViewModel {
    /// Empty session; the simulated front flash needs at least
    /// `front_flash_min_battery` percent
    pub fn new(front_flash_min_battery: u8) -> Self {
        Self {
            state: CameraState::default(),
            signals: OneShot::new(),
            front_flash_min_battery,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Observe capture signals, replacing any previous observer
    pub fn subscribe(&mut self) -> Receiver<CameraSignal> {
        self.signals.subscribe()
    }

    pub fn set_front_flash_min_battery(&mut self, percent: u8) {
        self.front_flash_min_battery = percent;
    }

    pub fn on_event(&mut self, event: CameraEvent) {
        match event {
            CameraEvent::ToggleCameraFacing => {
                self.state.facing = self.state.facing.flipped();
                info!(facing = %self.state.facing, "Camera facing toggled");
            }
            CameraEvent::CycleFlashMode => {
                self.state.flash_mode = self.state.flash_mode.next();
                debug!(mode = ?self.state.flash_mode, "Flash mode changed");
            }
            CameraEvent::TriggerCapture { battery_percent } => {
                // Callers gate on `is_capturing`; a repeated trigger flips back
                self.state.simulate_front_flash = self.state.facing == Facing::Front
                    && self.state.flash_mode == FlashMode::On
                    && battery_percent >= self.front_flash_min_battery;
                self.state.is_capturing = !self.state.is_capturing;
                let toggled = !self.state.capture_icon_toggled;
                self.state.set_icon_toggled(toggled);

                info!(
                    facing = %self.state.facing,
                    battery_percent,
                    simulate_front_flash = self.state.simulate_front_flash,
                    "Capture triggered"
                );
                self.emit(CameraSignal::TakePhoto);
            }
            CameraEvent::PhotoCaptured(photo) => {
                if self.state.simulate_front_flash {
                    self.emit(CameraSignal::ResetBrightness);
                }

                info!(id = %photo.id(), count = self.state.photos.len() + 1, "Photo captured");
                self.state.photos.push(photo);
                self.state.is_capturing = !self.state.is_capturing;
                let toggled = !self.state.capture_icon_toggled;
                self.state.set_icon_toggled(toggled);
                self.state.simulate_front_flash = false;
            }
            CameraEvent::CaptureFailed => {
                if self.state.simulate_front_flash {
                    self.emit(CameraSignal::ResetBrightness);
                }

                self.state.is_capturing = false;
                self.state.set_icon_toggled(false);
                self.state.simulate_front_flash = false;
            }
            CameraEvent::DeletePhoto(id) => {
                let before = self.state.photos.len();
                self.state.photos.retain(|photo| photo.id() != id);
                if self.state.photos.len() == before {
                    debug!(%id, "Delete of unknown photo ignored");
                } else {
                    info!(%id, remaining = self.state.photos.len(), "Photo deleted");
                }
            }
        }
    }

    fn emit(&mut self, signal: CameraSignal) {
        if self.signals.emit(signal) == Delivery::Dropped {
            warn!(?signal, "Camera signal had no observer");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_facing_keeps_capture_running() {
        let mut vm = CameraViewModel::default();
        let _observer = vm.subscribe();
        vm.on_event(CameraEvent::TriggerCapture { battery_percent: 80 });
        vm.on_event(CameraEvent::ToggleCameraFacing);

        assert_eq!(vm.state().facing(), Facing::Front);
        assert!(vm.state().is_capturing());
    }

    #[test]
    fn test_icon_animation_bumps_on_every_write() {
        let mut vm = CameraViewModel::default();
        let start = vm.state().icon_animation();
        vm.on_event(CameraEvent::CaptureFailed);
        vm.on_event(CameraEvent::CaptureFailed);
        assert_eq!(vm.state().icon_animation(), start + 2);
        assert!(!vm.state().capture_icon_toggled());
    }

    #[test]
    fn test_threshold_is_configurable() {
        let mut vm = CameraViewModel::new(50);
        let mut observer = vm.subscribe();
        vm.on_event(CameraEvent::ToggleCameraFacing);
        vm.on_event(CameraEvent::CycleFlashMode);

        vm.on_event(CameraEvent::TriggerCapture { battery_percent: 49 });
        assert!(!vm.state().simulate_front_flash());
        assert_eq!(observer.try_recv().ok(), Some(CameraSignal::TakePhoto));
    }
}
