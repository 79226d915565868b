// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles the shutter, the simulated front flash and capture results.

use crate::app::camera::CameraEvent;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::types::Facing;
use crate::backends::power;
use crate::constants::timing;
use crate::errors::PhotoError;
use crate::pipelines::photo::capture::capture_async;
use crate::pipelines::photo::{CaptureRequest, Photo};
use cosmic::Task;
use tracing::{debug, error, info};

impl AppModel {
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    /// Create a delayed task that sends a message after the specified milliseconds
    pub(crate) fn delay_task(millis: u64, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
                message
            },
            cosmic::Action::App,
        )
    }

    /// Shutter pressed: read the battery, then trigger
    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        if self.camera.state().is_capturing() {
            debug!("Capture already in progress");
            return Task::none();
        }
        Task::perform(power::battery_percent(), |percent| {
            cosmic::Action::App(Message::TriggerCapture(percent))
        })
    }

    pub(crate) fn handle_trigger_capture(
        &mut self,
        battery_percent: u8,
    ) -> Task<cosmic::Action<Message>> {
        self.handle_camera_event(CameraEvent::TriggerCapture { battery_percent })
    }

    /// React to the camera screen's take-photo signal
    pub(crate) fn take_photo(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.camera.state().simulate_front_flash() {
            return self.handle_start_capture();
        }

        // White overlay is already shown; give the backlight and the sensor's
        // auto exposure time to react before grabbing the frame
        if let Some(brightness) = self.screen_brightness.as_mut() {
            brightness.boost();
        }
        Self::delay_task(
            timing::FRONT_FLASH_SETTLE.as_millis() as u64,
            Message::StartCapture,
        )
    }

    pub(crate) fn handle_start_capture(&mut self) -> Task<cosmic::Action<Message>> {
        let state = self.camera.state();
        let scene_luminance = self
            .backend_manager
            .latest_frame()
            .map(|frame| frame.mean_luminance());
        let request = CaptureRequest {
            facing: state.facing(),
            fire_led: state.facing() == Facing::Back
                && self.has_flash_led
                && state.flash_mode().fires_led(scene_luminance),
        };

        let adapter = self.capture_adapter.clone();
        Task::perform(capture_async(adapter, request), |result| {
            cosmic::Action::App(Message::CaptureFinished(result))
        })
    }

    pub(crate) fn handle_capture_finished(
        &mut self,
        result: Result<Photo, PhotoError>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(photo) => {
                info!(id = %photo.id(), "Capture finished");
                self.handle_camera_event(CameraEvent::PhotoCaptured(photo))
            }
            Err(err) => {
                error!(%err, "Capture failed");
                self.handle_camera_event(CameraEvent::CaptureFailed)
            }
        }
    }

    /// Put the backlight back after a simulated front flash
    pub(crate) fn reset_brightness(&mut self) {
        if let Some(brightness) = self.screen_brightness.as_mut() {
            brightness.restore();
        }
    }
}
