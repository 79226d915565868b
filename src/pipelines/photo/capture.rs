// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture from the camera backend
//!
//! A capture grabs one still frame without interrupting the preview stream,
//! falling back to the most recent preview frame when the still pipeline
//! fails, and turns it into a [`Photo`].

use super::Photo;
use super::processing;
use crate::backends::camera::CameraBackendManager;
use crate::backends::camera::types::{CameraFrame, Facing, SensorRotation};
use crate::constants::{capture, timing};
use crate::errors::PhotoError;
use crate::flash::{self, FlashDevice};
use std::sync::Arc;
use tracing::{debug, error, info};

/// What to capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRequest {
    pub facing: Facing,
    /// Fire the hardware flash LED around the capture
    pub fire_led: bool,
}

/// Fixed size every photo is scaled to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl Default for OutputSize {
    fn default() -> Self {
        Self {
            width: capture::OUTPUT_WIDTH,
            height: capture::OUTPUT_HEIGHT,
        }
    }
}

/// Turns a capture trigger into a photo
///
/// `trigger` blocks; async callers go through [`capture_async`].
pub trait CaptureAdapter: Send + Sync {
    fn trigger(&self, request: &CaptureRequest) -> Result<Photo, PhotoError>;
}

/// Capture adapter backed by the camera backend manager
pub struct BackendCaptureAdapter {
    manager: CameraBackendManager,
    output: OutputSize,
    flash_devices: Vec<FlashDevice>,
}

impl BackendCaptureAdapter {
    pub fn new(manager: CameraBackendManager, output: OutputSize) -> Self {
        Self {
            manager,
            output,
            flash_devices: Vec::new(),
        }
    }

    /// Use these LEDs for `fire_led` requests
    pub fn with_flash(mut self, devices: Vec<FlashDevice>) -> Self {
        self.flash_devices = devices;
        self
    }

    /// Still frame from the backend, else the latest preview frame
    fn grab_frame(&self, facing: Facing) -> Result<(CameraFrame, SensorRotation), PhotoError> {
        let device = self.manager.device_for(facing).map_err(|e| {
            error!(error = %e, %facing, "No camera for capture");
            PhotoError::NoFrameAvailable
        })?;

        match self.manager.capture_still(facing) {
            Ok(frame) => {
                debug!(width = frame.width, height = frame.height, "Frame captured from backend");
                Ok((frame, device.rotation))
            }
            Err(e) => {
                error!(error = %e, "Backend capture failed, trying latest preview frame");
                self.manager
                    .latest_frame()
                    .map(|frame| (frame, device.rotation))
                    .ok_or_else(|| PhotoError::CaptureFailed(e.to_string()))
            }
        }
    }
}

impl CaptureAdapter for BackendCaptureAdapter {
    fn trigger(&self, request: &CaptureRequest) -> Result<Photo, PhotoError> {
        info!(facing = %request.facing, fire_led = request.fire_led, "Capturing photo");

        let led = request.fire_led && !self.flash_devices.is_empty();
        if led {
            flash::all_on(&self.flash_devices);
            std::thread::sleep(timing::LED_FLASH_SETTLE);
        }

        let grabbed = self.grab_frame(request.facing);

        if led {
            flash::all_off(&self.flash_devices);
        }

        let (frame, rotation) = grabbed?;
        let image =
            processing::process_frame(&frame, rotation, self.output.width, self.output.height)?;
        Ok(Photo::new(image))
    }
}

/// Run a capture on the blocking pool
pub async fn capture_async(
    adapter: Arc<dyn CaptureAdapter>,
    request: CaptureRequest,
) -> Result<Photo, PhotoError> {
    tokio::task::spawn_blocking(move || adapter.trigger(&request))
        .await
        .map_err(|e| PhotoError::CaptureFailed(format!("Capture task error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::types::{BackendResult, CameraBackendType, CameraDevice};
    use crate::backends::camera::types::{FrameSender, SourceKind};
    use crate::backends::camera::{CameraBackend, PreviewHandle};

    /// Backend whose still pipeline always fails
    struct BrokenStill;

    impl CameraBackend for BrokenStill {
        fn enumerate_cameras(&self) -> Vec<CameraDevice> {
            vec![CameraDevice {
                name: "sideways".into(),
                path: "0".into(),
                kind: SourceKind::TestPattern,
                location: None,
                rotation: SensorRotation::Rotate90,
            }]
        }

        fn capture_still(&self, _: &CameraDevice) -> BackendResult<CameraFrame> {
            Err(crate::backends::camera::types::BackendError::Timeout)
        }

        fn start_preview(&self, _: &CameraDevice, _: FrameSender) -> BackendResult<PreviewHandle> {
            Ok(PreviewHandle::new(|| {}))
        }

        fn backend_type(&self) -> CameraBackendType {
            CameraBackendType::Synthetic
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_synthetic_capture_has_output_size() {
        let manager = CameraBackendManager::new(CameraBackendType::Synthetic);
        let adapter = BackendCaptureAdapter::new(
            manager,
            OutputSize {
                width: 320,
                height: 240,
            },
        );
        let request = CaptureRequest {
            facing: Facing::Front,
            fire_led: false,
        };

        let photo = adapter.trigger(&request).unwrap();
        assert_eq!((photo.width(), photo.height()), (320, 240));
    }

    #[test]
    fn test_falls_back_to_preview_frame() {
        let manager = CameraBackendManager::with_backend(Arc::new(BrokenStill));
        let adapter = BackendCaptureAdapter::new(manager.clone(), OutputSize::default());
        let request = CaptureRequest {
            facing: Facing::Back,
            fire_led: true,
        };

        assert!(matches!(
            adapter.trigger(&request),
            Err(PhotoError::CaptureFailed(_))
        ));

        manager.store_frame(CameraFrame::from_rgba(4, 2, vec![200; 32]).unwrap());
        let photo = adapter.trigger(&request).unwrap();
        assert_eq!(
            (photo.width(), photo.height()),
            (capture::OUTPUT_WIDTH, capture::OUTPUT_HEIGHT)
        );
    }

    #[tokio::test]
    async fn test_capture_async_reports_errors() {
        struct NoFrames;
        impl CaptureAdapter for NoFrames {
            fn trigger(&self, _: &CaptureRequest) -> Result<Photo, PhotoError> {
                Err(PhotoError::NoFrameAvailable)
            }
        }

        let request = CaptureRequest {
            facing: Facing::Back,
            fire_led: false,
        };
        let result = capture_async(Arc::new(NoFrames), request).await;
        assert_eq!(result.unwrap_err(), PhotoError::NoFrameAvailable);
    }
}
