// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the capture adapter seam

use image::RgbaImage;
use shutter::backends::camera::CameraBackendManager;
use shutter::backends::camera::types::{CameraBackendType, Facing};
use shutter::errors::PhotoError;
use shutter::pipelines::photo::capture::capture_async;
use shutter::pipelines::photo::{
    BackendCaptureAdapter, CaptureAdapter, CaptureRequest, OutputSize, Photo,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Replays canned results in order
struct FakeAdapter {
    results: Mutex<Vec<Result<Photo, PhotoError>>>,
    calls: AtomicUsize,
}

impl FakeAdapter {
    fn new(mut results: Vec<Result<Photo, PhotoError>>) -> Self {
        results.reverse();
        Self {
            results: Mutex::new(results),
            calls: AtomicUsize::new(0),
        }
    }
}

impl CaptureAdapter for FakeAdapter {
    fn trigger(&self, _request: &CaptureRequest) -> Result<Photo, PhotoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(Err(PhotoError::NoFrameAvailable))
    }
}

fn request(facing: Facing) -> CaptureRequest {
    CaptureRequest {
        facing,
        fire_led: false,
    }
}

#[tokio::test]
async fn test_fake_adapter_results_pass_through() {
    let canned = Photo::new(RgbaImage::new(8, 6));
    let adapter = Arc::new(FakeAdapter::new(vec![
        Ok(canned.clone()),
        Err(PhotoError::CaptureFailed("sensor busy".into())),
    ]));

    let first = capture_async(adapter.clone(), request(Facing::Back)).await;
    assert_eq!(first.map(|p| p.id()), Ok(canned.id()));

    let second = capture_async(adapter.clone(), request(Facing::Back)).await;
    assert_eq!(
        second.map(|p| p.id()),
        Err(PhotoError::CaptureFailed("sensor busy".into()))
    );
    assert_eq!(adapter.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_synthetic_backend_capture_for_both_facings() {
    let manager = CameraBackendManager::new(CameraBackendType::Synthetic);
    let adapter = BackendCaptureAdapter::new(manager, OutputSize::default());

    for facing in [Facing::Back, Facing::Front] {
        let photo = adapter.trigger(&request(facing)).unwrap();
        assert_eq!((photo.width(), photo.height()), (1280, 960));
    }
}

#[test]
fn test_custom_output_size() {
    let manager = CameraBackendManager::new(CameraBackendType::Synthetic);
    let adapter = BackendCaptureAdapter::new(
        manager,
        OutputSize {
            width: 320,
            height: 240,
        },
    );

    let photo = adapter.trigger(&request(Facing::Back)).unwrap();
    assert_eq!((photo.width(), photo.height()), (320, 240));
}
