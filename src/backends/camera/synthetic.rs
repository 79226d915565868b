// SPDX-License-Identifier: GPL-3.0-only

//! Generated camera source
//!
//! Provides a front and a back "camera" drawing a moving gradient, so the
//! app and the CLI can be exercised on machines without camera hardware.

use super::types::*;
use super::{CameraBackend, PreviewHandle};
use crate::constants::timing;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::{debug, info};

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;

/// Test-pattern backend
#[derive(Debug, Default)]
pub struct SyntheticBackend {
    /// Advances on every generated frame so consecutive stills differ
    tick: AtomicU32,
}

impl SyntheticBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn device(facing: Facing) -> CameraDevice {
        CameraDevice {
            name: format!("Synthetic {} camera", facing),
            path: facing.to_string(),
            kind: SourceKind::TestPattern,
            location: Some(facing),
            rotation: SensorRotation::None,
        }
    }
}

impl CameraBackend for SyntheticBackend {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        vec![Self::device(Facing::Front), Self::device(Facing::Back)]
    }

    fn capture_still(&self, device: &CameraDevice) -> BackendResult<CameraFrame> {
        let tick = self.tick.fetch_add(1, Ordering::Relaxed);
        debug!(device = %device.name, tick, "Generating still frame");
        render(device.location.unwrap_or_default(), tick)
    }

    fn start_preview(
        &self,
        device: &CameraDevice,
        mut sender: FrameSender,
    ) -> BackendResult<PreviewHandle> {
        info!(device = %device.name, "Starting synthetic preview");

        let facing = device.location.unwrap_or_default();
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);

        std::thread::Builder::new()
            .name("synthetic-preview".into())
            .spawn(move || {
                let mut tick = 0u32;
                while thread_running.load(Ordering::Relaxed) {
                    if let Ok(frame) = render(facing, tick) {
                        if let Err(e) = sender.try_send(frame) {
                            if e.is_disconnected() {
                                break;
                            }
                        }
                    }
                    tick = tick.wrapping_add(1);
                    std::thread::sleep(timing::SYNTHETIC_FRAME);
                }
                debug!("Synthetic preview thread exited");
            })
            .map_err(|e| BackendError::InitializationFailed(e.to_string()))?;

        Ok(PreviewHandle::new(move || {
            running.store(false, Ordering::Relaxed);
        }))
    }

    fn backend_type(&self) -> CameraBackendType {
        CameraBackendType::Synthetic
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Diagonal gradient with a band sweeping across it
fn render(facing: Facing, tick: u32) -> BackendResult<CameraFrame> {
    let band = (tick * 8) % FRAME_WIDTH;
    let (tint_r, tint_b) = match facing {
        Facing::Front => (200u32, 80u32),
        Facing::Back => (80, 200),
    };

    let mut data = Vec::with_capacity((FRAME_WIDTH * FRAME_HEIGHT * 4) as usize);
    for y in 0..FRAME_HEIGHT {
        for x in 0..FRAME_WIDTH {
            let g = ((x + y) * 255 / (FRAME_WIDTH + FRAME_HEIGHT)) as u8;
            let lit = x.abs_diff(band) < 12;
            let r = if lit { 255 } else { (tint_r * y / FRAME_HEIGHT) as u8 };
            let b = if lit { 255 } else { (tint_b * x / FRAME_WIDTH) as u8 };
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }

    CameraFrame::from_rgba(FRAME_WIDTH, FRAME_HEIGHT, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerates_both_facings() {
        let backend = SyntheticBackend::new();
        let devices = backend.enumerate_cameras();
        assert_eq!(devices.len(), 2);
        assert_eq!(select_device(&devices, Facing::Front).unwrap().location, Some(Facing::Front));
        assert_eq!(select_device(&devices, Facing::Back).unwrap().location, Some(Facing::Back));
    }

    #[test]
    fn test_stills_have_expected_geometry() {
        let backend = SyntheticBackend::new();
        let device = SyntheticBackend::device(Facing::Back);
        let first = backend.capture_still(&device).unwrap();
        let second = backend.capture_still(&device).unwrap();
        assert_eq!((first.width, first.height), (FRAME_WIDTH, FRAME_HEIGHT));
        assert_eq!(first.data.len(), (FRAME_WIDTH * FRAME_HEIGHT * 4) as usize);
        assert_ne!(first.data, second.data);
    }

    #[test]
    fn test_preview_stops_on_drop() {
        let backend = SyntheticBackend::new();
        let device = SyntheticBackend::device(Facing::Front);
        let (sender, mut receiver) = futures::channel::mpsc::channel(4);

        let handle = backend.start_preview(&device, sender).unwrap();
        let frame = futures::executor::block_on(futures::StreamExt::next(&mut receiver));
        assert!(frame.is_some());

        drop(handle);
        // Thread exits and drops its sender, closing the stream
        let rest: Vec<_> = futures::executor::block_on(futures::StreamExt::collect(receiver));
        assert!(rest.len() <= 4);
    }
}
