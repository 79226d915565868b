// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend manager
//!
//! The manager provides:
//! - Device discovery with a cache, and front/back device selection
//! - Thread-safe backend access for still capture and preview
//! - The most recent preview frame, used as a capture fallback

use super::types::*;
use super::{CameraBackend, PreviewHandle, get_backend_for_type};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Internal manager state
struct ManagerState {
    backend: Arc<dyn CameraBackend>,
    backend_type: CameraBackendType,
    /// Devices from the last enumeration
    devices: Option<Vec<CameraDevice>>,
    /// Explicit device paths from the config, by facing
    overrides: Vec<(Facing, String)>,
}

/// Camera backend manager
///
/// Cheap to clone; clones share the same backend and caches.
#[derive(Clone)]
pub struct CameraBackendManager {
    state: Arc<Mutex<ManagerState>>,
    latest_frame: Arc<Mutex<Option<CameraFrame>>>,
}

impl CameraBackendManager {
    /// Create a new backend manager for `backend_type`
    pub fn new(backend_type: CameraBackendType) -> Self {
        info!(backend = %backend_type, "Creating camera backend manager");
        Self::with_backend(get_backend_for_type(backend_type))
    }

    /// Wrap an existing backend instance
    pub fn with_backend(backend: Arc<dyn CameraBackend>) -> Self {
        let backend_type = backend.backend_type();
        Self {
            state: Arc::new(Mutex::new(ManagerState {
                backend,
                backend_type,
                devices: None,
                overrides: Vec::new(),
            })),
            latest_frame: Arc::new(Mutex::new(None)),
        }
    }

    fn state(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the backend type
    pub fn backend_type(&self) -> CameraBackendType {
        self.state().backend_type
    }

    /// Check if the backend is available on this system
    pub fn is_available(&self) -> bool {
        self.state().backend.is_available()
    }

    /// Pin a facing to a specific device path (empty clears the override)
    pub fn set_device_override(&self, facing: Facing, path: &str) {
        let mut state = self.state();
        state.overrides.retain(|(f, _)| *f != facing);
        if !path.is_empty() {
            state.overrides.push((facing, path.to_string()));
        }
    }

    /// Enumerate available cameras, refreshing the cache
    pub fn enumerate_cameras(&self) -> BackendResult<Vec<CameraDevice>> {
        let backend = Arc::clone(&self.state().backend);
        let cameras = backend.enumerate_cameras();
        self.state().devices = Some(cameras.clone());

        if cameras.is_empty() {
            Err(BackendError::DeviceNotFound("No cameras found".to_string()))
        } else {
            Ok(cameras)
        }
    }

    /// Resolve the device serving `facing`
    ///
    /// A configured override wins when it names a known device; otherwise
    /// the location/order rule of [`select_device`] applies.
    pub fn device_for(&self, facing: Facing) -> BackendResult<CameraDevice> {
        if self.state().devices.is_none() {
            // Populates the cache; an empty result is reported below
            let _ = self.enumerate_cameras();
        }

        let state = self.state();
        let devices = state.devices.as_deref().unwrap_or_default();

        let pinned = state
            .overrides
            .iter()
            .find(|(f, _)| *f == facing)
            .and_then(|(_, path)| {
                let found = devices.iter().find(|d| d.path == *path);
                if found.is_none() {
                    warn!(%facing, path = %path, "Configured camera not present, using default");
                }
                found
            });

        pinned
            .or_else(|| select_device(devices, facing))
            .cloned()
            .ok_or_else(|| BackendError::DeviceNotFound(format!("No {} camera", facing)))
    }

    /// Capture a still frame from the camera serving `facing`
    ///
    /// Blocking; call from a worker thread.
    pub fn capture_still(&self, facing: Facing) -> BackendResult<CameraFrame> {
        let device = self.device_for(facing)?;
        let backend = Arc::clone(&self.state().backend);
        backend.capture_still(&device)
    }

    /// Start streaming preview frames for `facing`
    pub fn start_preview(&self, facing: Facing, sender: FrameSender) -> BackendResult<PreviewHandle> {
        let device = self.device_for(facing)?;
        info!(device = %device.name, %facing, "Starting preview");
        let backend = Arc::clone(&self.state().backend);
        backend.start_preview(&device, sender)
    }

    /// Remember the newest preview frame
    pub fn store_frame(&self, frame: CameraFrame) {
        *self.latest_frame.lock().unwrap_or_else(PoisonError::into_inner) = Some(frame);
    }

    /// The newest preview frame, if any
    pub fn latest_frame(&self) -> Option<CameraFrame> {
        self.latest_frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget the stored preview frame (e.g. after switching cameras)
    pub fn clear_frame(&self) {
        *self.latest_frame.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl std::fmt::Debug for CameraBackendManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("CameraBackendManager")
            .field("backend_type", &state.backend_type)
            .field("devices", &state.devices.as_ref().map(Vec::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_devices_resolve_by_facing() {
        let manager = CameraBackendManager::new(CameraBackendType::Synthetic);
        assert_eq!(manager.device_for(Facing::Front).unwrap().path, "front");
        assert_eq!(manager.device_for(Facing::Back).unwrap().path, "back");
    }

    #[test]
    fn test_override_wins_when_present() {
        let manager = CameraBackendManager::new(CameraBackendType::Synthetic);
        manager.set_device_override(Facing::Back, "front");
        assert_eq!(manager.device_for(Facing::Back).unwrap().path, "front");

        manager.set_device_override(Facing::Back, "missing");
        assert_eq!(manager.device_for(Facing::Back).unwrap().path, "back");

        manager.set_device_override(Facing::Back, "");
        assert_eq!(manager.device_for(Facing::Back).unwrap().path, "back");
    }

    #[test]
    fn test_latest_frame_slot() {
        let manager = CameraBackendManager::new(CameraBackendType::Synthetic);
        assert!(manager.latest_frame().is_none());

        manager.store_frame(CameraFrame::from_rgba(1, 1, vec![1, 2, 3, 4]).unwrap());
        assert_eq!(manager.latest_frame().unwrap().width, 1);

        manager.clear_frame();
        assert!(manager.latest_frame().is_none());
    }
}
