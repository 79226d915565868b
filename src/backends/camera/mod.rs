// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackendManager│  ← device cache, latest preview frame
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  CameraBackend Trait│  ← Common interface
//! └──────────┬──────────┘
//!            │
//!      ┌─────┴──────┐
//!      ▼            ▼
//! ┌─────────┐ ┌───────────┐
//! │GStreamer│ │ Synthetic │
//! └─────────┘ └───────────┘
//! ```

pub mod gstreamer_source;
pub mod manager;
pub mod synthetic;
pub mod types;

pub use manager::CameraBackendManager;
pub use types::*;

use std::sync::Arc;

/// Camera backend trait
///
/// Backends enumerate devices, grab single still frames and stream preview
/// frames. All frames are delivered as tightly packed RGBA.
pub trait CameraBackend: Send + Sync {
    /// Enumerate available cameras on this backend
    fn enumerate_cameras(&self) -> Vec<CameraDevice>;

    /// Capture a single still frame from `device`
    ///
    /// Blocks until a frame arrives or the capture times out, so callers on
    /// the UI thread must move this onto a blocking worker.
    fn capture_still(&self, device: &CameraDevice) -> BackendResult<CameraFrame>;

    /// Start streaming preview frames from `device` into `sender`
    ///
    /// The stream runs until the returned handle is dropped.
    fn start_preview(&self, device: &CameraDevice, sender: FrameSender)
    -> BackendResult<PreviewHandle>;

    /// Get the backend type identifier
    fn backend_type(&self) -> CameraBackendType;

    /// Check if this backend is available on the current system
    fn is_available(&self) -> bool;
}

/// Keeps a preview stream alive; stops it on drop
pub struct PreviewHandle {
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl PreviewHandle {
    /// Wrap the action that tears the stream down
    pub fn new(stop: impl FnOnce() + Send + 'static) -> Self {
        Self {
            stop: Some(Box::new(stop)),
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("active", &self.stop.is_some())
            .finish()
    }
}

/// Get a concrete backend instance for the given type
pub fn get_backend_for_type(backend_type: CameraBackendType) -> Arc<dyn CameraBackend> {
    match backend_type {
        CameraBackendType::GStreamer => Arc::new(gstreamer_source::GStreamerBackend::new()),
        CameraBackendType::Synthetic => Arc::new(synthetic::SyntheticBackend::new()),
    }
}
