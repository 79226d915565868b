// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture pipeline
//!
//! ```text
//! Camera Backend → Capture → Orientation → Downsample → Photo
//!       ↓                                                 ↓
//! Preview continues uninterrupted              (optional) JPEG export
//! ```
//!
//! Captured photos live in memory only; exporting one to disk is an explicit
//! user action in the viewer.

pub mod capture;
pub mod encoding;
pub mod processing;

pub use capture::{BackendCaptureAdapter, CaptureAdapter, CaptureRequest, OutputSize};
pub use encoding::{default_export_dir, export_jpeg, save_photo};

use chrono::{DateTime, Local};
use cosmic::widget::image::Handle;
use image::RgbaImage;
use std::sync::Arc;

/// Unique identity of a captured photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhotoId(uuid::Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// First eight hex digits, for file names and logs
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A captured photo
///
/// Cloning is cheap: the bitmap and its render handle are shared. Two
/// photos are equal only if they are the same capture.
#[derive(Debug, Clone)]
pub struct Photo {
    id: PhotoId,
    image: Arc<RgbaImage>,
    handle: Handle,
    captured_at: DateTime<Local>,
}

impl Photo {
    /// Wrap a decoded bitmap as a fresh capture
    pub fn new(image: RgbaImage) -> Self {
        let handle = Handle::from_rgba(image.width(), image.height(), image.as_raw().clone());
        Self {
            id: PhotoId::new(),
            image: Arc::new(image),
            handle,
            captured_at: Local::now(),
        }
    }

    pub fn id(&self) -> PhotoId {
        self.id
    }

    pub fn image(&self) -> &Arc<RgbaImage> {
        &self.image
    }

    /// Render handle for `image`/`image::viewer` widgets
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }
}

impl PartialEq for Photo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Photo {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_bitmaps_are_distinct_photos() {
        let a = Photo::new(RgbaImage::new(2, 2));
        let b = Photo::new(RgbaImage::new(2, 2));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.id().short().len(), 8);
        assert_eq!((a.width(), a.height()), (2, 2));
    }
}
