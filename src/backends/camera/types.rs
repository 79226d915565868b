// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Camera backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CameraBackendType {
    /// GStreamer backend (PipeWire or V4L2 sources)
    #[default]
    GStreamer,
    /// Generated test pattern, for machines without a camera
    Synthetic,
}

impl std::fmt::Display for CameraBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraBackendType::GStreamer => write!(f, "GStreamer"),
            CameraBackendType::Synthetic => write!(f, "Synthetic"),
        }
    }
}

/// Which physical camera is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// User-facing camera (selfie / webcam)
    Front,
    /// World-facing camera
    #[default]
    Back,
}

impl Facing {
    /// The other camera
    pub fn flipped(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }

    /// Parse a libcamera/PipeWire location property ("front", "back", "external")
    pub fn from_location(location: &str) -> Option<Self> {
        match location.trim() {
            "front" => Some(Facing::Front),
            "back" => Some(Facing::Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
        }
    }
}

/// Sensor rotation in degrees (clockwise)
///
/// Sensors are often mounted rotated relative to the display, most commonly
/// by 90° or 270° on phones and tablets. The value comes from libcamera's
/// `api.libcamera.rotation` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorRotation {
    /// No rotation (sensor is oriented correctly)
    #[default]
    None,
    /// 90 degrees clockwise
    Rotate90,
    /// 180 degrees (upside down)
    Rotate180,
    /// 270 degrees clockwise (90 degrees counter-clockwise)
    Rotate270,
}

impl SensorRotation {
    /// Create rotation from an integer degree value (normalised to 0-360).
    pub fn from_degrees_int(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            90 => SensorRotation::Rotate90,
            180 => SensorRotation::Rotate180,
            270 => SensorRotation::Rotate270,
            _ => SensorRotation::None,
        }
    }

    /// Parse rotation from a string value (degrees)
    pub fn from_degrees(degrees: &str) -> Self {
        degrees
            .trim()
            .parse::<i32>()
            .map(Self::from_degrees_int)
            .unwrap_or_default()
    }

    /// Get the rotation in degrees
    pub fn degrees(&self) -> u32 {
        match self {
            SensorRotation::None => 0,
            SensorRotation::Rotate90 => 90,
            SensorRotation::Rotate180 => 180,
            SensorRotation::Rotate270 => 270,
        }
    }

    /// Check if rotation swaps width and height
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, SensorRotation::Rotate90 | SensorRotation::Rotate270)
    }
}

impl std::fmt::Display for SensorRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Where a camera's frames come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// PipeWire node, addressed by object serial
    PipeWire,
    /// V4L2 device node, addressed by path
    V4l2,
    /// Generated test pattern
    TestPattern,
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    /// PipeWire object serial, V4L2 device path, or pattern name
    pub path: String,
    pub kind: SourceKind,
    /// Physical mounting reported by the driver, if any
    pub location: Option<Facing>,
    pub rotation: SensorRotation,
}

impl CameraDevice {
    /// GStreamer source element description for this device
    pub fn source_element(&self) -> String {
        match self.kind {
            SourceKind::PipeWire if self.path.is_empty() => "pipewiresrc".to_string(),
            SourceKind::PipeWire => format!("pipewiresrc target-object={}", self.path),
            SourceKind::V4l2 => format!("v4l2src device={}", self.path),
            SourceKind::TestPattern => format!("videotestsrc pattern={}", self.path),
        }
    }
}

/// Pick the device for the requested facing
///
/// A device whose reported location matches wins. Desktop webcams rarely
/// report a location, so otherwise the first device is treated as the front
/// camera and the second (when present) as the back camera.
pub fn select_device(devices: &[CameraDevice], facing: Facing) -> Option<&CameraDevice> {
    if let Some(device) = devices.iter().find(|d| d.location == Some(facing)) {
        return Some(device);
    }

    let unplaced: Vec<&CameraDevice> = devices.iter().filter(|d| d.location.is_none()).collect();
    let candidates = if unplaced.is_empty() {
        devices.iter().collect()
    } else {
        unplaced
    };

    match facing {
        Facing::Front => candidates.first().copied(),
        Facing::Back => candidates.get(1).or(candidates.first()).copied(),
    }
}

/// A single RGBA camera frame
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA, `width * height * 4` bytes
    pub data: Arc<[u8]>,
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Build a frame from tightly packed RGBA bytes
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> BackendResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(BackendError::InvalidFrame(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data: Arc::from(data),
            captured_at: Instant::now(),
        })
    }

    /// Copy out of a strided buffer (GStreamer rows may be padded)
    pub fn from_strided(width: u32, height: u32, stride: usize, src: &[u8]) -> BackendResult<Self> {
        let row_bytes = width as usize * 4;
        if width == 0 || height == 0 {
            return Err(BackendError::InvalidFrame(format!(
                "empty frame {}x{}",
                width, height
            )));
        }
        if stride < row_bytes || src.len() < stride * (height as usize - 1) + row_bytes {
            return Err(BackendError::InvalidFrame(format!(
                "buffer of {} bytes too small for {}x{} with stride {}",
                src.len(),
                width,
                height,
                stride
            )));
        }

        let mut data = Vec::with_capacity(row_bytes * height as usize);
        for row in src.chunks(stride).take(height as usize) {
            data.extend_from_slice(&row[..row_bytes]);
        }
        Self::from_rgba(width, height, data)
    }

    /// Mean Rec. 601 luma over a sparse pixel sample (0-255)
    pub fn mean_luminance(&self) -> f32 {
        const SAMPLE_STEP: usize = 16;

        let mut sum = 0.0f64;
        let mut count = 0u64;
        for px in self.data.chunks_exact(4).step_by(SAMPLE_STEP) {
            sum += 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64;
            count += 1;
        }

        if count == 0 {
            0.0
        } else {
            (sum / count as f64) as f32
        }
    }

    /// Copy into an owned `image` buffer
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.to_vec())
    }
}

/// Errors reported by camera backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Pipeline or element could not be created
    InitializationFailed(String),
    /// No device matches the request
    DeviceNotFound(String),
    /// No frame arrived in time
    Timeout,
    /// Frame data did not match its declared geometry
    InvalidFrame(String),
    /// Other backend failure
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::Timeout => write!(f, "Timed out waiting for a frame"),
            BackendError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
            BackendError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<gstreamer::glib::Error> for BackendError {
    fn from(err: gstreamer::glib::Error) -> Self {
        BackendError::InitializationFailed(err.to_string())
    }
}

impl From<gstreamer::StateChangeError> for BackendError {
    fn from(err: gstreamer::StateChangeError) -> Self {
        BackendError::Other(format!("State change failed: {}", err))
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Channel end handed to preview sources
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

/// Channel end the UI subscription reads preview frames from
pub type FrameReceiver = futures::channel::mpsc::Receiver<CameraFrame>;

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, location: Option<Facing>) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: name.to_string(),
            kind: SourceKind::V4l2,
            location,
            rotation: SensorRotation::None,
        }
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(SensorRotation::from_degrees("90"), SensorRotation::Rotate90);
        assert_eq!(SensorRotation::from_degrees(" 270 "), SensorRotation::Rotate270);
        assert_eq!(SensorRotation::from_degrees("-90"), SensorRotation::Rotate270);
        assert_eq!(SensorRotation::from_degrees("garbage"), SensorRotation::None);
        assert!(SensorRotation::Rotate90.swaps_dimensions());
        assert!(!SensorRotation::Rotate180.swaps_dimensions());
    }

    #[test]
    fn test_select_device_prefers_location() {
        let devices = vec![
            device("a", Some(Facing::Back)),
            device("b", Some(Facing::Front)),
        ];
        assert_eq!(select_device(&devices, Facing::Front).unwrap().name, "b");
        assert_eq!(select_device(&devices, Facing::Back).unwrap().name, "a");
    }

    #[test]
    fn test_select_device_by_order_without_location() {
        let single = vec![device("webcam", None)];
        assert_eq!(select_device(&single, Facing::Front).unwrap().name, "webcam");
        assert_eq!(select_device(&single, Facing::Back).unwrap().name, "webcam");

        let pair = vec![device("first", None), device("second", None)];
        assert_eq!(select_device(&pair, Facing::Front).unwrap().name, "first");
        assert_eq!(select_device(&pair, Facing::Back).unwrap().name, "second");

        assert!(select_device(&[], Facing::Front).is_none());
    }

    #[test]
    fn test_frame_size_checked() {
        assert!(CameraFrame::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            CameraFrame::from_rgba(2, 2, vec![0; 15]),
            Err(BackendError::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_strided_copy_drops_padding() {
        // 1x2 frame, rows padded to 8 bytes
        let src = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8];
        let frame = CameraFrame::from_strided(1, 2, 8, &src).unwrap();
        assert_eq!(&*frame.data, &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_mean_luminance() {
        let white = CameraFrame::from_rgba(4, 4, vec![255; 64]).unwrap();
        assert!((white.mean_luminance() - 255.0).abs() < 0.5);
        let black = CameraFrame::from_rgba(4, 4, vec![0; 64]).unwrap();
        assert_eq!(black.mean_luminance(), 0.0);
    }
}
