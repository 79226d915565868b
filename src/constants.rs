// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Capture output settings
pub mod capture {
    /// Default width every captured photo is resized to
    pub const OUTPUT_WIDTH: u32 = 1280;

    /// Default height every captured photo is resized to
    pub const OUTPUT_HEIGHT: u32 = 960;

    /// Minimum battery percentage for the simulated front flash (inclusive)
    pub const FRONT_FLASH_MIN_BATTERY: u8 = 15;

    /// Mean preview luminance (0-255) below which `FlashMode::Auto` fires the LED
    pub const AUTO_FLASH_LUMINANCE_THRESHOLD: f32 = 60.0;

    /// JPEG quality for exported photos
    pub const EXPORT_JPEG_QUALITY: u8 = 92;
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Window after a handled hardware key press during which further presses are ignored
    pub const HARDWARE_KEY_DEBOUNCE_MS: u64 = 1000;

    /// Time the white overlay is on screen before a simulated-flash capture starts
    pub const FRONT_FLASH_SETTLE: Duration = Duration::from_millis(300);

    /// LED warm-up before a hardware-flash capture starts
    pub const LED_FLASH_SETTLE: Duration = Duration::from_millis(200);

    /// How long a still capture waits for the first frame
    pub const STILL_CAPTURE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Frames discarded by a one-shot still pipeline while auto-exposure settles
    pub const STILL_CAPTURE_WARMUP_FRAMES: u32 = 5;

    /// Pipeline state-change timeout
    pub const PIPELINE_STATE_TIMEOUT_SECS: u64 = 5;

    /// Duration of the capture icon's rotation
    pub const CAPTURE_ICON_ROTATION: Duration = Duration::from_millis(1000);

    /// Animation frame interval (~60fps)
    pub const ANIMATION_FRAME: Duration = Duration::from_millis(16);

    /// Delay before retrying a failed preview pipeline
    pub const PREVIEW_RETRY: Duration = Duration::from_secs(5);

    /// Frame interval of the synthetic test-pattern source
    pub const SYNTHETIC_FRAME: Duration = Duration::from_millis(33);
}

/// Animation parameters
pub mod animation {
    /// Spring stiffness for the viewer rotation (low, soft motion)
    pub const ROTATION_SPRING_STIFFNESS: f32 = 200.0;

    /// Damping ratio for the viewer rotation (1.0 = critically damped, no bounce)
    pub const ROTATION_SPRING_DAMPING_RATIO: f32 = 1.0;

    /// Degrees added per rotate tap in the viewer
    pub const ROTATION_STEP_DEGREES: f32 = 90.0;

    /// Full turn of the capture icon
    pub const CAPTURE_ICON_TURN_DEGREES: f32 = 360.0;
}

/// Preview pipeline settings
pub mod pipeline {
    /// Maximum appsink buffers for the preview
    pub const MAX_BUFFERS: u32 = 2;

    /// Channel depth between the appsink callback and the UI subscription
    pub const PREVIEW_CHANNEL_CAPACITY: usize = 4;
}

/// UI dimensions
pub mod ui {
    /// Capture button size (outer)
    pub const CAPTURE_BUTTON_OUTER: f32 = 72.0;

    /// Capture button size (inner)
    pub const CAPTURE_BUTTON_INNER: f32 = 60.0;

    /// Capture button border radius
    pub const CAPTURE_BUTTON_RADIUS: f32 = 30.0;

    /// Size of the rotating icon shown while a capture is in flight
    pub const CAPTURING_ICON_SIZE: f32 = 80.0;

    /// Round overlay icon button diameter
    pub const OVERLAY_BUTTON_SIZE: f32 = 40.0;

    /// Overlay button/container background transparency (0.0 = transparent, 1.0 = opaque)
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;

    /// White veil shown over the preview while capturing
    pub const CAPTURE_VEIL_ALPHA: f32 = 0.2;

    /// Gallery grid column count
    pub const GALLERY_COLUMNS: usize = 2;

    /// Gallery thumbnail height
    pub const GALLERY_TILE_HEIGHT: f32 = 120.0;

    /// Gallery thumbnail corner radius
    pub const GALLERY_CORNER_RADIUS: f32 = 10.0;

    /// Gallery badge diameter
    pub const BADGE_SIZE: f32 = 18.0;

    /// Opacity of disabled viewer paging buttons
    pub const DISABLED_ALPHA: f32 = 0.5;
}
