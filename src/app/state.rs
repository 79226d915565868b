// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::animation::IconSpin;
use crate::app::camera::{CameraSignal, CameraViewModel};
use crate::app::keys::KeyDebouncer;
use crate::app::permission::{PermissionEvent, PermissionSignal, PermissionViewModel};
use crate::app::route::Router;
use crate::app::viewer::ViewerState;
use crate::backends::camera::CameraBackendManager;
use crate::backends::camera::types::CameraFrame;
use crate::backends::portal::StoredAccess;
use crate::config::{AppTheme, Config};
use crate::errors::{PermissionError, PhotoError};
use crate::flash::ScreenBrightness;
use crate::pipelines::photo::{CaptureAdapter, Photo, PhotoId};
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::image::Handle;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::Receiver;

/// Context drawer pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContextPage {
    /// Photos taken this session
    #[default]
    Gallery,
    Settings,
    About,
}

/// Keyboard shortcuts understood by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Volume up/down: take a photo
    Shutter,
    Previous,
    Next,
    /// Browser back key; Escape goes through `on_escape`
    Back,
}

/// Latest preview frame, ready for display
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// Main application model
pub struct AppModel {
    /// Application state managed by the COSMIC runtime
    pub core: cosmic::Core,
    /// Which context drawer page is shown
    pub context_page: ContextPage,
    pub about: About,
    /// Localized labels for the theme dropdown, in `AppTheme::ALL` order
    pub theme_options: Vec<String>,
    pub config: Config,
    pub config_handler: Option<cosmic_config::Config>,

    // ===== Navigation =====
    pub router: Router,

    // ===== Permission screen =====
    pub permission: PermissionViewModel,
    /// Observer of the permission screen's signals while it is on screen
    pub permission_signals: Option<Receiver<PermissionSignal>>,
    /// Stored decision from the permission store, refreshed on every request
    pub stored_access: StoredAccess,

    // ===== Camera screen =====
    pub camera: CameraViewModel,
    /// Observer of the camera screen's signals while it is on screen
    pub camera_signals: Option<Receiver<CameraSignal>>,
    pub backend_manager: CameraBackendManager,
    pub capture_adapter: Arc<dyn CaptureAdapter>,
    pub preview: Option<PreviewImage>,
    pub screen_brightness: Option<ScreenBrightness>,
    pub has_flash_led: bool,
    pub icon_spin: IconSpin,
    pub key_debouncer: KeyDebouncer,

    // ===== Viewer screen =====
    pub viewer: Option<ViewerState>,
    /// An export is running
    pub is_exporting: bool,
    /// Where the last export landed, shown under the viewer
    pub last_export: Option<PathBuf>,

    /// Last animation tick, for spring time steps
    pub last_tick: Option<Instant>,
}

/// Messages emitted by the application and its widgets
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page
    ToggleContextPage(ContextPage),
    /// Back button or Escape
    NavigateBack,
    /// Keyboard shortcut
    Key(KeyAction),

    // ===== Permission =====
    /// Startup grant check finished
    PermissionStatusLoaded(Result<StoredAccess, PermissionError>),
    /// Ask the portal for camera access
    RequestPermission,
    /// Portal answered a request
    PermissionRequestFinished(Result<bool, PermissionError>),
    /// Forward an event to the permission view-model
    Permission(PermissionEvent),
    /// Rationale dialog confirm button
    RationaleConfirm,
    /// Open the system settings to re-enable camera access
    OpenAppSettings,

    // ===== Camera Control =====
    /// New preview frame from the pipeline
    CameraFrame(CameraFrame),
    ToggleCameraFacing,
    CycleFlashMode,
    /// Shutter pressed; reads the battery before triggering
    Capture,
    /// Battery level read for a pending shutter press
    TriggerCapture(u8),
    /// Flash has settled; grab the frame
    StartCapture,
    /// Capture worker finished
    CaptureFinished(Result<Photo, PhotoError>),
    DeletePhoto(PhotoId),
    /// Open the viewer on the given photo
    OpenViewer(usize),

    // ===== Viewer =====
    ViewerPrevious,
    ViewerNext,
    ViewerRotate,
    /// Export the shown photo as JPEG
    ViewerSave,
    ViewerSaved(Result<PathBuf, PhotoError>),

    // ===== System =====
    AnimationTick(Instant),
    UpdateConfig(Config),
    SetTheme(AppTheme),
    SetMirrorFrontPreview(bool),
}
