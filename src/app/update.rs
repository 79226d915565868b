// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher; the handlers live in
//! the `handlers` submodules, grouped by screen.
//!
//! # Handler Modules
//!
//! - `handlers::permission`: grant check, portal requests, rationale dialog
//! - `handlers::camera`: preview frames, facing, flash mode, gallery
//! - `handlers::capture`: shutter, front flash, capture results
//! - `handlers::viewer`: paging, rotation, export
//! - `handlers::ui`: navigation, context drawer, keys, route changes
//! - `handlers::system`: animation ticks, config, theme

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::NavigateBack => self.handle_navigate_back(),
            Message::Key(action) => self.handle_key(action),

            // ===== Permission =====
            Message::PermissionStatusLoaded(result) => self.handle_permission_status(result),
            Message::RequestPermission => self.handle_request_permission(),
            Message::PermissionRequestFinished(result) => self.handle_permission_request_finished(result),
            Message::Permission(event) => self.handle_permission_event(event),
            Message::RationaleConfirm => self.handle_rationale_confirm(),
            Message::OpenAppSettings => self.handle_open_app_settings(),

            // ===== Camera Control =====
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::ToggleCameraFacing => self.handle_toggle_facing(),
            Message::CycleFlashMode => self.handle_cycle_flash_mode(),
            Message::DeletePhoto(id) => self.handle_delete_photo(id),
            Message::OpenViewer(index) => self.handle_open_viewer(index),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::TriggerCapture(battery) => self.handle_trigger_capture(battery),
            Message::StartCapture => self.handle_start_capture(),
            Message::CaptureFinished(result) => self.handle_capture_finished(result),

            // ===== Viewer =====
            Message::ViewerPrevious => self.handle_viewer_previous(),
            Message::ViewerNext => self.handle_viewer_next(),
            Message::ViewerRotate => self.handle_viewer_rotate(),
            Message::ViewerSave => self.handle_viewer_save(),
            Message::ViewerSaved(result) => self.handle_viewer_saved(result),

            // ===== System =====
            Message::AnimationTick(now) => self.handle_animation_tick(now),
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetTheme(theme) => self.handle_set_theme(theme),
            Message::SetMirrorFrontPreview(mirror) => self.handle_set_mirror_front_preview(mirror),
        }
    }
}
