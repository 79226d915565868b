// SPDX-License-Identifier: GPL-3.0-only

//! UI Navigation handlers
//!
//! Handles context pages, the back stack and keyboard shortcuts.

use crate::app::route::Route;
use crate::app::state::{AppModel, ContextPage, KeyAction, Message};
use cosmic::Task;
use std::time::Instant;
use tracing::{debug, error};

impl AppModel {
    // =========================================================================
    // UI Navigation Handlers
    // =========================================================================

    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        match open::that_detached(&url) {
            Ok(()) => {}
            Err(err) => {
                error!(url = %url, error = %err, "Failed to open URL");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_navigate_back(&mut self) -> Task<cosmic::Action<Message>> {
        if self.core.window.show_context {
            self.core.window.show_context = false;
            return Task::none();
        }
        if self.router.pop_back() {
            self.on_route_changed();
        } else {
            debug!("Back pressed on the root screen");
        }
        Task::none()
    }

    pub(crate) fn handle_key(&mut self, action: KeyAction) -> Task<cosmic::Action<Message>> {
        match (action, self.router.current()) {
            (KeyAction::Shutter, Route::Camera) => {
                let busy = self.camera.state().is_capturing();
                if self
                    .key_debouncer
                    .accept_when_idle(Instant::now(), busy)
                {
                    self.handle_capture()
                } else {
                    debug!(busy, "Shutter key ignored");
                    Task::none()
                }
            }
            (KeyAction::Previous, Route::Viewer { .. }) => self.handle_viewer_previous(),
            (KeyAction::Next, Route::Viewer { .. }) => self.handle_viewer_next(),
            (KeyAction::Back, _) => self.handle_navigate_back(),
            _ => Task::none(),
        }
    }

    /// Keep screen observers and screen-local state in line with the router
    pub(crate) fn on_route_changed(&mut self) {
        let current = self.router.current();
        debug!(?current, depth = self.router.depth(), "Route changed");

        if self.router.contains(&Route::Camera) && self.camera_signals.is_none() {
            self.camera_signals = Some(self.camera.subscribe());
        }
        if !self.router.contains(&Route::Intro) {
            self.permission_signals = None;
        }
        if !matches!(current, Route::Viewer { .. }) {
            self.viewer = None;
        }
        if current != Route::Camera {
            self.preview = None;
            self.backend_manager.clear_frame();
        }
    }
}
