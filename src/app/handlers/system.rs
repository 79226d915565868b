// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Handles animation ticks and settings.

use crate::app::state::{AppModel, Message};
use crate::config::{AppTheme, Config};
use crate::constants::timing;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use std::time::{Duration, Instant};
use tracing::{error, info};

impl AppModel {
    // =========================================================================
    // Animation Handlers
    // =========================================================================

    pub(crate) fn handle_animation_tick(&mut self, now: Instant) -> Task<cosmic::Action<Message>> {
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(timing::ANIMATION_FRAME)
            // Long gaps (suspended window) would otherwise fling the spring
            .min(Duration::from_millis(100));

        if let Some(viewer) = self.viewer.as_mut() {
            viewer.tick(dt.as_secs_f32());
        }
        self.icon_spin.tick(now);

        self.last_tick = self.is_animating(now).then_some(now);
        Task::none()
    }

    /// Whether anything on screen still needs animation ticks
    pub(crate) fn is_animating(&self, now: Instant) -> bool {
        self.icon_spin.is_animating(now)
            || self.viewer.as_ref().is_some_and(|viewer| viewer.is_animating())
    }

    // =========================================================================
    // Settings Handlers
    // =========================================================================

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        let capture_changed = config.backend != self.config.backend
            || config.front_camera_path != self.config.front_camera_path
            || config.back_camera_path != self.config.back_camera_path
            || config.output_size() != self.config.output_size();

        self.config = config;
        self.apply_config();
        if capture_changed {
            info!("Capture settings changed, rebuilding capture pipeline");
            self.rebuild_capture_pipeline();
        }
        Task::none()
    }

    /// Push config values into the long-lived helpers
    pub(crate) fn apply_config(&mut self) {
        self.key_debouncer
            .set_window(Duration::from_millis(self.config.key_debounce_ms));
        self.camera
            .set_front_flash_min_battery(self.config.front_flash_threshold());
    }

    pub(crate) fn rebuild_capture_pipeline(&mut self) {
        let (manager, adapter, has_flash_led) = crate::app::capture_stack(&self.config);
        self.backend_manager = manager;
        self.capture_adapter = adapter;
        self.has_flash_led = has_flash_led;
        self.preview = None;
    }

    pub(crate) fn handle_set_theme(&mut self, app_theme: AppTheme) -> Task<cosmic::Action<Message>> {
        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;

        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save app theme setting");
        }

        cosmic::command::set_theme(app_theme.theme())
    }

    pub(crate) fn handle_set_mirror_front_preview(
        &mut self,
        mirror: bool,
    ) -> Task<cosmic::Action<Message>> {
        info!(mirror, "Setting front preview mirroring");
        self.config.mirror_front_preview = mirror;

        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save mirror setting");
        }
        Task::none()
    }
}
