// SPDX-License-Identifier: GPL-3.0-only

//! Viewer handlers
//!
//! Handles paging, rotation and JPEG export of the shown photo.

use crate::app::state::{AppModel, Message};
use crate::errors::PhotoError;
use crate::pipelines::photo::{default_export_dir, save_photo};
use cosmic::Task;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};

impl AppModel {
    // =========================================================================
    // Viewer Handlers
    // =========================================================================

    pub(crate) fn handle_viewer_previous(&mut self) -> Task<cosmic::Action<Message>> {
        if let Some(viewer) = self.viewer.as_mut()
            && viewer.previous()
        {
            self.last_export = None;
        }
        Task::none()
    }

    pub(crate) fn handle_viewer_next(&mut self) -> Task<cosmic::Action<Message>> {
        if let Some(viewer) = self.viewer.as_mut()
            && viewer.next()
        {
            self.last_export = None;
        }
        Task::none()
    }

    pub(crate) fn handle_viewer_rotate(&mut self) -> Task<cosmic::Action<Message>> {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.rotate();
            debug!(target_angle = viewer.target_angle(), "Viewer rotation");
            // Restart the frame clock so the first step is not a huge jump
            self.last_tick = Some(Instant::now());
        }
        Task::none()
    }

    pub(crate) fn handle_viewer_save(&mut self) -> Task<cosmic::Action<Message>> {
        if self.is_exporting {
            return Task::none();
        }
        let Some(photo) = self.viewer.as_ref().and_then(|v| v.current()).cloned() else {
            return Task::none();
        };

        self.is_exporting = true;
        let dir = default_export_dir();
        info!(id = %photo.id(), dir = %dir.display(), "Exporting photo");
        Task::perform(save_photo(photo, dir), |result| {
            cosmic::Action::App(Message::ViewerSaved(result))
        })
    }

    pub(crate) fn handle_viewer_saved(
        &mut self,
        result: Result<PathBuf, PhotoError>,
    ) -> Task<cosmic::Action<Message>> {
        self.is_exporting = false;
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Photo saved");
                self.last_export = Some(path);
            }
            Err(err) => {
                error!(%err, "Failed to save photo");
                self.last_export = None;
            }
        }
        Task::none()
    }
}
