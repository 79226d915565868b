// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen handlers
//!
//! Handles preview frames, facing, flash mode and the session gallery.

use crate::app::camera::{CameraEvent, CameraSignal};
use crate::app::route::Route;
use crate::app::state::{AppModel, Message, PreviewImage};
use crate::app::viewer::ViewerState;
use crate::backends::camera::types::{CameraFrame, Facing};
use crate::pipelines::photo::PhotoId;
use cosmic::Task;
use cosmic::widget::image::Handle;
use tracing::{debug, info};

impl AppModel {
    // =========================================================================
    // Camera Screen Handlers
    // =========================================================================

    pub(crate) fn handle_camera_frame(&mut self, frame: CameraFrame) -> Task<cosmic::Action<Message>> {
        if self.router.current() != Route::Camera {
            return Task::none();
        }

        let mirror =
            self.camera.state().facing() == Facing::Front && self.config.mirror_front_preview;
        let pixels = if mirror {
            mirror_rows(&frame.data, frame.width as usize)
        } else {
            frame.data.to_vec()
        };

        self.preview = Some(PreviewImage {
            handle: Handle::from_rgba(frame.width, frame.height, pixels),
            width: frame.width,
            height: frame.height,
        });
        self.backend_manager.store_frame(frame);
        Task::none()
    }

    pub(crate) fn handle_toggle_facing(&mut self) -> Task<cosmic::Action<Message>> {
        self.preview = None;
        self.backend_manager.clear_frame();
        self.handle_camera_event(CameraEvent::ToggleCameraFacing)
    }

    pub(crate) fn handle_cycle_flash_mode(&mut self) -> Task<cosmic::Action<Message>> {
        self.handle_camera_event(CameraEvent::CycleFlashMode)
    }

    pub(crate) fn handle_delete_photo(&mut self, id: PhotoId) -> Task<cosmic::Action<Message>> {
        self.handle_camera_event(CameraEvent::DeletePhoto(id))
    }

    pub(crate) fn handle_open_viewer(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let photos = self.camera.state().photos().to_vec();
        if photos.is_empty() {
            debug!("No photos to view");
            return Task::none();
        }

        info!(index, count = photos.len(), "Opening viewer");
        self.core.window.show_context = false;
        let task = self.navigate(Route::Viewer { start_index: index }, None);
        self.viewer = Some(ViewerState::new(photos, index));
        task
    }

    /// Feed the camera view-model and act on what it emits
    pub(crate) fn handle_camera_event(&mut self, event: CameraEvent) -> Task<cosmic::Action<Message>> {
        self.camera.on_event(event);
        self.icon_spin.sync(
            self.camera.state().capture_icon_toggled(),
            self.camera.state().icon_animation(),
            std::time::Instant::now(),
        );
        self.drain_camera_signals()
    }

    pub(crate) fn drain_camera_signals(&mut self) -> Task<cosmic::Action<Message>> {
        let mut tasks = Vec::new();
        while let Some(signal) = self
            .camera_signals
            .as_mut()
            .and_then(|receiver| receiver.try_recv().ok())
        {
            debug!(?signal, "Camera signal");
            match signal {
                CameraSignal::TakePhoto => tasks.push(self.take_photo()),
                CameraSignal::ResetBrightness => self.reset_brightness(),
            }
        }
        Task::batch(tasks)
    }
}

/// Flip each row of a tightly packed RGBA buffer horizontally
fn mirror_rows(data: &[u8], width: usize) -> Vec<u8> {
    let stride = width * 4;
    if stride == 0 {
        return data.to_vec();
    }

    let mut out = Vec::with_capacity(data.len());
    for row in data.chunks_exact(stride) {
        for pixel in row.chunks_exact(4).rev() {
            out.extend_from_slice(pixel);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::mirror_rows;

    #[test]
    fn test_mirror_rows_flips_each_row() {
        let data = [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4];
        let mirrored = mirror_rows(&data, 2);
        assert_eq!(mirrored, vec![2, 2, 2, 2, 1, 1, 1, 1, 4, 4, 4, 4, 3, 3, 3, 3]);
    }
}
