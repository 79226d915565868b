// SPDX-License-Identifier: GPL-3.0-only

//! Full-screen viewer state
//!
//! A pager over a snapshot of the session's photos plus a free rotation
//! that accumulates a quarter turn per tap.

use crate::app::animation::Spring;
use crate::constants::animation;
use crate::pipelines::photo::Photo;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ViewerState {
    photos: Vec<Photo>,
    page: usize,
    rotation: Spring,
}

impl ViewerState {
    /// Open on `start_index`, clamped into range
    pub fn new(photos: Vec<Photo>, start_index: usize) -> Self {
        let page = start_index.min(photos.len().saturating_sub(1));
        Self {
            photos,
            page,
            rotation: Spring::rotation(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn current(&self) -> Option<&Photo> {
        self.photos.get(self.page)
    }

    /// Paging buttons are only shown with more than one photo
    pub fn shows_paging(&self) -> bool {
        self.photos.len() > 1
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.photos.len()
    }

    /// Returns false at the first page
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        debug!(page = self.page, "Viewer page");
        true
    }

    /// Returns false at the last page
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        debug!(page = self.page, "Viewer page");
        true
    }

    /// Add a quarter turn to the rotation target
    pub fn rotate(&mut self) {
        let target = self.rotation.target() + animation::ROTATION_STEP_DEGREES;
        self.rotation.set_target(target);
    }

    /// Displayed angle in degrees
    pub fn angle(&self) -> f32 {
        self.rotation.value()
    }

    pub fn target_angle(&self) -> f32 {
        self.rotation.target()
    }

    pub fn is_animating(&self) -> bool {
        !self.rotation.is_settled()
    }

    /// Advance the rotation spring by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.rotation.step(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn photos(n: usize) -> Vec<Photo> {
        (0..n).map(|_| Photo::new(RgbaImage::new(1, 1))).collect()
    }

    #[test]
    fn test_start_index_is_clamped() {
        assert_eq!(ViewerState::new(photos(3), 10).page(), 2);
        let empty = ViewerState::new(Vec::new(), 4);
        assert_eq!(empty.page(), 0);
        assert!(empty.current().is_none());
        assert!(!empty.has_next());
    }

    #[test]
    fn test_single_photo_hides_paging() {
        let viewer = ViewerState::new(photos(1), 0);
        assert!(!viewer.shows_paging());
    }

    #[test]
    fn test_rotation_accumulates_unbounded() {
        let mut viewer = ViewerState::new(photos(1), 0);
        for _ in 0..5 {
            viewer.rotate();
        }
        assert_eq!(viewer.target_angle(), 450.0);
        assert!(viewer.is_animating());

        for _ in 0..600 {
            viewer.tick(1.0 / 60.0);
        }
        assert_eq!(viewer.angle(), 450.0);
        assert!(!viewer.is_animating());
    }
}
