// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the photo viewer and back stack

use image::RgbaImage;
use shutter::app::route::{Route, Router};
use shutter::app::viewer::ViewerState;
use shutter::pipelines::photo::Photo;

fn photos(n: usize) -> Vec<Photo> {
    (0..n).map(|_| Photo::new(RgbaImage::new(2, 2))).collect()
}

#[test]
fn test_paging_within_bounds() {
    let mut viewer = ViewerState::new(photos(5), 2);
    assert!(viewer.shows_paging());
    assert!(viewer.has_previous());

    assert!(viewer.previous());
    assert_eq!(viewer.page(), 1);
    assert!(viewer.previous());
    assert_eq!(viewer.page(), 0);

    assert!(!viewer.has_previous());
    assert!(!viewer.previous());
    assert_eq!(viewer.page(), 0);

    for _ in 0..4 {
        assert!(viewer.next());
    }
    assert_eq!(viewer.page(), 4);
    assert!(!viewer.has_next());
    assert!(!viewer.next());
    assert_eq!(viewer.page(), 4);
}

#[test]
fn test_current_follows_page() {
    let list = photos(3);
    let mut viewer = ViewerState::new(list.clone(), 0);
    assert_eq!(viewer.current().map(|p| p.id()), Some(list[0].id()));
    viewer.next();
    assert_eq!(viewer.current().map(|p| p.id()), Some(list[1].id()));
}

#[test]
fn test_rotation_is_kept_across_pages() {
    let mut viewer = ViewerState::new(photos(2), 0);
    viewer.rotate();
    viewer.next();
    assert_eq!(viewer.target_angle(), 90.0);
}

#[test]
fn test_viewer_route_returns_to_camera() {
    let mut router = Router::new(Route::Camera);
    router.navigate(Route::Viewer { start_index: 3 }, None);
    assert_eq!(router.current(), Route::Viewer { start_index: 3 });

    assert!(router.pop_back());
    assert_eq!(router.current(), Route::Camera);
    assert!(!router.pop_back());
    assert_eq!(router.depth(), 1);
}
