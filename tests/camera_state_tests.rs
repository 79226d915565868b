// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the camera screen state machine

use image::RgbaImage;
use shutter::app::camera::{CameraEvent, CameraSignal, CameraViewModel};
use shutter::backends::camera::types::Facing;
use shutter::flash::FlashMode;
use shutter::pipelines::photo::Photo;

fn photo() -> Photo {
    Photo::new(RgbaImage::new(4, 3))
}

fn front_with_flash_on() -> CameraViewModel {
    let mut vm = CameraViewModel::default();
    vm.on_event(CameraEvent::ToggleCameraFacing);
    vm.on_event(CameraEvent::CycleFlashMode);
    assert_eq!(vm.state().facing(), Facing::Front);
    assert_eq!(vm.state().flash_mode(), FlashMode::On);
    vm
}

#[test]
fn test_flash_mode_cycle_table() {
    let mut vm = CameraViewModel::default();
    assert_eq!(vm.state().flash_mode(), FlashMode::Off);

    let expected = [
        FlashMode::On,
        FlashMode::Auto,
        FlashMode::Off,
        FlashMode::On,
        FlashMode::Auto,
        FlashMode::Off,
    ];
    for mode in expected {
        vm.on_event(CameraEvent::CycleFlashMode);
        assert_eq!(vm.state().flash_mode(), mode);
    }
}

#[test]
fn test_front_flash_battery_boundary() {
    let mut vm = front_with_flash_on();
    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 14 });
    assert!(!vm.state().simulate_front_flash());
    vm.on_event(CameraEvent::CaptureFailed);

    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 15 });
    assert!(vm.state().simulate_front_flash());
}

#[test]
fn test_back_camera_never_simulates_flash() {
    let mut vm = CameraViewModel::default();
    vm.on_event(CameraEvent::CycleFlashMode);
    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 100 });
    assert!(!vm.state().simulate_front_flash());
}

#[test]
fn test_two_captures_restore_flags() {
    let mut vm = CameraViewModel::default();
    let before = (vm.state().is_capturing(), vm.state().capture_icon_toggled());

    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 80 });
    assert!(vm.state().is_capturing());
    assert_ne!(vm.state().capture_icon_toggled(), before.1);
    vm.on_event(CameraEvent::PhotoCaptured(photo()));
    assert!(!vm.state().is_capturing());

    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 80 });
    vm.on_event(CameraEvent::PhotoCaptured(photo()));

    assert_eq!(
        (vm.state().is_capturing(), vm.state().capture_icon_toggled()),
        before
    );
    assert_eq!(vm.state().photos().len(), 2);
}

#[test]
fn test_capture_failed_always_resets() {
    let mut vm = CameraViewModel::default();
    vm.on_event(CameraEvent::CaptureFailed);
    assert!(!vm.state().is_capturing());
    assert!(!vm.state().capture_icon_toggled());

    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 50 });
    vm.on_event(CameraEvent::CaptureFailed);
    assert!(!vm.state().is_capturing());
    assert!(!vm.state().capture_icon_toggled());
    assert!(vm.state().photos().is_empty());
}

#[test]
fn test_double_trigger_flips_back() {
    let mut vm = CameraViewModel::default();
    let mut signals = vm.subscribe();
    let before = (vm.state().is_capturing(), vm.state().capture_icon_toggled());

    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 80 });
    assert_eq!(
        (vm.state().is_capturing(), vm.state().capture_icon_toggled()),
        (true, true)
    );
    assert_eq!(signals.try_recv().ok(), Some(CameraSignal::TakePhoto));

    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 80 });
    assert_eq!(
        (vm.state().is_capturing(), vm.state().capture_icon_toggled()),
        before
    );
    assert_eq!(signals.try_recv().ok(), Some(CameraSignal::TakePhoto));
    assert!(signals.try_recv().is_err());
}

#[test]
fn test_simulated_flash_resets_brightness_once() {
    let mut vm = front_with_flash_on();
    let mut signals = vm.subscribe();

    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 90 });
    assert_eq!(signals.try_recv().ok(), Some(CameraSignal::TakePhoto));

    vm.on_event(CameraEvent::PhotoCaptured(photo()));
    assert_eq!(signals.try_recv().ok(), Some(CameraSignal::ResetBrightness));
    assert!(!vm.state().simulate_front_flash());

    // Without a simulated flash there is nothing to reset
    vm.on_event(CameraEvent::CycleFlashMode);
    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 90 });
    assert_eq!(signals.try_recv().ok(), Some(CameraSignal::TakePhoto));
    vm.on_event(CameraEvent::PhotoCaptured(photo()));
    assert!(signals.try_recv().is_err());
}

#[test]
fn test_failed_simulated_flash_resets_brightness() {
    let mut vm = front_with_flash_on();
    let mut signals = vm.subscribe();

    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 90 });
    assert_eq!(signals.try_recv().ok(), Some(CameraSignal::TakePhoto));

    vm.on_event(CameraEvent::CaptureFailed);
    assert_eq!(signals.try_recv().ok(), Some(CameraSignal::ResetBrightness));
    assert!(!vm.state().simulate_front_flash());
}

#[test]
fn test_trigger_without_observer_still_starts_capture() {
    let mut vm = CameraViewModel::default();
    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 50 });
    assert!(vm.state().is_capturing());
}

#[test]
fn test_delete_photo_keeps_order() {
    let mut vm = CameraViewModel::default();
    let photos: Vec<Photo> = (0..4).map(|_| photo()).collect();
    for p in &photos {
        vm.on_event(CameraEvent::TriggerCapture { battery_percent: 50 });
        vm.on_event(CameraEvent::PhotoCaptured(p.clone()));
    }

    vm.on_event(CameraEvent::DeletePhoto(photos[1].id()));

    let remaining: Vec<_> = vm.state().photos().iter().map(|p| p.id()).collect();
    assert_eq!(
        remaining,
        vec![photos[0].id(), photos[2].id(), photos[3].id()]
    );
}

#[test]
fn test_delete_unknown_photo_is_noop() {
    let mut vm = CameraViewModel::default();
    vm.on_event(CameraEvent::TriggerCapture { battery_percent: 50 });
    vm.on_event(CameraEvent::PhotoCaptured(photo()));

    vm.on_event(CameraEvent::DeletePhoto(photo().id()));
    assert_eq!(vm.state().photos().len(), 1);
}

#[test]
fn test_delete_targets_one_of_identical_captures() {
    let mut vm = CameraViewModel::default();
    let first = photo();
    let second = photo();
    for p in [first.clone(), second.clone()] {
        vm.on_event(CameraEvent::TriggerCapture { battery_percent: 50 });
        vm.on_event(CameraEvent::PhotoCaptured(p));
    }

    vm.on_event(CameraEvent::DeletePhoto(first.id()));
    assert_eq!(vm.state().photos().len(), 1);
    assert_eq!(vm.state().photos()[0].id(), second.id());
}
