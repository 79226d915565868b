// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the permission flow

use shutter::app::permission::{PermissionEvent, PermissionId, PermissionSignal, PermissionViewModel};
use shutter::app::route::{PopUpTo, Route, Router};
use shutter::backends::portal::{StoredAccess, parse_stored_access};
use std::collections::HashMap;

fn denied() -> PermissionEvent {
    PermissionEvent::PermissionResult {
        id: PermissionId::CAMERA,
        granted: false,
    }
}

#[test]
fn test_repeated_denial_queues_one_rationale() {
    let mut vm = PermissionViewModel::new();
    vm.on_event(denied());
    vm.on_event(denied());

    assert_eq!(vm.state().pending_len(), 1);
    assert_eq!(vm.state().visible_rationale(), Some(&PermissionId::CAMERA));
}

#[test]
fn test_grant_navigates_to_camera_replacing_intro() {
    let mut vm = PermissionViewModel::new();
    let mut observer = vm.subscribe();

    vm.on_event(PermissionEvent::PermissionResult {
        id: PermissionId::CAMERA,
        granted: true,
    });

    let signal = observer.try_recv().ok();
    assert_eq!(
        signal,
        Some(PermissionSignal::Navigate {
            target: Route::Camera,
            pop_up_to: PopUpTo {
                route: Route::Intro,
                inclusive: true,
            },
        })
    );

    let mut router = Router::new(Route::Intro);
    if let Some(PermissionSignal::Navigate { target, pop_up_to }) = signal {
        router.navigate(target, Some(pop_up_to));
    }
    assert_eq!(router.current(), Route::Camera);
    assert_eq!(router.depth(), 1);
    assert!(!router.contains(&Route::Intro));
}

#[test]
fn test_navigation_without_observer_is_dropped() {
    let mut vm = PermissionViewModel::new();
    vm.on_event(PermissionEvent::NavigateToCamera);

    // A late observer does not see the earlier signal
    let mut observer = vm.subscribe();
    assert!(observer.try_recv().is_err());
}

#[test]
fn test_dismiss_with_empty_queue_is_noop() {
    let mut vm = PermissionViewModel::new();
    vm.on_event(PermissionEvent::DismissRationaleDialog);
    assert_eq!(vm.state().pending_len(), 0);
    assert!(vm.state().visible_rationale().is_none());
}

#[test]
fn test_denial_after_dismiss_queues_again() {
    let mut vm = PermissionViewModel::new();
    vm.on_event(denied());
    vm.on_event(PermissionEvent::DismissRationaleDialog);
    vm.on_event(denied());
    assert_eq!(vm.state().pending_len(), 1);
}

#[test]
fn test_stored_access_prefers_app_entry() {
    let mut permissions = HashMap::new();
    permissions.insert(String::new(), vec!["yes".to_string()]);
    permissions.insert("io.github.cosmic-utils.shutter".to_string(), vec!["no".to_string()]);

    assert_eq!(
        parse_stored_access(&permissions, "io.github.cosmic-utils.shutter"),
        StoredAccess::Denied
    );
    assert_eq!(
        parse_stored_access(&permissions, "org.example.Other"),
        StoredAccess::Granted
    );
    assert_eq!(
        parse_stored_access(&HashMap::new(), "org.example.Other"),
        StoredAccess::NotDetermined
    );
}
