// SPDX-License-Identifier: GPL-3.0-only

//! Permission screen view-model
//!
//! Tracks denied permissions waiting for a rationale dialog and asks the
//! router to move on to the camera once camera access is granted.

use crate::app::route::{PopUpTo, Route};
use crate::app::signal::{Delivery, OneShot};
use std::borrow::Cow;
use std::collections::VecDeque;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info};

/// Identifier of a runtime permission
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionId(Cow<'static, str>);

impl PermissionId {
    /// Camera access
    pub const CAMERA: PermissionId = PermissionId(Cow::Borrowed("camera"));

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PermissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input to [`PermissionViewModel::on_event`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionEvent {
    /// Outcome of a permission request
    PermissionResult { id: PermissionId, granted: bool },
    /// The rationale dialog on top of the queue was closed
    DismissRationaleDialog,
    NavigateToCamera,
}

/// One-shot output of the permission screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionSignal {
    Navigate { target: Route, pop_up_to: PopUpTo },
}

/// Permission screen state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionState {
    /// Denied permissions, oldest first; each appears at most once
    pending_rationale: VecDeque<PermissionId>,
}

impl PermissionState {
    /// Permission whose rationale dialog is showing
    pub fn visible_rationale(&self) -> Option<&PermissionId> {
        self.pending_rationale.front()
    }

    pub fn pending_rationale(&self) -> impl ExactSizeIterator<Item = &PermissionId> {
        self.pending_rationale.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending_rationale.len()
    }
}

/// Reducer for the permission screen
#[derive(Debug, Default)]
pub struct PermissionViewModel {
    state: PermissionState,
    signals: OneShot<PermissionSignal>,
}

impl PermissionViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PermissionState {
        &self.state
    }

    /// Observe navigation signals, replacing any previous observer
    pub fn subscribe(&mut self) -> Receiver<PermissionSignal> {
        self.signals.subscribe()
    }

    pub fn on_event(&mut self, event: PermissionEvent) {
        match event {
            PermissionEvent::PermissionResult { id, granted } => {
                if granted {
                    info!(permission = %id, "Permission granted");
                    if id == PermissionId::CAMERA {
                        self.on_event(PermissionEvent::NavigateToCamera);
                    }
                } else if !self.state.pending_rationale.contains(&id) {
                    info!(permission = %id, "Permission denied, queueing rationale");
                    self.state.pending_rationale.push_back(id);
                } else {
                    debug!(permission = %id, "Rationale already queued");
                }
            }
            PermissionEvent::DismissRationaleDialog => {
                if let Some(id) = self.state.pending_rationale.pop_front() {
                    debug!(permission = %id, "Rationale dismissed");
                }
            }
            PermissionEvent::NavigateToCamera => {
                let signal = PermissionSignal::Navigate {
                    target: Route::Camera,
                    pop_up_to: PopUpTo {
                        route: Route::Intro,
                        inclusive: true,
                    },
                };
                if self.signals.emit(signal) == Delivery::Dropped {
                    debug!("Navigation to camera not observed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granted_non_camera_permission_is_ignored() {
        let mut vm = PermissionViewModel::new();
        let mut observer = vm.subscribe();

        vm.on_event(PermissionEvent::PermissionResult {
            id: PermissionId::new("microphone"),
            granted: true,
        });

        assert!(observer.try_recv().is_err());
        assert_eq!(vm.state().pending_len(), 0);
    }

    #[test]
    fn test_dismiss_takes_head() {
        let mut vm = PermissionViewModel::new();
        for id in ["camera", "microphone"] {
            vm.on_event(PermissionEvent::PermissionResult {
                id: PermissionId::new(id),
                granted: false,
            });
        }

        assert_eq!(vm.state().visible_rationale(), Some(&PermissionId::CAMERA));
        vm.on_event(PermissionEvent::DismissRationaleDialog);
        assert_eq!(vm.state().visible_rationale().map(|id| id.as_str()), Some("microphone"));
        vm.on_event(PermissionEvent::DismissRationaleDialog);
        vm.on_event(PermissionEvent::DismissRationaleDialog);
        assert_eq!(vm.state().pending_len(), 0);
    }
}
