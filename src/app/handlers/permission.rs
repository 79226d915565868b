// SPDX-License-Identifier: GPL-3.0-only

//! Permission handlers
//!
//! Handles the startup grant check, portal requests, the rationale dialog
//! and the permission screen's navigation signal.

use crate::app::permission::{PermissionEvent, PermissionId, PermissionSignal};
use crate::app::route::{PopUpTo, Route};
use crate::app::state::{AppModel, Message};
use crate::backends::portal::{self, StoredAccess};
use crate::errors::PermissionError;
use cosmic::{Application, Task};
use tracing::{debug, info, warn};

impl AppModel {
    // =========================================================================
    // Permission Handlers
    // =========================================================================

    /// Look up the stored camera decision in the background
    pub(crate) fn load_permission_status(app_id: &'static str) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                if portal::is_camera_present().await == Some(false) {
                    warn!("Portal reports no camera present");
                }
                portal::stored_camera_access(app_id).await
            },
            |result| cosmic::Action::App(Message::PermissionStatusLoaded(result)),
        )
    }

    pub(crate) fn handle_permission_status(
        &mut self,
        result: Result<StoredAccess, PermissionError>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(access) => {
                info!(?access, "Stored camera permission");
                self.stored_access = access;
                if access == StoredAccess::Granted {
                    return self.handle_permission_event(PermissionEvent::NavigateToCamera);
                }
            }
            Err(PermissionError::PortalUnavailable(reason)) => {
                info!(%reason, "No camera portal, continuing without a permission check");
                return self.handle_permission_event(PermissionEvent::NavigateToCamera);
            }
            Err(err) => {
                warn!(%err, "Failed to read stored camera permission");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_request_permission(&mut self) -> Task<cosmic::Action<Message>> {
        info!("Requesting camera access");
        Task::perform(portal::request_camera_access(), |result| {
            cosmic::Action::App(Message::PermissionRequestFinished(result))
        })
    }

    pub(crate) fn handle_permission_request_finished(
        &mut self,
        result: Result<bool, PermissionError>,
    ) -> Task<cosmic::Action<Message>> {
        let granted = match result {
            Ok(granted) => granted,
            Err(PermissionError::PortalUnavailable(reason)) => {
                info!(%reason, "No camera portal, treating access as granted");
                true
            }
            Err(err) => {
                warn!(%err, "Camera access request failed");
                false
            }
        };

        let event = self.handle_permission_event(PermissionEvent::PermissionResult {
            id: PermissionId::CAMERA,
            granted,
        });

        // Refresh so the rationale dialog knows whether asking again can work
        let refresh = if granted {
            self.stored_access = StoredAccess::Granted;
            Task::none()
        } else {
            Task::perform(portal::stored_camera_access(Self::APP_ID), |result| {
                cosmic::Action::App(Message::PermissionStatusLoaded(result))
            })
        };

        Task::batch([event, refresh])
    }

    pub(crate) fn handle_permission_event(
        &mut self,
        event: PermissionEvent,
    ) -> Task<cosmic::Action<Message>> {
        self.permission.on_event(event);
        self.drain_permission_signals()
    }

    /// Confirm on the rationale dialog: ask again, or send the user to the
    /// settings when the decision is permanent
    pub(crate) fn handle_rationale_confirm(&mut self) -> Task<cosmic::Action<Message>> {
        let dismiss = self.handle_permission_event(PermissionEvent::DismissRationaleDialog);
        if self.stored_access == StoredAccess::Denied {
            return Task::batch([dismiss, self.handle_open_app_settings()]);
        }
        Task::batch([dismiss, self.handle_request_permission()])
    }

    pub(crate) fn handle_open_app_settings(&self) -> Task<cosmic::Action<Message>> {
        portal::open_app_settings();
        Task::none()
    }

    /// Act on everything the permission screen has emitted
    pub(crate) fn drain_permission_signals(&mut self) -> Task<cosmic::Action<Message>> {
        let mut tasks = Vec::new();
        while let Some(signal) = self
            .permission_signals
            .as_mut()
            .and_then(|receiver| receiver.try_recv().ok())
        {
            match signal {
                PermissionSignal::Navigate { target, pop_up_to } => {
                    debug!(?target, "Permission screen navigation");
                    tasks.push(self.navigate(target, Some(pop_up_to)));
                }
            }
        }
        Task::batch(tasks)
    }

    /// Move the router and swap screen observers
    pub(crate) fn navigate(
        &mut self,
        target: Route,
        pop_up_to: Option<PopUpTo>,
    ) -> Task<cosmic::Action<Message>> {
        self.router.navigate(target, pop_up_to);
        self.on_route_changed();
        Task::none()
    }
}
