// SPDX-License-Identifier: GPL-3.0-only

//! Camera permission via the XDG desktop portal
//!
//! `org.freedesktop.portal.Camera` shows the system permission dialog; the
//! permission store remembers the user's answer. Native installs without a
//! portal on the session bus get direct device access, which callers treat
//! as granted.

use crate::errors::PermissionError;
use futures::StreamExt;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

const PORTAL_DESTINATION: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_INTERFACE: &str = "org.freedesktop.portal.Camera";
const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";

const STORE_DESTINATION: &str = "org.freedesktop.impl.portal.PermissionStore";
const STORE_PATH: &str = "/org/freedesktop/impl/portal/PermissionStore";

/// What the permission store remembers about camera access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredAccess {
    /// Access was granted earlier
    Granted,
    /// The user declined; the portal will not ask again
    Denied,
    /// No answer recorded yet
    NotDetermined,
}

/// Ask the portal for camera access, showing the system dialog if needed
///
/// Returns whether access was granted. `PortalUnavailable` means there is
/// no portal to ask.
pub async fn request_camera_access() -> Result<bool, PermissionError> {
    let connection = zbus::Connection::session()
        .await
        .map_err(|e| PermissionError::PortalUnavailable(e.to_string()))?;

    let portal = zbus::Proxy::new(&connection, PORTAL_DESTINATION, PORTAL_PATH, CAMERA_INTERFACE)
        .await
        .map_err(classify)?;

    // Subscribe on the predicted request path before calling, so a fast
    // answer cannot slip past us
    let token = format!("shutter_{}", uuid::Uuid::new_v4().simple());
    let sender = connection
        .unique_name()
        .map(|name| name.as_str().trim_start_matches(':').replace('.', "_"))
        .ok_or_else(|| PermissionError::RequestFailed("No unique bus name".into()))?;
    let request_path = format!("{}/request/{}/{}", PORTAL_PATH, sender, token);

    let request = zbus::Proxy::new(
        &connection,
        PORTAL_DESTINATION,
        request_path.as_str(),
        REQUEST_INTERFACE,
    )
    .await?;
    let mut responses = request.receive_signal("Response").await?;

    let mut options: HashMap<&str, Value> = HashMap::new();
    options.insert("handle_token", Value::new(token.as_str()));

    let handle: OwnedObjectPath = portal
        .call("AccessCamera", &(options,))
        .await
        .map_err(classify)?;
    debug!(handle = %handle, "Camera access requested");

    let message = responses
        .next()
        .await
        .ok_or_else(|| PermissionError::RequestFailed("Request closed without a response".into()))?;
    let (code, _results): (u32, HashMap<String, OwnedValue>) = message.body().deserialize()?;

    let granted = code == 0;
    info!(granted, code, "Camera access response");
    Ok(granted)
}

/// Look up the stored camera decision for `app_id`
///
/// Native apps are stored under the empty app id, so both are checked.
pub async fn stored_camera_access(app_id: &str) -> Result<StoredAccess, PermissionError> {
    let connection = zbus::Connection::session()
        .await
        .map_err(|e| PermissionError::PortalUnavailable(e.to_string()))?;

    let store = zbus::Proxy::new(&connection, STORE_DESTINATION, STORE_PATH, STORE_DESTINATION)
        .await
        .map_err(classify)?;

    let result: Result<(HashMap<String, Vec<String>>, OwnedValue), _> =
        store.call("Lookup", &("devices", "camera")).await;

    match result {
        Ok((permissions, _data)) => Ok(parse_stored_access(&permissions, app_id)),
        Err(e) => match classify(e) {
            PermissionError::PortalUnavailable(msg) => Err(PermissionError::PortalUnavailable(msg)),
            // A missing table just means nothing was recorded yet
            PermissionError::RequestFailed(msg) => {
                debug!(error = %msg, "No stored camera permission");
                Ok(StoredAccess::NotDetermined)
            }
        },
    }
}

/// Whether the portal reports any camera at all
pub async fn is_camera_present() -> Option<bool> {
    let connection = zbus::Connection::session().await.ok()?;
    let portal = zbus::Proxy::new(&connection, PORTAL_DESTINATION, PORTAL_PATH, CAMERA_INTERFACE)
        .await
        .ok()?;
    match portal.get_property::<bool>("IsCameraPresent").await {
        Ok(present) => Some(present),
        Err(e) => {
            debug!(error = %e, "IsCameraPresent unavailable");
            None
        }
    }
}

/// Open the desktop settings so the user can re-enable camera access
pub fn open_app_settings() {
    match std::process::Command::new("cosmic-settings").spawn() {
        Ok(_) => info!("Opened system settings"),
        Err(e) => {
            debug!(error = %e, "cosmic-settings not available, trying settings URI");
            if let Err(e) = open::that_detached("settings://") {
                warn!(error = %e, "Failed to open system settings");
            }
        }
    }
}

/// Reduce a permission-store table to a decision for `app_id`
pub fn parse_stored_access(permissions: &HashMap<String, Vec<String>>, app_id: &str) -> StoredAccess {
    let entry = permissions
        .get(app_id)
        .or_else(|| permissions.get(""));

    match entry.and_then(|values| values.first()).map(String::as_str) {
        Some("yes") => StoredAccess::Granted,
        Some("no") => StoredAccess::Denied,
        _ => StoredAccess::NotDetermined,
    }
}

/// Separate "nobody is listening" from real request failures
fn classify(err: zbus::Error) -> PermissionError {
    const MISSING: [&str; 3] = [
        "org.freedesktop.DBus.Error.ServiceUnknown",
        "org.freedesktop.DBus.Error.UnknownMethod",
        "org.freedesktop.DBus.Error.UnknownInterface",
    ];

    let missing = match &err {
        zbus::Error::MethodError(name, _, _) => MISSING.contains(&name.as_str()),
        zbus::Error::FDO(fdo) => matches!(
            **fdo,
            zbus::fdo::Error::ServiceUnknown(_)
                | zbus::fdo::Error::UnknownMethod(_)
                | zbus::fdo::Error::UnknownInterface(_)
        ),
        _ => false,
    };

    if missing {
        PermissionError::PortalUnavailable(err.to_string())
    } else {
        PermissionError::RequestFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(app, value)| (app.to_string(), vec![value.to_string()]))
            .collect()
    }

    #[test]
    fn test_stored_access_for_app() {
        let permissions = table(&[("io.example.app", "no")]);
        assert_eq!(parse_stored_access(&permissions, "io.example.app"), StoredAccess::Denied);
        assert_eq!(parse_stored_access(&permissions, "other"), StoredAccess::NotDetermined);
    }

    #[test]
    fn test_stored_access_native_fallback() {
        let permissions = table(&[("", "yes")]);
        assert_eq!(parse_stored_access(&permissions, "io.example.app"), StoredAccess::Granted);
        assert_eq!(parse_stored_access(&HashMap::new(), ""), StoredAccess::NotDetermined);
    }
}
