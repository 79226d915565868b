// SPDX-License-Identifier: GPL-3.0-only

//! Battery level lookup
//!
//! UPower's display device is asked first, then the kernel's power-supply
//! class. Machines without a battery report 100%.

use std::path::Path;
use tracing::debug;

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Current battery percentage (0-100), read fresh on every call
pub async fn battery_percent() -> u8 {
    match upower_percent().await {
        Ok(Some(percent)) => return percent,
        Ok(None) => debug!("UPower reports no battery"),
        Err(e) => debug!(error = %e, "UPower unavailable"),
    }

    sysfs_percent(Path::new(POWER_SUPPLY_DIR)).unwrap_or(100)
}

async fn upower_percent() -> zbus::Result<Option<u8>> {
    let connection = zbus::Connection::system().await?;
    let device = zbus::Proxy::new(
        &connection,
        "org.freedesktop.UPower",
        "/org/freedesktop/UPower/devices/DisplayDevice",
        "org.freedesktop.UPower.Device",
    )
    .await?;

    let present: bool = device.get_property("IsPresent").await?;
    if !present {
        return Ok(None);
    }

    let percentage: f64 = device.get_property("Percentage").await?;
    Ok(Some(percentage.round().clamp(0.0, 100.0) as u8))
}

/// First `type=Battery` supply under `root` with a readable capacity
pub fn sysfs_percent(root: &Path) -> Option<u8> {
    let entries = std::fs::read_dir(root).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        let kind = std::fs::read_to_string(path.join("type")).unwrap_or_default();
        if kind.trim() != "Battery" {
            continue;
        }
        if let Some(percent) = std::fs::read_to_string(path.join("capacity"))
            .ok()
            .and_then(|s| parse_capacity(&s))
        {
            debug!(supply = %path.display(), percent, "Battery level from sysfs");
            return Some(percent);
        }
    }
    None
}

/// Parse a sysfs `capacity` value, clamped to 0-100
pub fn parse_capacity(raw: &str) -> Option<u8> {
    raw.trim().parse::<u32>().ok().map(|v| v.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("57\n"), Some(57));
        assert_eq!(parse_capacity("140"), Some(100));
        assert_eq!(parse_capacity(""), None);
        assert_eq!(parse_capacity("full"), None);
    }

    #[test]
    fn test_sysfs_battery_scan() {
        let root = std::env::temp_dir().join(format!("shutter-power-{}", uuid::Uuid::new_v4()));
        let mains = root.join("AC");
        let battery = root.join("BAT0");
        std::fs::create_dir_all(&mains).unwrap();
        std::fs::create_dir_all(&battery).unwrap();
        std::fs::write(mains.join("type"), "Mains\n").unwrap();
        std::fs::write(battery.join("type"), "Battery\n").unwrap();
        std::fs::write(battery.join("capacity"), "14\n").unwrap();

        assert_eq!(sysfs_percent(&root), Some(14));
        assert_eq!(sysfs_percent(&root.join("missing")), None);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
