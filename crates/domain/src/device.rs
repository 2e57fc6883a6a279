//! Device records, device types and zone links.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Placement;
use crate::id::{DeviceId, DeviceTypeId, ZoneId};
use crate::lenient;

/// A device as stored inside its parent zone.
///
/// `id` is stable across zone moves; only the containing zone changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub id: DeviceId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub uid: Option<String>,
    #[serde(
        rename = "deviceTypeID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_type_id: Option<DeviceTypeId>,
    #[serde(rename = "deviceType", default)]
    pub device_type: String,
    #[serde(default)]
    pub skill: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub display: Placement,
}

impl DeviceRecord {
    /// Whether a physical unit has been paired with this device.
    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.uid.is_some()
    }
}

/// A device type offered by an installed skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: DeviceTypeId,
    pub skill: String,
    #[serde(rename = "deviceType")]
    pub device_type: String,
}

/// Response of a successful add-device request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstalledDevice {
    pub id: DeviceId,
    #[serde(default)]
    pub skill: String,
    #[serde(rename = "deviceType", default)]
    pub device_type: String,
}

/// Visibility link between a device and a zone other than its home zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLink {
    #[serde(rename = "deviceID", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceId>,
    #[serde(rename = "locationID")]
    pub location_id: ZoneId,
}

/// Result of toggling a device in display mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToggleOutcome {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub href: Option<String>,
}

/// Free-form device settings, rendered as a key/value form.
pub type DeviceSettings = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_device_with_loose_fields() {
        let json = r#"{
            "id": "7",
            "uid": "undefined",
            "deviceTypeID": 3,
            "deviceType": "Lamp",
            "skill": "Lights",
            "display": {"x": "55px", "y": 20, "rotation": 90, "width": 50, "height": 50}
        }"#;
        let device: DeviceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, DeviceId::new(7));
        assert!(!device.is_paired());
        assert_eq!(device.device_type_id, Some(DeviceTypeId::new(3)));
        assert_eq!(device.display.x, 55);
        assert_eq!(device.display.rotation, 90);
    }

    #[test]
    fn should_default_null_display() {
        let json = r#"{"id": 1, "deviceType": "Switch", "skill": "Home", "display": null}"#;
        let device: DeviceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(device.display, Placement::default());
    }

    #[test]
    fn should_read_links_with_wire_names() {
        let links: Vec<DeviceLink> =
            serde_json::from_str(r#"[{"deviceID": 3, "locationID": "2"}]"#).unwrap();
        assert_eq!(links[0].device_id, Some(DeviceId::new(3)));
        assert_eq!(links[0].location_id, ZoneId::new(2));
    }

    #[test]
    fn should_read_toggle_without_href() {
        let outcome: ToggleOutcome = serde_json::from_str("{}").unwrap();
        assert_eq!(outcome.href, None);
    }
}
