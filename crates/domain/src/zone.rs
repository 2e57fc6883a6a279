//! Zone records: the rooms of the floor plan and everything they contain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::DeviceRecord;
use crate::geometry::Placement;
use crate::id::ZoneId;
use crate::lenient;

/// A zone as loaded from and saved to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub id: ZoneId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub display: ZoneDisplay,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub devices: Vec<DeviceRecord>,
}

/// Geometry, stacking order and floor texture of a zone, plus its static
/// children. Child collections keep their on-screen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDisplay {
    #[serde(deserialize_with = "lenient::int")]
    pub x: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub y: i32,
    #[serde(rename = "z-index", deserialize_with = "lenient::int")]
    pub z_index: i32,
    #[serde(deserialize_with = "lenient::int")]
    pub rotation: i32,
    #[serde(deserialize_with = "lenient::size")]
    pub width: u32,
    #[serde(deserialize_with = "lenient::size")]
    pub height: u32,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub texture: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub walls: Vec<Placement>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub construction: Vec<Placement>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub deco: Vec<Placement>,
}

impl ZoneDisplay {
    /// Bare geometry with no texture and no children.
    #[must_use]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }
}

/// Body of the save request: every zone keyed by its id.
#[must_use]
pub fn save_body(zones: &[ZoneRecord]) -> BTreeMap<String, &ZoneRecord> {
    zones
        .iter()
        .map(|zone| (zone.id.to_string(), zone))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::DeviceId;

    const LOADED: &str = r#"[{
        "id": 1,
        "name": "Kitchen",
        "display": {
            "x": "120", "y": 80, "z-index": "auto", "rotation": 0,
            "width": 200, "height": 150, "texture": "floor-3",
            "walls": [{"x": 0, "y": 0, "rotation": 90, "width": 25, "height": 75}],
            "deco": [{"x": 10, "y": 10, "rotation": 0, "width": 50, "height": 50, "texture": "deco-4"}]
        },
        "devices": [{"id": 7, "deviceType": "Lamp", "skill": "Lights",
                     "display": {"x": 5, "y": 5, "rotation": 0, "width": 50, "height": 50}}]
    }, {
        "id": "2", "name": "Hall", "display": null
    }]"#;

    #[test]
    fn should_load_zones_with_missing_collections() {
        let zones: Vec<ZoneRecord> = serde_json::from_str(LOADED).unwrap();
        assert_eq!(zones.len(), 2);
        let kitchen = &zones[0];
        assert_eq!(kitchen.display.x, 120);
        assert_eq!(kitchen.display.z_index, 0);
        assert_eq!(kitchen.display.texture.as_deref(), Some("floor-3"));
        assert_eq!(kitchen.display.walls.len(), 1);
        assert!(kitchen.display.construction.is_empty());
        assert_eq!(kitchen.devices[0].id, DeviceId::new(7));
        let hall = &zones[1];
        assert_eq!(hall.id, ZoneId::new(2));
        assert_eq!(hall.display, ZoneDisplay::default());
        assert!(hall.devices.is_empty());
    }

    #[test]
    fn should_serialize_z_index_with_wire_name() {
        let display = ZoneDisplay {
            z_index: 3,
            ..ZoneDisplay::new(0, 0, 100, 100)
        };
        let json = serde_json::to_value(&display).unwrap();
        assert_eq!(json["z-index"], 3);
        assert!(json["walls"].as_array().unwrap().is_empty());
    }

    #[test]
    fn should_key_save_body_by_zone_id() {
        let zones: Vec<ZoneRecord> = serde_json::from_str(LOADED).unwrap();
        let body = serde_json::to_value(save_body(&zones)).unwrap();
        assert_eq!(body["1"]["name"], "Kitchen");
        assert_eq!(body["2"]["name"], "Hall");
    }
}
