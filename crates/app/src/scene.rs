//! Live scene graph of the floor plan.
//!
//! Zones sit at the root in stacking-list order and own their walls,
//! construction pieces, decorations and devices. Every node carries an opaque
//! [`NodeId`] the surface uses to address it. Geometry is stored the way the
//! page renders it (position, size and a transform) and read back through
//! [`angle_from_transform`] when the scene is serialized for saving.

use std::fmt;

use myhome_domain::device::DeviceRecord;
use myhome_domain::error::{MyHomeError, NotFoundError};
use myhome_domain::geometry::{
    Placement, Transform, angle_from_transform, snap_angle, snap_position,
};
use myhome_domain::id::{DeviceId, DeviceTypeId, ZoneId};
use myhome_domain::time::cache_bust;
use myhome_domain::zone::{ZoneDisplay, ZoneRecord};

/// Opaque handle of a live node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Zone,
    Wall,
    Construction,
    Decoration,
    Device,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zone => "Zone",
            Self::Wall => "Wall",
            Self::Construction => "Construction",
            Self::Decoration => "Decoration",
            Self::Device => "Device",
        })
    }
}

/// Rendered geometry of a node.
///
/// `transform` is `None` for an unrotated node, like a computed CSS
/// `transform: none`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub transform: Option<Transform>,
}

impl Frame {
    /// Frame with position and rotation snapped.
    #[must_use]
    pub fn new(x: i32, y: i32, rotation: i32, width: u32, height: u32) -> Self {
        let (x, y) = snap_position(x, y);
        Self {
            x,
            y,
            width,
            height,
            transform: rotation_transform(rotation),
        }
    }

    /// Rotation read back from the transform.
    #[must_use]
    pub fn rotation(&self) -> i32 {
        angle_from_transform(self.transform.as_ref())
    }

    fn to_placement(&self, texture: Option<String>) -> Placement {
        Placement {
            x: self.x,
            y: self.y,
            rotation: self.rotation(),
            width: self.width,
            height: self.height,
            texture,
        }
    }
}

impl From<&Placement> for Frame {
    fn from(placement: &Placement) -> Self {
        Self::new(
            placement.x,
            placement.y,
            placement.rotation,
            placement.width,
            placement.height,
        )
    }
}

fn rotation_transform(degrees: i32) -> Option<Transform> {
    match snap_angle(degrees) {
        0 => None,
        snapped => Some(Transform::rotation(snapped)),
    }
}

/// A wall, construction piece or decoration.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub node: NodeId,
    pub frame: Frame,
    pub texture: Option<String>,
}

impl Piece {
    fn record(&self) -> Placement {
        self.frame.to_placement(self.texture.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceNode {
    pub node: NodeId,
    pub id: DeviceId,
    pub uid: Option<String>,
    pub device_type_id: Option<DeviceTypeId>,
    pub device_type: String,
    pub skill: String,
    pub name: Option<String>,
    pub frame: Frame,
    /// Cache-busting stamp of the rendered icon.
    pub icon_stamp: i64,
}

impl DeviceNode {
    /// Icon URL relative to the `myhome/` page.
    #[must_use]
    pub fn icon_url(&self) -> String {
        format!("Device/{}/icon?random={}", self.id, self.icon_stamp)
    }

    /// Name shown in dialogs: the device name, or its type.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.device_type)
    }

    fn record(&self) -> DeviceRecord {
        DeviceRecord {
            id: self.id,
            uid: self.uid.clone(),
            device_type_id: self.device_type_id,
            device_type: self.device_type.clone(),
            skill: self.skill.clone(),
            name: self.name.clone(),
            display: self.frame.to_placement(None),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneNode {
    pub node: NodeId,
    pub id: ZoneId,
    pub name: String,
    pub frame: Frame,
    pub z_index: i32,
    pub texture: Option<String>,
    pub walls: Vec<Piece>,
    pub construction: Vec<Piece>,
    pub deco: Vec<Piece>,
    pub devices: Vec<DeviceNode>,
}

impl ZoneNode {
    fn pieces(&self, kind: NodeKind) -> Option<&Vec<Piece>> {
        match kind {
            NodeKind::Wall => Some(&self.walls),
            NodeKind::Construction => Some(&self.construction),
            NodeKind::Decoration => Some(&self.deco),
            NodeKind::Zone | NodeKind::Device => None,
        }
    }

    fn pieces_mut(&mut self, kind: NodeKind) -> Option<&mut Vec<Piece>> {
        match kind {
            NodeKind::Wall => Some(&mut self.walls),
            NodeKind::Construction => Some(&mut self.construction),
            NodeKind::Decoration => Some(&mut self.deco),
            NodeKind::Zone | NodeKind::Device => None,
        }
    }

    fn record(&self) -> ZoneRecord {
        ZoneRecord {
            id: self.id,
            name: self.name.clone(),
            display: ZoneDisplay {
                x: self.frame.x,
                y: self.frame.y,
                z_index: self.z_index,
                rotation: self.frame.rotation(),
                width: self.frame.width,
                height: self.frame.height,
                texture: self.texture.clone(),
                walls: self.walls.iter().map(Piece::record).collect(),
                construction: self.construction.iter().map(Piece::record).collect(),
                deco: self.deco.iter().map(Piece::record).collect(),
            },
            devices: self.devices.iter().map(DeviceNode::record).collect(),
        }
    }
}

/// Where a node lives: indexes into the zone list and child collections.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Zone(usize),
    Piece(usize, NodeKind, usize),
    Device(usize, usize),
}

impl Slot {
    fn zone_index(self) -> usize {
        match self {
            Self::Zone(zone) | Self::Piece(zone, _, _) | Self::Device(zone, _) => zone,
        }
    }
}

const PIECE_KINDS: [NodeKind; 3] = [NodeKind::Wall, NodeKind::Construction, NodeKind::Decoration];

/// The live floor plan.
#[derive(Debug, Default)]
pub struct Scene {
    zones: Vec<ZoneNode>,
    next_node: u32,
}

impl Scene {
    /// Instantiate every zone and its children from persisted records, in the
    /// order supplied. Stored geometry is snapped on the way in.
    #[must_use]
    pub fn build(records: Vec<ZoneRecord>) -> Self {
        let mut scene = Self::default();
        for record in records {
            scene.insert_record(record);
        }
        tracing::debug!(zones = scene.zones.len(), "scene built");
        scene
    }

    /// Read the live tree back into persisted records, in current order.
    #[must_use]
    pub fn serialize(&self) -> Vec<ZoneRecord> {
        self.zones.iter().map(ZoneNode::record).collect()
    }

    /// Refresh the icon of `device` after a status change.
    ///
    /// Only the cache-busting stamp changes; geometry and membership are left
    /// alone. Returns `false` when the device is not in the scene.
    pub fn patch_device_status(&mut self, device: DeviceId) -> bool {
        let Some(node) = self
            .zones
            .iter_mut()
            .flat_map(|zone| zone.devices.iter_mut())
            .find(|node| node.id == device)
        else {
            return false;
        };
        node.icon_stamp = cache_bust(node.icon_stamp);
        true
    }

    /// Append a new zone on top of the stack.
    pub fn attach_zone(&mut self, id: ZoneId, name: impl Into<String>, display: ZoneDisplay) -> NodeId {
        self.insert_record(ZoneRecord {
            id,
            name: name.into(),
            display,
            devices: Vec::new(),
        })
    }

    /// Insert a wall, construction piece or decoration into `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] if `zone` is not a zone node or
    /// `kind` is not a piece kind.
    pub fn add_piece(
        &mut self,
        zone: NodeId,
        kind: NodeKind,
        placement: &Placement,
    ) -> Result<NodeId, MyHomeError> {
        let index = self.zone_index(zone)?;
        let node = self.next_id();
        let pieces = self.zones[index]
            .pieces_mut(kind)
            .ok_or_else(|| not_found("Piece collection", kind))?;
        pieces.push(Piece {
            node,
            frame: Frame::from(placement),
            texture: placement.texture.clone(),
        });
        Ok(node)
    }

    /// Insert a device into `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] if `zone` is not a zone node.
    pub fn add_device(&mut self, zone: NodeId, record: DeviceRecord) -> Result<NodeId, MyHomeError> {
        let index = self.zone_index(zone)?;
        let device = self.device_node(record);
        let node = device.node;
        self.zones[index].devices.push(device);
        Ok(node)
    }

    /// Remove a node and, for zones, everything it contains.
    pub fn remove(&mut self, node: NodeId) -> bool {
        let Some(slot) = self.slot(node) else {
            return false;
        };
        match slot {
            Slot::Zone(zone) => {
                self.zones.remove(zone);
            }
            Slot::Piece(zone, kind, index) => {
                if let Some(pieces) = self.zones[zone].pieces_mut(kind) {
                    pieces.remove(index);
                }
            }
            Slot::Device(zone, index) => {
                self.zones[zone].devices.remove(index);
            }
        }
        true
    }

    /// Move a node, snapping to the grid. Returns the snapped position.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] if the node does not exist.
    pub fn move_node(&mut self, node: NodeId, x: i32, y: i32) -> Result<(i32, i32), MyHomeError> {
        let frame = self.frame_mut(node)?;
        (frame.x, frame.y) = snap_position(x, y);
        Ok((frame.x, frame.y))
    }

    /// Rotate a node, snapping to the angle step. Returns the snapped angle.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] if the node does not exist.
    pub fn rotate_node(&mut self, node: NodeId, degrees: i32) -> Result<i32, MyHomeError> {
        let frame = self.frame_mut(node)?;
        frame.transform = rotation_transform(degrees);
        Ok(frame.rotation())
    }

    /// Resize a node.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] if the node does not exist.
    pub fn resize_node(&mut self, node: NodeId, width: u32, height: u32) -> Result<(), MyHomeError> {
        let frame = self.frame_mut(node)?;
        frame.width = width;
        frame.height = height;
        Ok(())
    }

    /// Move a device or decoration into another zone, keeping its identity
    /// and local geometry.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] if either node does not exist, or
    /// if `node` is neither a device nor a decoration.
    pub fn reparent(&mut self, node: NodeId, zone: NodeId) -> Result<(), MyHomeError> {
        let target = self.zone_index(zone)?;
        let slot = self.slot(node).ok_or_else(|| not_found("Node", node))?;
        if slot.zone_index() == target {
            return Ok(());
        }
        match slot {
            Slot::Device(from, index) => {
                let device = self.zones[from].devices.remove(index);
                self.zones[target].devices.push(device);
            }
            Slot::Piece(from, NodeKind::Decoration, index) => {
                let piece = self.zones[from].deco.remove(index);
                self.zones[target].deco.push(piece);
            }
            Slot::Zone(_) | Slot::Piece(..) => return Err(not_found("Movable child", node)),
        }
        Ok(())
    }

    /// Replace the floor texture of a zone.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] if `zone` is not a zone node.
    pub fn set_zone_texture(&mut self, zone: NodeId, texture: impl Into<String>) -> Result<(), MyHomeError> {
        let index = self.zone_index(zone)?;
        self.zones[index].texture = Some(texture.into());
        Ok(())
    }

    /// Raise (`delta > 0`) or lower a zone in the stacking order; never
    /// below zero. Returns the new stacking value.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] if `zone` is not a zone node.
    pub fn shift_zone_layer(&mut self, zone: NodeId, delta: i32) -> Result<i32, MyHomeError> {
        let index = self.zone_index(zone)?;
        let z_index = &mut self.zones[index].z_index;
        *z_index = z_index.saturating_add(delta).max(0);
        Ok(*z_index)
    }

    /// Every node of the given kinds, zones first within each zone.
    #[must_use]
    pub fn keys_of(&self, kinds: &[NodeKind]) -> Vec<NodeId> {
        let mut keys = Vec::new();
        for zone in &self.zones {
            if kinds.contains(&NodeKind::Zone) {
                keys.push(zone.node);
            }
            for kind in PIECE_KINDS {
                if kinds.contains(&kind) {
                    keys.extend(zone.pieces(kind).into_iter().flatten().map(|p| p.node));
                }
            }
            if kinds.contains(&NodeKind::Device) {
                keys.extend(zone.devices.iter().map(|d| d.node));
            }
        }
        keys
    }

    #[must_use]
    pub fn kind_of(&self, node: NodeId) -> Option<NodeKind> {
        self.slot(node).map(|slot| match slot {
            Slot::Zone(_) => NodeKind::Zone,
            Slot::Piece(_, kind, _) => kind,
            Slot::Device(..) => NodeKind::Device,
        })
    }

    /// The zone a node belongs to; a zone belongs to itself.
    #[must_use]
    pub fn zone_containing(&self, node: NodeId) -> Option<&ZoneNode> {
        self.slot(node).map(|slot| &self.zones[slot.zone_index()])
    }

    #[must_use]
    pub fn zone(&self, node: NodeId) -> Option<&ZoneNode> {
        self.zones.iter().find(|zone| zone.node == node)
    }

    #[must_use]
    pub fn zone_by_id(&self, id: ZoneId) -> Option<&ZoneNode> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    #[must_use]
    pub fn device(&self, node: NodeId) -> Option<&DeviceNode> {
        self.devices().find(|device| device.node == node)
    }

    #[must_use]
    pub fn device_by_id(&self, id: DeviceId) -> Option<&DeviceNode> {
        self.devices().find(|device| device.id == id)
    }

    #[must_use]
    pub fn frame(&self, node: NodeId) -> Option<&Frame> {
        match self.slot(node)? {
            Slot::Zone(zone) => Some(&self.zones[zone].frame),
            Slot::Piece(zone, kind, index) => {
                self.zones[zone].pieces(kind).map(|pieces| &pieces[index].frame)
            }
            Slot::Device(zone, index) => Some(&self.zones[zone].devices[index].frame),
        }
    }

    #[must_use]
    pub fn zones(&self) -> &[ZoneNode] {
        &self.zones
    }

    fn devices(&self) -> impl Iterator<Item = &DeviceNode> {
        self.zones.iter().flat_map(|zone| zone.devices.iter())
    }

    fn insert_record(&mut self, record: ZoneRecord) -> NodeId {
        let ZoneRecord {
            id,
            name,
            display,
            devices,
        } = record;
        let node = self.next_id();
        let mut zone = ZoneNode {
            node,
            id,
            name,
            frame: Frame::new(
                display.x,
                display.y,
                display.rotation,
                display.width,
                display.height,
            ),
            z_index: display.z_index,
            texture: display.texture,
            walls: Vec::new(),
            construction: Vec::new(),
            deco: Vec::new(),
            devices: Vec::new(),
        };
        zone.walls = display.walls.iter().map(|p| self.piece(p)).collect();
        zone.construction = display.construction.iter().map(|p| self.piece(p)).collect();
        zone.deco = display.deco.iter().map(|p| self.piece(p)).collect();
        zone.devices = devices.into_iter().map(|d| self.device_node(d)).collect();
        self.zones.push(zone);
        node
    }

    fn piece(&mut self, placement: &Placement) -> Piece {
        Piece {
            node: self.next_id(),
            frame: Frame::from(placement),
            texture: placement.texture.clone(),
        }
    }

    fn device_node(&mut self, record: DeviceRecord) -> DeviceNode {
        DeviceNode {
            node: self.next_id(),
            id: record.id,
            uid: record.uid,
            device_type_id: record.device_type_id,
            device_type: record.device_type,
            skill: record.skill,
            name: record.name,
            frame: Frame::from(&record.display),
            icon_stamp: cache_bust(0),
        }
    }

    fn next_id(&mut self) -> NodeId {
        self.next_node += 1;
        NodeId(self.next_node)
    }

    fn zone_index(&self, node: NodeId) -> Result<usize, MyHomeError> {
        self.zones
            .iter()
            .position(|zone| zone.node == node)
            .ok_or_else(|| not_found("Zone", node))
    }

    fn slot(&self, node: NodeId) -> Option<Slot> {
        for (zone_index, zone) in self.zones.iter().enumerate() {
            if zone.node == node {
                return Some(Slot::Zone(zone_index));
            }
            for kind in PIECE_KINDS {
                let found = zone
                    .pieces(kind)
                    .and_then(|pieces| pieces.iter().position(|p| p.node == node));
                if let Some(index) = found {
                    return Some(Slot::Piece(zone_index, kind, index));
                }
            }
            if let Some(index) = zone.devices.iter().position(|d| d.node == node) {
                return Some(Slot::Device(zone_index, index));
            }
        }
        None
    }

    fn frame_mut(&mut self, node: NodeId) -> Result<&mut Frame, MyHomeError> {
        let slot = self.slot(node).ok_or_else(|| not_found("Node", node))?;
        let frame = match slot {
            Slot::Zone(zone) => Some(&mut self.zones[zone].frame),
            Slot::Piece(zone, kind, index) => self.zones[zone]
                .pieces_mut(kind)
                .map(|pieces| &mut pieces[index].frame),
            Slot::Device(zone, index) => Some(&mut self.zones[zone].devices[index].frame),
        };
        frame.ok_or_else(|| not_found("Node", node))
    }
}

fn not_found(entity: &'static str, id: impl fmt::Display) -> MyHomeError {
    NotFoundError {
        entity,
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: i32, y: i32, rotation: i32, texture: Option<&str>) -> Placement {
        Placement {
            x,
            y,
            rotation,
            width: 50,
            height: 50,
            texture: texture.map(str::to_string),
        }
    }

    fn device(id: u64, x: i32) -> DeviceRecord {
        DeviceRecord {
            id: DeviceId::new(id),
            uid: Some(format!("uid-{id}")),
            device_type_id: Some(DeviceTypeId::new(2)),
            device_type: "Lamp".to_string(),
            skill: "Lights".to_string(),
            name: None,
            display: placement(x, 5, 0, None),
        }
    }

    fn records() -> Vec<ZoneRecord> {
        vec![
            ZoneRecord {
                id: ZoneId::new(1),
                name: "Kitchen".to_string(),
                display: ZoneDisplay {
                    x: 120,
                    y: 80,
                    z_index: 2,
                    rotation: 90,
                    width: 200,
                    height: 150,
                    texture: Some("floor-3".to_string()),
                    walls: vec![placement(0, 0, 270, None), placement(50, 50, 0, None)],
                    construction: vec![placement(25, 25, 45, Some("construction-2"))],
                    deco: vec![placement(10, 10, 0, Some("deco-4"))],
                },
                devices: vec![device(7, 5), device(8, 60)],
            },
            ZoneRecord {
                id: ZoneId::new(2),
                name: "Hall".to_string(),
                display: ZoneDisplay::new(400, 0, 100, 100),
                devices: Vec::new(),
            },
        ]
    }

    #[test]
    fn should_roundtrip_snapped_records_exactly() {
        let input = records();
        let scene = Scene::build(input.clone());
        assert_eq!(scene.serialize(), input);
    }

    #[test]
    fn should_snap_unsnapped_geometry_on_build() {
        let mut input = records();
        input[0].display.x = 123;
        input[0].display.y = 81;
        input[0].display.rotation = 100;
        input[0].display.walls[1].x = 52;
        let scene = Scene::build(input);
        let output = scene.serialize();
        assert_eq!((output[0].display.x, output[0].display.y), (120, 80));
        assert_eq!(output[0].display.rotation, 90);
        assert_eq!(output[0].display.walls[1].x, 50);
    }

    #[test]
    fn should_preserve_child_order() {
        let scene = Scene::build(records());
        let kitchen = &scene.zones()[0];
        let ids: Vec<_> = kitchen.devices.iter().map(|d| d.id.get()).collect();
        assert_eq!(ids, vec![7, 8]);
        assert_eq!(kitchen.walls[0].frame.rotation(), 270);
    }

    #[test]
    fn should_refresh_icon_of_known_device_only() {
        let mut scene = Scene::build(records());
        let before = scene.device_by_id(DeviceId::new(7)).unwrap().clone();
        assert!(scene.patch_device_status(DeviceId::new(7)));
        let after = scene.device_by_id(DeviceId::new(7)).unwrap();
        assert!(after.icon_stamp > before.icon_stamp);
        assert_eq!(after.frame, before.frame);
        assert!(after.icon_url().starts_with("Device/7/icon?random="));
    }

    #[test]
    fn should_ignore_status_for_absent_device() {
        let mut scene = Scene::build(records());
        let before = scene.serialize();
        assert!(!scene.patch_device_status(DeviceId::new(99)));
        assert_eq!(scene.serialize(), before);
    }

    #[test]
    fn should_snap_moves_and_rotations() {
        let mut scene = Scene::build(records());
        let wall = scene.keys_of(&[NodeKind::Wall])[0];
        assert_eq!(scene.move_node(wall, 33, 47).unwrap(), (30, 45));
        assert_eq!(scene.rotate_node(wall, 50).unwrap(), 45);
        assert_eq!(scene.rotate_node(wall, 10).unwrap(), 0);
        assert_eq!(scene.frame(wall).unwrap().transform, None);
    }

    #[test]
    fn should_reparent_device_keeping_its_id() {
        let mut scene = Scene::build(records());
        let device = scene.device_by_id(DeviceId::new(7)).unwrap().node;
        let hall = scene.zone_by_id(ZoneId::new(2)).unwrap().node;
        scene.reparent(device, hall).unwrap();
        assert_eq!(scene.zone_containing(device).unwrap().id, ZoneId::new(2));
        assert_eq!(scene.device(device).unwrap().id, DeviceId::new(7));
        assert_eq!(scene.zones()[0].devices.len(), 1);
    }

    #[test]
    fn should_refuse_to_reparent_walls() {
        let mut scene = Scene::build(records());
        let wall = scene.keys_of(&[NodeKind::Wall])[0];
        let hall = scene.zone_by_id(ZoneId::new(2)).unwrap().node;
        assert!(matches!(
            scene.reparent(wall, hall),
            Err(MyHomeError::NotFound(_))
        ));
    }

    #[test]
    fn should_remove_zone_with_children() {
        let mut scene = Scene::build(records());
        let kitchen = scene.zone_by_id(ZoneId::new(1)).unwrap().node;
        let device = scene.device_by_id(DeviceId::new(7)).unwrap().node;
        assert!(scene.remove(kitchen));
        assert!(scene.device(device).is_none());
        assert!(!scene.remove(kitchen));
    }

    #[test]
    fn should_list_keys_by_kind() {
        let scene = Scene::build(records());
        assert_eq!(scene.keys_of(&[NodeKind::Zone]).len(), 2);
        assert_eq!(scene.keys_of(&[NodeKind::Wall, NodeKind::Construction]).len(), 3);
        assert_eq!(scene.keys_of(&[NodeKind::Device]).len(), 2);
        for key in scene.keys_of(&[NodeKind::Decoration]) {
            assert_eq!(scene.kind_of(key), Some(NodeKind::Decoration));
        }
    }

    #[test]
    fn should_keep_stacking_order_non_negative() {
        let mut scene = Scene::build(records());
        let hall = scene.zone_by_id(ZoneId::new(2)).unwrap().node;
        assert_eq!(scene.shift_zone_layer(hall, 1).unwrap(), 1);
        assert_eq!(scene.shift_zone_layer(hall, -5).unwrap(), 0);
    }

    #[test]
    fn should_reject_pieces_of_non_piece_kind() {
        let mut scene = Scene::build(records());
        let hall = scene.zone_by_id(ZoneId::new(2)).unwrap().node;
        let result = scene.add_piece(hall, NodeKind::Device, &Placement::new(0, 0, 1, 1));
        assert!(matches!(result, Err(MyHomeError::NotFound(_))));
    }
}
