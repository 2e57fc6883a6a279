//! Construction toolbar: zones, walls, construction pieces, floors,
//! decorations and zone settings.

use myhome_domain::error::{MyHomeError, ValidationError};
use myhome_domain::geometry::{Placement, snap_position};
use myhome_domain::id::ZoneId;
use myhome_domain::zone::ZoneDisplay;

use super::{DropOutcome, Editor, Mode, not_found};
use crate::ports::{Dialogs, HomeGateway, Panel, Surface, ZonePanel};
use crate::scene::{NodeId, NodeKind};

pub(super) const ZONE_NAME_PROMPT: &str = "Please name this new zone";
pub(super) const DELETE_ZONE_CONFIRM: &str = "Do you really want to delete this zone?";

const ZONE_SIZE: u32 = 100;

fn default_wall() -> Placement {
    Placement::new(50, 50, 25, 75)
}

fn default_piece(texture: String) -> Placement {
    Placement::new(25, 25, 50, 50).with_texture(texture)
}

impl<G, S, D> Editor<G, S, D>
where
    G: HomeGateway,
    S: Surface,
    D: Dialogs,
{
    /// Click on the empty canvas. While adding a zone this prompts for a name,
    /// creates the zone at the snapped click position and switches to moving
    /// zones. Returns the new zone node.
    ///
    /// A cancelled or blank name issues no request.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the create request.
    #[tracing::instrument(skip(self))]
    pub async fn click_canvas(&mut self, x: i32, y: i32) -> Result<Option<NodeId>, MyHomeError> {
        if self.mode != Mode::AddingZone {
            return Ok(None);
        }
        let Some(name) = self
            .dialogs
            .prompt(ZONE_NAME_PROMPT)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
        else {
            tracing::debug!("zone creation cancelled");
            return Ok(None);
        };
        let created = self.gateway.add_zone(&name).await;
        let id = self.report(created)?;
        let (x, y) = snap_position(x, y);
        let node = self
            .scene
            .attach_zone(id, name, ZoneDisplay::new(x, y, ZONE_SIZE, ZONE_SIZE));
        tracing::info!(zone = %id, "zone created");
        self.transition(Mode::MovingZone);
        Ok(Some(node))
    }

    /// Right click on a wall, construction piece or decoration removes it
    /// while its tool is active. Returns whether it was removed.
    pub fn right_click_node(&mut self, node: NodeId) -> bool {
        let removable = match self.mode {
            Mode::Building { .. } => &[NodeKind::Wall, NodeKind::Construction][..],
            Mode::Decorating { .. } => &[NodeKind::Decoration][..],
            _ => &[][..],
        };
        match self.scene.kind_of(node) {
            Some(kind) if removable.contains(&kind) => self.remove_node(node),
            _ => false,
        }
    }

    /// Bring a zone one layer up while moving zones.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotMovable`] outside the zone mover.
    pub fn raise_zone(&mut self, zone: NodeId) -> Result<i32, MyHomeError> {
        self.shift_zone(zone, 1)
    }

    /// Send a zone one layer down while moving zones.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotMovable`] outside the zone mover.
    pub fn lower_zone(&mut self, zone: NodeId) -> Result<i32, MyHomeError> {
        self.shift_zone(zone, -1)
    }

    /// Add a synonym to the zone shown in the side panel.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPanel`] without an open zone panel,
    /// [`ValidationError::EmptyName`] for a blank value, or the gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn add_synonym(&mut self, value: &str) -> Result<(), MyHomeError> {
        let value = value.trim();
        let zone = self.zone_panel()?.zone;
        if value.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let result = self.gateway.add_synonym(zone, value).await;
        self.report(result)?;
        let mut panel = self.zone_panel()?.clone();
        if !panel.synonyms.iter().any(|known| known == value) {
            panel.synonyms.push(value.to_string());
        }
        self.show_panel(Panel::Zone(panel));
        Ok(())
    }

    /// Remove a synonym from the zone shown in the side panel.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPanel`] without an open zone panel, or
    /// the gateway error.
    #[tracing::instrument(skip(self))]
    pub async fn remove_synonym(&mut self, value: &str) -> Result<(), MyHomeError> {
        let zone = self.zone_panel()?.zone;
        let result = self.gateway.delete_synonym(zone, value).await;
        self.report(result)?;
        let mut panel = self.zone_panel()?.clone();
        panel.synonyms.retain(|known| known != value);
        self.show_panel(Panel::Zone(panel));
        Ok(())
    }

    pub(super) fn build_on(
        &mut self,
        zone: NodeId,
        construction: Option<String>,
    ) -> Result<NodeId, MyHomeError> {
        let node = match construction {
            Some(texture) => {
                self.scene
                    .add_piece(zone, NodeKind::Construction, &default_piece(texture))?
            }
            None => self.scene.add_piece(zone, NodeKind::Wall, &default_wall())?,
        };
        self.attach(node);
        Ok(node)
    }

    pub(super) fn decorate(&mut self, zone: NodeId, texture: String) -> Result<NodeId, MyHomeError> {
        let node = self
            .scene
            .add_piece(zone, NodeKind::Decoration, &default_piece(texture))?;
        self.attach(node);
        Ok(node)
    }

    pub(super) fn drop_decoration(
        &mut self,
        node: NodeId,
        target: Option<NodeId>,
        x: i32,
        y: i32,
    ) -> Result<DropOutcome, MyHomeError> {
        let current = self.scene.zone_containing(node).map(|zone| zone.node);
        let outcome = match target {
            Some(target) if Some(target) != current => {
                self.scene.reparent(node, target)?;
                DropOutcome::Reparented
            }
            _ => DropOutcome::Moved,
        };
        self.scene.move_node(node, x, y)?;
        Ok(outcome)
    }

    pub(super) async fn delete_zone(&mut self, zone: NodeId) -> Result<bool, MyHomeError> {
        let id = self.zone_id(zone)?;
        if !self.dialogs.confirm(DELETE_ZONE_CONFIRM) {
            return Ok(false);
        }
        let result = self.gateway.delete_zone(id).await;
        self.report(result)?;
        tracing::info!(zone = %id, "zone deleted");
        Ok(self.remove_node(zone))
    }

    pub(super) async fn open_zone_settings(&mut self, zone: NodeId) -> Result<(), MyHomeError> {
        let (id, name) = {
            let node = self.scene.zone(zone).ok_or_else(|| not_found("Zone", zone))?;
            (node.id, node.name.clone())
        };
        let synonyms = self.gateway.zone_synonyms(id).await;
        let synonyms = self.report(synonyms)?;
        if let Mode::ZoneSettings { zone } = &mut self.mode {
            *zone = Some(id);
        }
        self.show_panel(Panel::Zone(ZonePanel {
            zone: id,
            name,
            synonyms,
        }));
        Ok(())
    }

    pub(super) fn zone_id(&self, zone: NodeId) -> Result<ZoneId, MyHomeError> {
        self.scene
            .zone(zone)
            .map(|node| node.id)
            .ok_or_else(|| not_found("Zone", zone))
    }

    fn shift_zone(&mut self, zone: NodeId, delta: i32) -> Result<i32, MyHomeError> {
        if self.mode != Mode::MovingZone {
            return Err(ValidationError::NotMovable.into());
        }
        self.scene.shift_zone_layer(zone, delta)
    }

    fn zone_panel(&self) -> Result<&ZonePanel, MyHomeError> {
        match &self.panel {
            Some(Panel::Zone(panel)) => Ok(panel),
            _ => Err(ValidationError::NoPanel.into()),
        }
    }
}
