//! Floor-plan editor: the mode state machine over the live scene.
//!
//! Exactly one [`Mode`] is active at a time. Every change of mode goes through
//! [`Editor::transition`], which tears the old mode down completely (detach
//! affordances, hide its palette, close the side panel, erase link overlays)
//! before setting the new one up. Structural edits are persisted immediately
//! and only applied to the scene once the backend accepted them; geometry is
//! flushed in bulk by [`Editor::save`].

mod construction;
mod mode;
mod technic;


use std::collections::BTreeSet;

use myhome_domain::device::DeviceType;
use myhome_domain::error::{MyHomeError, NotFoundError, ValidationError};
use myhome_domain::id::DeviceTypeId;

use crate::ports::{Dialogs, Effect, HomeGateway, Panel, Surface};
use crate::scene::{NodeId, NodeKind, Scene};

pub use mode::{Mode, Tool, Toolbar};

/// What happened to a dropped node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Same parent, new snapped position.
    Moved,
    /// Now a child of another zone.
    Reparented,
    /// Left where it was before the drag.
    Reverted,
}

/// Editor over a scene, talking to the backend through `G`, rendering through
/// `S` and asking the user through `D`.
pub struct Editor<G, S, D> {
    gateway: G,
    surface: S,
    dialogs: D,
    scene: Scene,
    mode: Mode,
    edit_mode: bool,
    blueprint: bool,
    toolbar: Option<Toolbar>,
    attached: BTreeSet<NodeId>,
    panel: Option<Panel>,
    device_types: Vec<DeviceType>,
}

impl<G, S, D> Editor<G, S, D>
where
    G: HomeGateway,
    S: Surface,
    D: Dialogs,
{
    /// Create an editor over an empty scene, in display mode.
    pub fn new(gateway: G, surface: S, dialogs: D) -> Self {
        Self {
            gateway,
            surface,
            dialogs,
            scene: Scene::default(),
            mode: Mode::Idle,
            edit_mode: false,
            blueprint: false,
            toolbar: None,
            attached: BTreeSet::new(),
            panel: None,
            device_types: Vec::new(),
        }
    }

    /// Fetch the scene and the device type list, replacing the current scene.
    ///
    /// A failing device type list only leaves the installer palette empty.
    ///
    /// # Errors
    ///
    /// Returns the gateway error when the scene cannot be loaded.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), MyHomeError> {
        let records = self.gateway.load_scene().await;
        let records = self.report(records)?;
        self.scene = Scene::build(records);
        match self.gateway.device_types().await {
            Ok(types) => self.device_types = types,
            Err(err) => tracing::warn!(error = %err, "device types unavailable"),
        }
        Ok(())
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Scene access for live updates.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    pub fn blueprint(&self) -> bool {
        self.blueprint
    }

    pub fn toolbar(&self) -> Option<Toolbar> {
        self.toolbar
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    pub fn device_types(&self) -> &[DeviceType] {
        &self.device_types
    }

    /// Whether `node` currently carries the interactive-transform affordance.
    pub fn is_movable(&self, node: NodeId) -> bool {
        self.attached.contains(&node)
    }

    /// Switch to edit mode with the construction toolbar open.
    pub fn enter_edit_mode(&mut self) {
        self.edit_mode = true;
        self.transition(Mode::Idle);
        self.toolbar = Some(Toolbar::Construction);
        self.set_blueprint(false);
    }

    /// Save the whole scene and go back to display mode.
    ///
    /// On a failed save the editor stays in edit mode, with the blueprint
    /// display it had, so nothing is lost.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the save request.
    #[tracing::instrument(skip(self))]
    pub async fn finish_editing(&mut self) -> Result<(), MyHomeError> {
        let blueprint = self.blueprint;
        self.set_blueprint(false);
        if let Err(err) = self.save().await {
            self.set_blueprint(blueprint);
            return Err(err);
        }
        self.transition(Mode::Idle);
        self.toolbar = None;
        self.edit_mode = false;
        Ok(())
    }

    /// Open a toolbar, leaving any active tool.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EditModeOff`] outside edit mode.
    pub fn open_toolbar(&mut self, toolbar: Toolbar) -> Result<(), MyHomeError> {
        self.require_edit_mode()?;
        self.transition(Mode::Idle);
        self.toolbar = Some(toolbar);
        self.set_blueprint(toolbar.blueprint());
        Ok(())
    }

    /// Toggle `tool`: switch it on from any other state, or back to idle.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EditModeOff`] outside edit mode.
    pub fn select_tool(&mut self, tool: Tool) -> Result<&Mode, MyHomeError> {
        self.require_edit_mode()?;
        let next = if self.mode.tool() == Some(tool) {
            Mode::Idle
        } else {
            tool.mode()
        };
        tracing::debug!(?tool, ?next, "tool selected");
        self.transition(next);
        Ok(&self.mode)
    }

    /// Toggle the texture of the active palette.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPalette`] when the active mode has no
    /// texture palette, or [`ValidationError::UnknownTexture`] for a name
    /// outside its catalog.
    pub fn select_texture(&mut self, texture: &str) -> Result<(), MyHomeError> {
        let Some((kind, slot)) = self.mode.texture_slot() else {
            return Err(ValidationError::NoPalette.into());
        };
        if !kind.contains(texture) {
            return Err(ValidationError::UnknownTexture {
                kind,
                texture: texture.to_string(),
            }
            .into());
        }
        mode::toggle(slot, texture.to_string());
        Ok(())
    }

    /// Toggle the device type to install.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPalette`] outside the installer, or
    /// [`ValidationError::UnknownDeviceType`] for a type not offered.
    pub fn select_device_type(&mut self, device_type: DeviceTypeId) -> Result<(), MyHomeError> {
        if !self.device_types.iter().any(|known| known.id == device_type) {
            return Err(ValidationError::UnknownDeviceType(device_type.get()).into());
        }
        let Mode::InstallingDevice { device_type: slot } = &mut self.mode else {
            return Err(ValidationError::NoPalette.into());
        };
        mode::toggle(slot, device_type);
        Ok(())
    }

    /// Persist the whole scene as it currently looks.
    ///
    /// # Errors
    ///
    /// Returns the gateway error of the save request.
    #[tracing::instrument(skip(self))]
    pub async fn save(&mut self) -> Result<(), MyHomeError> {
        let zones = self.scene.serialize();
        let result = self.gateway.save_scene(zones).await;
        self.report(result)
    }

    /// Click on a zone; what it does depends on the active mode. Returns the
    /// node created by the click, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] for an unknown zone, or the gateway
    /// error of the request the click issued.
    #[tracing::instrument(skip(self))]
    pub async fn click_zone(&mut self, zone: NodeId) -> Result<Option<NodeId>, MyHomeError> {
        self.require_zone(zone)?;
        match &self.mode {
            Mode::Building { construction } => {
                let texture = construction.clone();
                self.build_on(zone, texture).map(Some)
            }
            Mode::Painting { floor } => {
                if let Some(texture) = floor.clone() {
                    self.scene.set_zone_texture(zone, texture)?;
                }
                Ok(None)
            }
            Mode::Decorating { decoration } => match decoration.clone() {
                Some(texture) => self.decorate(zone, texture).map(Some),
                None => Ok(None),
            },
            Mode::InstallingDevice { device_type } => match *device_type {
                Some(device_type) => self.install_on(zone, device_type).await.map(Some),
                None => Ok(None),
            },
            Mode::LinkingDevice { .. } => self.link_zone(zone).await.map(|()| None),
            Mode::ZoneSettings { .. } => self.open_zone_settings(zone).await.map(|()| None),
            _ => Ok(None),
        }
    }

    /// Right click on a zone: unlink it, or delete it while moving zones.
    /// Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] for an unknown zone, or the gateway
    /// error of the request.
    #[tracing::instrument(skip(self))]
    pub async fn right_click_zone(&mut self, zone: NodeId) -> Result<bool, MyHomeError> {
        self.require_zone(zone)?;
        match self.mode {
            Mode::LinkingDevice { .. } => self.unlink_zone(zone).await,
            Mode::MovingZone => self.delete_zone(zone).await,
            _ => Ok(false),
        }
    }

    /// Drop a dragged node at `(x, y)`, optionally over another zone.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotMovable`] when the node does not carry
    /// the affordance, or the gateway error of a device move.
    #[tracing::instrument(skip(self))]
    pub async fn drop_node(
        &mut self,
        node: NodeId,
        target: Option<NodeId>,
        x: i32,
        y: i32,
    ) -> Result<DropOutcome, MyHomeError> {
        self.require_movable(node)?;
        match self.scene.kind_of(node) {
            Some(NodeKind::Device) => self.drop_device(node, target, x, y).await,
            Some(NodeKind::Decoration) => self.drop_decoration(node, target, x, y),
            _ => {
                self.scene.move_node(node, x, y)?;
                Ok(DropOutcome::Moved)
            }
        }
    }

    /// Rotate a movable node; returns the snapped angle.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotMovable`] when the node does not carry
    /// the affordance.
    pub fn rotate_node(&mut self, node: NodeId, degrees: i32) -> Result<i32, MyHomeError> {
        self.require_movable(node)?;
        self.scene.rotate_node(node, degrees)
    }

    /// Resize a movable node.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotMovable`] when the node does not carry
    /// the affordance.
    pub fn resize_node(&mut self, node: NodeId, width: u32, height: u32) -> Result<(), MyHomeError> {
        self.require_movable(node)?;
        self.scene.resize_node(node, width, height)
    }

    /// Leave the current mode and enter `next`.
    fn transition(&mut self, next: Mode) {
        for node in std::mem::take(&mut self.attached) {
            self.surface.apply(Effect::Detach(node));
        }
        if self.mode.palette().is_some() {
            self.surface.apply(Effect::HidePalette);
        }
        if self.panel.take().is_some() {
            self.surface.apply(Effect::ClosePanel);
        }
        self.clear_link_overlays();

        self.mode = next;

        for node in self.scene.keys_of(self.mode.movable_kinds()) {
            self.attach(node);
        }
        if let Some(palette) = self.mode.palette() {
            self.surface.apply(Effect::ShowPalette(palette));
        }
    }

    fn attach(&mut self, node: NodeId) {
        if self.attached.insert(node) {
            self.surface.apply(Effect::Attach(node));
        }
    }

    /// Remove a node from the scene and drop its affordance.
    fn remove_node(&mut self, node: NodeId) -> bool {
        if self.attached.remove(&node) {
            self.surface.apply(Effect::Detach(node));
        }
        self.scene.remove(node)
    }

    fn set_blueprint(&mut self, on: bool) {
        self.blueprint = on;
        self.surface.apply(Effect::Blueprint(on));
    }

    fn show_panel(&mut self, panel: Panel) {
        self.panel = Some(panel.clone());
        self.surface.apply(Effect::OpenPanel(panel));
    }

    /// Alert the user about a failed request; the error is passed through.
    fn report<T>(&mut self, result: Result<T, MyHomeError>) -> Result<T, MyHomeError> {
        result.inspect_err(|err| {
            tracing::warn!(error = %err, rejected = err.is_rejection(), "edit did not take effect");
            self.dialogs.alert(&err.user_message());
        })
    }

    fn require_edit_mode(&self) -> Result<(), MyHomeError> {
        if self.edit_mode {
            Ok(())
        } else {
            Err(ValidationError::EditModeOff.into())
        }
    }

    fn require_movable(&self, node: NodeId) -> Result<(), MyHomeError> {
        if self.attached.contains(&node) {
            Ok(())
        } else {
            Err(ValidationError::NotMovable.into())
        }
    }

    fn require_zone(&self, zone: NodeId) -> Result<(), MyHomeError> {
        if self.scene.zone(zone).is_some() {
            Ok(())
        } else {
            Err(not_found("Zone", zone))
        }
    }
}

fn not_found(entity: &'static str, node: NodeId) -> MyHomeError {
    NotFoundError {
        entity,
        id: node.to_string(),
    }
    .into()
}
