//! Technic toolbar: device installation, links, device moves, pairing and
//! settings, plus the device toggle of display mode.

use myhome_domain::device::DeviceRecord;
use myhome_domain::error::{MyHomeError, ValidationError};
use myhome_domain::geometry::Placement;
use myhome_domain::id::{DeviceId, DeviceTypeId};

use super::{DropOutcome, Editor, Mode, not_found};
use crate::ports::{DevicePanel, Dialogs, Effect, HomeGateway, Pairing, Panel, SaveState, Surface};
use crate::scene::NodeId;

pub(super) const DELETE_DEVICE_CONFIRM: &str = "Do you really want to delete this device?";
pub(super) const DELETE_DEVICE_FAILED: &str = "Failed removing device!";

impl<G, S, D> Editor<G, S, D>
where
    G: HomeGateway,
    S: Surface,
    D: Dialogs,
{
    /// Click on a device.
    ///
    /// In display mode this toggles the device and opens the view it returns.
    /// While linking it selects the device and draws its links; in device
    /// settings it opens the device panel.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] for an unknown device, or the
    /// gateway error of the request the click issued.
    #[tracing::instrument(skip(self))]
    pub async fn click_device(&mut self, node: NodeId) -> Result<(), MyHomeError> {
        let device = self.device_id(node)?;
        if !self.edit_mode {
            let toggled = self.gateway.toggle(device).await;
            if let Some(href) = self.report(toggled)?.href {
                self.surface.apply(Effect::OpenView(href));
            }
            return Ok(());
        }
        match self.mode {
            Mode::LinkingDevice { .. } => self.select_for_linking(node, device).await,
            Mode::DeviceSettings { .. } => self.open_device_settings(node, device).await,
            _ => Ok(()),
        }
    }

    /// Right click on a device uninstalls it after confirmation. The node is
    /// removed only once the backend confirmed the deletion.
    ///
    /// # Errors
    ///
    /// Returns [`MyHomeError::NotFound`] for an unknown device, or the
    /// gateway error of the delete request.
    #[tracing::instrument(skip(self))]
    pub async fn right_click_device(&mut self, node: NodeId) -> Result<bool, MyHomeError> {
        let device = self.device_id(node)?;
        if !matches!(self.mode, Mode::InstallingDevice { .. })
            || !self.dialogs.confirm(DELETE_DEVICE_CONFIRM)
        {
            return Ok(false);
        }
        if let Err(err) = self.gateway.delete_device(device).await {
            tracing::warn!(%device, error = %err, "device removal failed");
            self.dialogs.alert(DELETE_DEVICE_FAILED);
            return Err(err);
        }
        tracing::info!(%device, "device removed");
        Ok(self.remove_node(node))
    }

    /// Start searching for the physical unit of the device in the side panel.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPanel`] without an open device panel, or
    /// the gateway error; the panel then shows the device as unpaired again.
    #[tracing::instrument(skip(self))]
    pub async fn pair_device(&mut self) -> Result<(), MyHomeError> {
        let mut panel = self.device_panel()?.clone();
        if panel.pairing != Pairing::Unpaired {
            return Ok(());
        }
        panel.pairing = Pairing::Searching;
        self.show_panel(Panel::Device(panel.clone()));
        let result = self.gateway.pair(panel.device).await;
        if result.is_err() {
            panel.pairing = Pairing::Unpaired;
            self.show_panel(Panel::Device(panel));
        }
        self.report(result)
    }

    /// Change one field of the settings form. Resets the inline save state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPanel`] without an open device panel.
    pub fn edit_setting(&mut self, key: &str, value: &str) -> Result<(), MyHomeError> {
        let mut panel = self.device_panel()?.clone();
        panel.settings.insert(key.to_string(), value.to_string());
        panel.save_state = SaveState::Pristine;
        self.show_panel(Panel::Device(panel));
        Ok(())
    }

    /// Persist the settings form. The outcome is reported inline as
    /// [`SaveState::Saved`] or [`SaveState::Failed`], never as an alert.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoPanel`] without an open device panel.
    #[tracing::instrument(skip(self))]
    pub async fn submit_device_settings(&mut self) -> Result<SaveState, MyHomeError> {
        let mut panel = self.device_panel()?.clone();
        panel.save_state = SaveState::Saving;
        self.show_panel(Panel::Device(panel.clone()));
        panel.save_state = match self
            .gateway
            .save_device_settings(panel.device, &panel.settings)
            .await
        {
            Ok(()) => SaveState::Saved,
            Err(err) => {
                tracing::warn!(device = %panel.device, error = %err, "device settings not saved");
                SaveState::Failed
            }
        };
        let state = panel.save_state;
        self.show_panel(Panel::Device(panel));
        Ok(state)
    }

    pub(super) async fn install_on(
        &mut self,
        zone: NodeId,
        device_type: DeviceTypeId,
    ) -> Result<NodeId, MyHomeError> {
        let zone_id = self.zone_id(zone)?;
        let installed = self.gateway.add_device(zone_id, device_type).await;
        let installed = self.report(installed)?;
        tracing::info!(device = %installed.id, zone = %zone_id, "device installed");
        self.scene.add_device(
            zone,
            DeviceRecord {
                id: installed.id,
                uid: None,
                device_type_id: Some(device_type),
                device_type: installed.device_type,
                skill: installed.skill,
                name: None,
                display: Placement::new(25, 25, 50, 50),
            },
        )
    }

    pub(super) async fn link_zone(&mut self, zone: NodeId) -> Result<(), MyHomeError> {
        let zone_id = self.zone_id(zone)?;
        let Mode::LinkingDevice {
            selected: Some(device),
            links,
        } = &self.mode
        else {
            return Ok(());
        };
        let device = *device;
        if links.contains(&zone_id) {
            return Ok(());
        }
        let result = self.gateway.add_link(device, zone_id).await;
        self.report(result)?;
        if let Mode::LinkingDevice { links, .. } = &mut self.mode {
            links.push(zone_id);
        }
        self.surface.apply(Effect::DrawLink {
            zone: zone_id,
            device,
        });
        Ok(())
    }

    pub(super) async fn unlink_zone(&mut self, zone: NodeId) -> Result<bool, MyHomeError> {
        let zone_id = self.zone_id(zone)?;
        let Mode::LinkingDevice {
            selected: Some(device),
            ..
        } = self.mode
        else {
            return Ok(false);
        };
        let result = self.gateway.remove_link(device, zone_id).await;
        self.report(result)?;
        if let Mode::LinkingDevice { links, .. } = &mut self.mode {
            links.retain(|linked| *linked != zone_id);
        }
        self.surface.apply(Effect::EraseLink {
            zone: zone_id,
            device,
        });
        Ok(true)
    }

    /// Cross-zone drops wait for the backend before deciding: the device is
    /// re-parented only once the location change is confirmed, and left in
    /// place otherwise.
    pub(super) async fn drop_device(
        &mut self,
        node: NodeId,
        target: Option<NodeId>,
        x: i32,
        y: i32,
    ) -> Result<DropOutcome, MyHomeError> {
        let (device, label) = {
            let found = self
                .scene
                .device(node)
                .ok_or_else(|| not_found("Device", node))?;
            (found.id, found.label().to_string())
        };
        let current = self.scene.zone_containing(node).map(|zone| zone.node);
        let target = match target {
            Some(target) if Some(target) != current => target,
            _ => {
                self.scene.move_node(node, x, y)?;
                return Ok(DropOutcome::Moved);
            }
        };
        let (zone_id, zone_name) = {
            let zone = self
                .scene
                .zone(target)
                .ok_or_else(|| not_found("Zone", target))?;
            (zone.id, zone.name.clone())
        };
        if !self
            .dialogs
            .confirm(&format!("Do you really want to move {label} to {zone_name}?"))
        {
            return Ok(DropOutcome::Reverted);
        }
        let result = self.gateway.change_location(device, zone_id).await;
        self.report(result)?;
        self.scene.reparent(node, target)?;
        self.scene.move_node(node, x, y)?;
        tracing::info!(%device, zone = %zone_id, "device moved");
        self.refresh_blueprint().await;
        Ok(DropOutcome::Reparented)
    }

    /// Hide the blueprint, persist the scene, then restore the blueprint.
    async fn refresh_blueprint(&mut self) {
        self.surface.apply(Effect::Blueprint(false));
        let zones = self.scene.serialize();
        let result = self.gateway.save_scene(zones).await;
        let saved = self.report(result).is_ok();
        tracing::debug!(saved, "blueprint refreshed");
        self.surface.apply(Effect::Blueprint(self.blueprint));
    }

    /// Erase the link overlays and highlight of the selected device.
    pub(super) fn clear_link_overlays(&mut self) {
        if let Mode::LinkingDevice { selected, links } = &mut self.mode {
            if let Some(device) = selected.take() {
                for zone in links.drain(..) {
                    self.surface.apply(Effect::EraseLink { zone, device });
                }
                self.surface.apply(Effect::Highlight(None));
            }
        }
    }

    async fn select_for_linking(&mut self, node: NodeId, device: DeviceId) -> Result<(), MyHomeError> {
        self.clear_link_overlays();
        if let Mode::LinkingDevice { selected, .. } = &mut self.mode {
            *selected = Some(device);
        }
        self.surface.apply(Effect::Highlight(Some(device)));
        let links = self.gateway.device_links(device).await;
        let zones: Vec<_> = self
            .report(links)?
            .into_iter()
            .filter(|link| link.device_id.is_none_or(|linked| linked == device))
            .map(|link| link.location_id)
            .collect();
        for zone in &zones {
            self.surface.apply(Effect::DrawLink {
                zone: *zone,
                device,
            });
        }
        if let Mode::LinkingDevice { links, .. } = &mut self.mode {
            *links = zones;
        }
        tracing::debug!(%node, %device, "device selected for linking");
        Ok(())
    }

    /// The panel opens even when the settings cannot be fetched, so pairing
    /// stays reachable; the fetch error is alerted and returned.
    async fn open_device_settings(&mut self, node: NodeId, device: DeviceId) -> Result<(), MyHomeError> {
        let fetched = self.gateway.device_settings(device).await;
        let fetched = self.report(fetched);
        let found = self
            .scene
            .device(node)
            .ok_or_else(|| not_found("Device", node))?;
        let panel = DevicePanel {
            device,
            name: found.name.clone(),
            device_type: found.device_type.clone(),
            pairing: found
                .uid
                .clone()
                .map_or(Pairing::Unpaired, Pairing::Paired),
            settings: fetched.as_ref().cloned().unwrap_or_default(),
            save_state: SaveState::Pristine,
        };
        if let Mode::DeviceSettings { device: selected } = &mut self.mode {
            *selected = Some(device);
        }
        self.show_panel(Panel::Device(panel));
        fetched.map(|_| ())
    }

    fn device_id(&self, node: NodeId) -> Result<DeviceId, MyHomeError> {
        self.scene
            .device(node)
            .map(|found| found.id)
            .ok_or_else(|| not_found("Device", node))
    }

    fn device_panel(&self) -> Result<&DevicePanel, MyHomeError> {
        match &self.panel {
            Some(Panel::Device(panel)) => Ok(panel),
            _ => Err(ValidationError::NoPanel.into()),
        }
    }
}
