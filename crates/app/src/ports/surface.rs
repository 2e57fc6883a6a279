//! Rendering surface port.
//!
//! The editor never touches a UI toolkit directly. It emits [`Effect`]s and
//! the surface decides how to show them: which nodes currently carry the
//! interactive-transform affordance, which palette or side panel is open,
//! which link overlays are drawn.

use myhome_domain::device::DeviceSettings;
use myhome_domain::id::{DeviceId, ZoneId};
use myhome_domain::palette::TextureKind;

use crate::scene::NodeId;

/// Something the surface must reflect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Make the node draggable, resizable and rotatable.
    Attach(NodeId),
    /// Remove the interactive-transform affordance from the node.
    Detach(NodeId),
    ShowPalette(Palette),
    HidePalette,
    OpenPanel(Panel),
    ClosePanel,
    /// Highlight the device selected for linking, or clear the highlight.
    Highlight(Option<DeviceId>),
    DrawLink { zone: ZoneId, device: DeviceId },
    EraseLink { zone: ZoneId, device: DeviceId },
    /// Hide decorations and show the technical layer.
    Blueprint(bool),
    /// Open a view returned by a device toggle.
    OpenView(String),
}

/// Palette shown next to the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Textures(TextureKind),
    DeviceTypes,
}

/// Side panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Zone(ZonePanel),
    Device(DevicePanel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePanel {
    pub zone: ZoneId,
    pub name: String,
    pub synonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePanel {
    pub device: DeviceId,
    pub name: Option<String>,
    pub device_type: String,
    pub pairing: Pairing,
    pub settings: DeviceSettings,
    pub save_state: SaveState,
}

/// Pairing state shown in the device panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pairing {
    Paired(String),
    Unpaired,
    Searching,
}

/// Inline state of the settings form's save button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Pristine,
    Saving,
    Saved,
    Failed,
}

/// Receiver of editor effects.
pub trait Surface: Send {
    fn apply(&mut self, effect: Effect);
}

/// Records effects in order; handy for headless runs.
impl Surface for Vec<Effect> {
    fn apply(&mut self, effect: Effect) {
        self.push(effect);
    }
}
