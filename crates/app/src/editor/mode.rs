//! Editor modes, tools and toolbars.

use myhome_domain::id::{DeviceId, DeviceTypeId, ZoneId};
use myhome_domain::palette::TextureKind;

use crate::ports::Palette;
use crate::scene::NodeKind;

/// The two editing toolbars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolbar {
    /// Zones, walls, floors and decorations.
    Construction,
    /// Devices and links; shows the blueprint layer.
    Technic,
}

impl Toolbar {
    #[must_use]
    pub const fn tools(self) -> &'static [Tool] {
        match self {
            Self::Construction => &[
                Tool::AddZone,
                Tool::Builder,
                Tool::Painter,
                Tool::Decorator,
                Tool::ZoneMover,
                Tool::ZoneSettings,
            ],
            Self::Technic => &[
                Tool::Installer,
                Tool::Linker,
                Tool::DeviceMover,
                Tool::DeviceSettings,
            ],
        }
    }

    #[must_use]
    pub const fn blueprint(self) -> bool {
        matches!(self, Self::Technic)
    }
}

/// A toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    AddZone,
    Builder,
    Painter,
    Decorator,
    ZoneMover,
    ZoneSettings,
    Installer,
    Linker,
    DeviceMover,
    DeviceSettings,
}

impl Tool {
    /// State entered when the tool is switched on, with nothing selected.
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::AddZone => Mode::AddingZone,
            Self::Builder => Mode::Building { construction: None },
            Self::Painter => Mode::Painting { floor: None },
            Self::Decorator => Mode::Decorating { decoration: None },
            Self::ZoneMover => Mode::MovingZone,
            Self::ZoneSettings => Mode::ZoneSettings { zone: None },
            Self::Installer => Mode::InstallingDevice { device_type: None },
            Self::Linker => Mode::LinkingDevice {
                selected: None,
                links: Vec::new(),
            },
            Self::DeviceMover => Mode::MovingDevice,
            Self::DeviceSettings => Mode::DeviceSettings { device: None },
        }
    }
}

/// The single active editor state, with its mode-local selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    AddingZone,
    Building {
        construction: Option<String>,
    },
    Painting {
        floor: Option<String>,
    },
    Decorating {
        decoration: Option<String>,
    },
    InstallingDevice {
        device_type: Option<DeviceTypeId>,
    },
    LinkingDevice {
        selected: Option<DeviceId>,
        links: Vec<ZoneId>,
    },
    MovingZone,
    MovingDevice,
    ZoneSettings {
        zone: Option<ZoneId>,
    },
    DeviceSettings {
        device: Option<DeviceId>,
    },
}

impl Mode {
    /// Tool whose button toggles this state.
    #[must_use]
    pub fn tool(&self) -> Option<Tool> {
        Some(match self {
            Self::Idle => return None,
            Self::AddingZone => Tool::AddZone,
            Self::Building { .. } => Tool::Builder,
            Self::Painting { .. } => Tool::Painter,
            Self::Decorating { .. } => Tool::Decorator,
            Self::InstallingDevice { .. } => Tool::Installer,
            Self::LinkingDevice { .. } => Tool::Linker,
            Self::MovingZone => Tool::ZoneMover,
            Self::MovingDevice => Tool::DeviceMover,
            Self::ZoneSettings { .. } => Tool::ZoneSettings,
            Self::DeviceSettings { .. } => Tool::DeviceSettings,
        })
    }

    /// Node kinds that carry the interactive-transform affordance.
    #[must_use]
    pub fn movable_kinds(&self) -> &'static [NodeKind] {
        match self {
            Self::Building { .. } => &[NodeKind::Wall, NodeKind::Construction],
            Self::Decorating { .. } => &[NodeKind::Decoration],
            Self::MovingZone => &[NodeKind::Zone],
            Self::MovingDevice => &[NodeKind::Device],
            _ => &[],
        }
    }

    #[must_use]
    pub fn palette(&self) -> Option<Palette> {
        match self {
            Self::Building { .. } => Some(Palette::Textures(TextureKind::Construction)),
            Self::Painting { .. } => Some(Palette::Textures(TextureKind::Floor)),
            Self::Decorating { .. } => Some(Palette::Textures(TextureKind::Decoration)),
            Self::InstallingDevice { .. } => Some(Palette::DeviceTypes),
            _ => None,
        }
    }

    /// Texture slot of the active palette, if it is a texture palette.
    pub(super) fn texture_slot(&mut self) -> Option<(TextureKind, &mut Option<String>)> {
        match self {
            Self::Building { construction } => Some((TextureKind::Construction, construction)),
            Self::Painting { floor } => Some((TextureKind::Floor, floor)),
            Self::Decorating { decoration } => Some((TextureKind::Decoration, decoration)),
            _ => None,
        }
    }
}

/// Toggle `slot` to `value`, or clear it when `value` is already selected.
pub(super) fn toggle<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}
