//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the editor core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod dialogs;
pub mod gateway;
pub mod surface;

pub use dialogs::Dialogs;
pub use gateway::{
    BrokerGateway, ConsoleGateway, DeviceGateway, HomeGateway, LocationGateway, SceneGateway,
    SkillGateway,
};
pub use surface::{DevicePanel, Effect, Pairing, Palette, Panel, SaveState, Surface, ZonePanel};
