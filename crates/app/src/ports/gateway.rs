//! Gateway ports: the backend HTTP contract as typed async calls.
//!
//! Every call resolves to `Ok` with the decoded response, or to a
//! [`MyHomeError`] that keeps transport failures (`Transport`) apart from
//! application rejections (`Rejected`).

use std::future::Future;

use myhome_domain::channel::BrokerEndpoint;
use myhome_domain::device::{DeviceLink, DeviceSettings, DeviceType, InstalledDevice, ToggleOutcome};
use myhome_domain::error::MyHomeError;
use myhome_domain::id::{DeviceId, DeviceTypeId, ZoneId};
use myhome_domain::skill::{InstallStatus, SkillAction, SkillRef, StoreSkill};
use myhome_domain::utility::UtilityAction;
use myhome_domain::zone::ZoneRecord;

/// Whole-scene load and save.
pub trait SceneGateway: Send + Sync {
    /// Fetch every zone with its children.
    fn load_scene(&self) -> impl Future<Output = Result<Vec<ZoneRecord>, MyHomeError>> + Send;

    /// Persist the whole scene; the backend replaces what it had.
    fn save_scene(
        &self,
        zones: Vec<ZoneRecord>,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;
}

/// Zone ("location") CRUD and synonyms.
pub trait LocationGateway: Send + Sync {
    /// Create a zone and return the id the server assigned.
    fn add_zone(&self, name: &str) -> impl Future<Output = Result<ZoneId, MyHomeError>> + Send;

    fn delete_zone(&self, zone: ZoneId) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    fn zone_synonyms(
        &self,
        zone: ZoneId,
    ) -> impl Future<Output = Result<Vec<String>, MyHomeError>> + Send;

    fn add_synonym(
        &self,
        zone: ZoneId,
        value: &str,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    fn delete_synonym(
        &self,
        zone: ZoneId,
        value: &str,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;
}

/// Device lifecycle, links, pairing and settings.
pub trait DeviceGateway: Send + Sync {
    /// Device types offered by the installed skills.
    fn device_types(&self) -> impl Future<Output = Result<Vec<DeviceType>, MyHomeError>> + Send;

    fn add_device(
        &self,
        zone: ZoneId,
        device_type: DeviceTypeId,
    ) -> impl Future<Output = Result<InstalledDevice, MyHomeError>> + Send;

    fn delete_device(
        &self,
        device: DeviceId,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    /// Move a device to another zone; the device keeps its id.
    fn change_location(
        &self,
        device: DeviceId,
        zone: ZoneId,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    fn device_links(
        &self,
        device: DeviceId,
    ) -> impl Future<Output = Result<Vec<DeviceLink>, MyHomeError>> + Send;

    fn add_link(
        &self,
        device: DeviceId,
        zone: ZoneId,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    fn remove_link(
        &self,
        device: DeviceId,
        zone: ZoneId,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    /// Toggle a device in display mode; may return a view to open.
    fn toggle(
        &self,
        device: DeviceId,
    ) -> impl Future<Output = Result<ToggleOutcome, MyHomeError>> + Send;

    /// Start searching for the physical unit of an unpaired device.
    fn pair(&self, device: DeviceId) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    fn device_settings(
        &self,
        device: DeviceId,
    ) -> impl Future<Output = Result<DeviceSettings, MyHomeError>> + Send;

    fn save_device_settings(
        &self,
        device: DeviceId,
        settings: &DeviceSettings,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    /// Raw icon image; `cache_bust` only varies the URL.
    fn device_icon(
        &self,
        device: DeviceId,
        cache_bust: i64,
    ) -> impl Future<Output = Result<Vec<u8>, MyHomeError>> + Send;
}

/// Everything the floor-plan editor talks to.
pub trait HomeGateway: SceneGateway + LocationGateway + DeviceGateway {}

impl<T: SceneGateway + LocationGateway + DeviceGateway> HomeGateway for T {}

/// Push-channel bootstrap.
pub trait BrokerGateway: Send + Sync {
    /// Broker host and port as configured on the backend (not yet resolved
    /// against the dashboard host).
    fn broker_endpoint(&self) -> impl Future<Output = Result<BrokerEndpoint, MyHomeError>> + Send;
}

/// Admin utilities.
pub trait ConsoleGateway: Send + Sync {
    /// Fire a utility action; the backend answers before the work is done.
    fn run_utility(
        &self,
        action: UtilityAction,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    /// Whether the assistant is back up after a utility action.
    fn are_you_ready(&self) -> impl Future<Output = Result<bool, MyHomeError>> + Send;
}

/// Skill store and per-skill actions.
pub trait SkillGateway: Send + Sync {
    fn store_catalog(&self) -> impl Future<Output = Result<Vec<StoreSkill>, MyHomeError>> + Send;

    fn install_skills(
        &self,
        skills: &[SkillRef],
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;

    fn install_status(
        &self,
        skill: &str,
    ) -> impl Future<Output = Result<InstallStatus, MyHomeError>> + Send;

    fn skill_action(
        &self,
        action: SkillAction,
        skill: &str,
    ) -> impl Future<Output = Result<(), MyHomeError>> + Send;
}
