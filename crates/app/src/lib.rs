//! # myhome-app
//!
//! Application layer: the floor-plan editor core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `SceneGateway`, `LocationGateway`, `DeviceGateway` (together `HomeGateway`)
//!   - `BrokerGateway` for the push-channel bootstrap
//!   - `ConsoleGateway` and `SkillGateway` for the admin and store pages
//!   - `Dialogs` and `Surface` for the user-facing toolkit
//! - Own the live **scene graph** and its load/save mapping
//! - Drive the **editor** mode state machine
//! - Apply **live updates** pushed over the channel
//! - Run bounded **polling** for readiness and install status
//!
//! ## Dependency rule
//! Depends on `myhome-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod admin;
pub mod editor;
pub mod live_update;
pub mod polling;
pub mod ports;
pub mod scene;
pub mod skill_store;
