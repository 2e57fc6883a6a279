//! # myhome-adapter-mqtt
//!
//! MQTT adapter: listens to the assistant's broker so the floor plan can
//! follow device state without reloading.
//!
//! ## Responsibilities
//! - Connect to the broker announced by the dashboard (see
//!   `myhome_app::ports::BrokerGateway`)
//! - Subscribe to the listener's topics on every (re)connect
//! - Forward incoming publishes as [`ChannelMessage`](myhome_domain::channel::ChannelMessage)s
//!   over a tokio channel
//!
//! ## Dependency rule
//! Same as other adapters: depends on `myhome-app` and `myhome-domain`.

mod config;
mod connection;
mod error;

pub use config::MqttConfig;
pub use connection::{ChannelConnection, bootstrap, connect};
pub use error::MqttError;
