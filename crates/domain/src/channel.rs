//! Push-channel value types: broker endpoint and device update messages.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::id::DeviceId;

/// Topic carrying device status notifications.
pub const DEVICE_UPDATED_TOPIC: &str = "projectalice/devices/updated";

/// A raw message delivered by the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

impl ChannelMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}

/// Decoded payload of a [`DEVICE_UPDATED_TOPIC`] message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceUpdate {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: DeviceId,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl DeviceUpdate {
    /// Decode a payload; `None` for anything that is not `{type, id, ...}`.
    #[must_use]
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        serde_json::from_slice(payload).ok()
    }

    /// Whether this update reports a status change.
    #[must_use]
    pub fn is_status(&self) -> bool {
        self.kind == "status"
    }
}

/// Where the broker listens, as reported by `/home/getMqttConfig/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrokerEndpoint {
    pub host: String,
    #[serde(deserialize_with = "crate::lenient::port")]
    pub port: u16,
}

impl BrokerEndpoint {
    /// Rewrite a `localhost` host to the host the dashboard was reached on.
    #[must_use]
    pub fn resolve(mut self, dashboard_host: &str) -> Self {
        if self.host.eq_ignore_ascii_case("localhost") {
            self.host = dashboard_host.to_string();
        }
        self
    }
}
