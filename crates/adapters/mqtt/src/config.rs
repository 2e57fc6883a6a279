//! MQTT channel configuration.

use std::time::Duration;

use serde::Deserialize;

use myhome_domain::channel::BrokerEndpoint;

/// Configuration for the push channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Broker host; overrides the one announced by the dashboard.
    pub host: Option<String>,
    /// Broker port; overrides the one announced by the dashboard.
    pub port: Option<u16>,
    /// MQTT client identifier.
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pending requests buffered between the client and its event loop.
    pub capacity: usize,
    /// Pause before reconnecting after the connection dropped, in seconds.
    pub reconnect_delay_secs: u64,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            client_id: "ProjectAliceInterface".to_string(),
            keep_alive_secs: 30,
            capacity: 16,
            reconnect_delay_secs: 5,
        }
    }
}

impl MqttConfig {
    /// Apply the configured overrides to the announced endpoint.
    #[must_use]
    pub fn endpoint(&self, announced: BrokerEndpoint) -> BrokerEndpoint {
        BrokerEndpoint {
            host: self.host.clone().unwrap_or(announced.host),
            port: self.port.unwrap_or(announced.port),
        }
    }

    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }

    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}
