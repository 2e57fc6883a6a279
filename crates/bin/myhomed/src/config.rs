//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `myhome.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use serde::Deserialize;

use myhome_adapter_http_reqwest::HttpConfig;
use myhome_adapter_mqtt::MqttConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dashboard backend.
    pub server: HttpConfig,
    /// Push channel.
    pub mqtt: MqttConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "myhomed=info,myhome=info".to_string(),
        }
    }
}

impl Config {
    /// Load `myhome.toml` (if present), apply environment overrides and
    /// validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable or malformed, if
    /// an environment override cannot be parsed, or if the resulting
    /// configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("myhome.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(val) = var("MYHOME_URL") {
            self.server.base_url = val;
        }
        if let Some(val) = var("MYHOME_MQTT_HOST") {
            self.mqtt.host = Some(val);
        }
        if let Some(val) = var("MYHOME_MQTT_PORT") {
            let port = val.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("MYHOME_MQTT_PORT must be a port number, got {val:?}"))
            })?;
            self.mqtt.port = Some(port);
        }
        if let Some(val) = var("MYHOME_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.server.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "base_url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.mqtt.port == Some(0) {
            return Err(ConfigError::Validation("mqtt port must be non-zero".to_string()));
        }
        if self.mqtt.keep_alive_secs != 0 && self.mqtt.keep_alive_secs < 5 {
            return Err(ConfigError::Validation(
                "keep_alive_secs must be 0 or at least 5".to_string(),
            ));
        }
        if self.mqtt.capacity == 0 {
            return Err(ConfigError::Validation("mqtt capacity must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
