//! MQTT adapter error types.

use myhome_domain::error::MyHomeError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The event loop task stopped abnormally.
    #[error("MQTT event loop stopped")]
    EventLoop(#[source] tokio::task::JoinError),
}

impl MqttError {
    /// Convert into a [`MyHomeError::Transport`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> MyHomeError {
        MyHomeError::Transport(Box::new(self))
    }
}

impl From<MqttError> for MyHomeError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
