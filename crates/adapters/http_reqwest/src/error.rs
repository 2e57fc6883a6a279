//! HTTP adapter error types.

use myhome_domain::error::{MyHomeError, RejectedError};

/// Errors specific to the HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed")]
    Request(#[source] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// The body did not have the expected shape.
    #[error("failed to decode response")]
    Decode(#[source] serde_json::Error),

    /// The backend refused the operation.
    #[error("rejected by backend: {0}")]
    Rejected(String),
}

impl HttpError {
    /// Convert into a [`MyHomeError`] for propagation across port
    /// boundaries: rejections stay rejections, the rest is transport.
    pub fn into_domain(self) -> MyHomeError {
        match self {
            Self::Rejected(message) => MyHomeError::Rejected(RejectedError::new(message)),
            other => MyHomeError::Transport(Box::new(other)),
        }
    }
}

impl From<HttpError> for MyHomeError {
    fn from(err: HttpError) -> Self {
        err.into_domain()
    }
}
