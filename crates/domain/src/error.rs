//! Common error types used across the workspace.
//!
//! Every failure degrades to "the edit did not take effect". The variants keep
//! transport failures (no usable response) apart from application rejections
//! (the server answered with an `error` field or `success: false`).

use crate::palette::TextureKind;

/// Message shown when the backend cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "I just can't reach my servers!";

/// Top-level error for every layer of the workspace.
#[derive(Debug, thiserror::Error)]
pub enum MyHomeError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("request rejected by the server")]
    Rejected(#[from] RejectedError),

    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("another operation is already in progress")]
    Busy,

    #[error("gave up after {attempts} attempts")]
    TimedOut { attempts: u32 },
}

impl MyHomeError {
    /// Text suitable for a blocking alert.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::NotFound(err) => err.to_string(),
            Self::Rejected(err) => err.message.clone(),
            Self::Transport(_) => UNREACHABLE_MESSAGE.to_string(),
            Self::Busy | Self::TimedOut { .. } => self.to_string(),
        }
    }

    /// Whether the server answered but refused the operation.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Local precondition failures; no request was issued.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("edit mode is off")]
    EditModeOff,

    #[error("unknown {kind} texture `{texture}`")]
    UnknownTexture { kind: TextureKind, texture: String },

    #[error("unknown device type {0}")]
    UnknownDeviceType(u64),

    #[error("the active tool has no palette")]
    NoPalette,

    #[error("node is not movable in the current mode")]
    NotMovable,

    #[error("no side panel is open")]
    NoPanel,
}

/// A referenced zone, device or node is not part of the live scene.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The server refused the operation; `message` is what it said.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RejectedError {
    pub message: String,
}

impl RejectedError {
    /// Create a rejection carrying the server-supplied message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
