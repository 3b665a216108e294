//! Error types for field configuration, transport, and submit outcomes.

use thiserror::Error;

/// A field configuration the renderer cannot work with.
///
/// These are caller errors: they surface at render time and the widget
/// never sees them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Target id must not be empty")]
    EmptyTargetId,

    #[error("Submit URL is required for field '{0}'")]
    MissingSubmitUrl(String),

    #[error("Collection editor for field '{0}' has no choices")]
    EmptyCollection(String),

    #[error("Invalid tag name: {0}")]
    InvalidTagName(String),
}

/// Failure of the underlying request mechanism (no HTTP status received).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected status {0}")]
    UnexpectedStatus(u16),
}

/// Why a submit did not succeed.
///
/// Field-level rejection (HTTP 422) is kept apart from other error statuses
/// so the host can show validation messages instead of a generic failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    #[error("Value rejected by server: {body}")]
    Rejected { body: String },

    #[error("Server responded with status {status}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SubmitFailure {
    /// Classify a non-success response.
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 422 {
            SubmitFailure::Rejected { body }
        } else {
            SubmitFailure::Status { status, body }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SubmitFailure::Rejected { .. } => Some(422),
            SubmitFailure::Status { status, .. } => Some(*status),
            SubmitFailure::Transport(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
