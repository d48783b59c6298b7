//! Error types for the roadcost client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used when neither the service nor the transport supplied one.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// A shared error type for every roadcost crate.
///
/// Network failures are split into two variants so callers can tell a
/// service-reported rejection (which carries the service's own wording) from
/// a transport problem such as a timeout.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RoadcostError {
    /// The request never produced an HTTP response (unreachable, timeout, broken body).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The service answered with a non-2xx status.
    ///
    /// `message` is already normalized: the `detail` field when the service
    /// sent one, otherwise a transport-level description of the status.
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A summary that breaks one of its invariants (negative cost, timestamps out of order).
    #[error("Invalid analysis summary: {0}")]
    InvalidSummary(String),

    /// The document did not settle within the polling window.
    #[error("Still processing: {0}")]
    Pending(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (reading the file to upload, writing a downloaded report)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RoadcostError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error, substituting the generic message for an empty one.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: non_empty_or_generic(message.into()),
        }
    }

    /// Creates a Service error, substituting the generic message for an empty one.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: non_empty_or_generic(message.into()),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an InvalidSummary error
    pub fn invalid_summary(message: impl Into<String>) -> Self {
        Self::InvalidSummary(message.into())
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    /// The string a user sees for this error.
    ///
    /// Network errors yield their normalized message verbatim, so a service
    /// `detail` such as "Unsupported file type" is shown exactly as sent.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message } | Self::Service { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status for service-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a service-reported failure
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if the service reported the entity as missing (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn non_empty_or_generic(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RoadcostError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RoadcostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for RoadcostError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for RoadcostError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, RoadcostError>`.
pub type Result<T> = std::result::Result<T, RoadcostError>;
