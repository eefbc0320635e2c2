//! Error types for the order gateway.
//!
//! # Design
//! Every public gateway operation returns [`GatewayError`]. The variants map
//! one-to-one onto the ways a single call can end badly: the gateway was
//! configured with an unusable base URL, the payload could not be turned into
//! a request body, the network round trip failed, the service rejected the
//! order, or the service claimed success without the data that makes the
//! call complete. Low-level causes stay reachable through
//! [`std::error::Error::source`].

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors returned by `OrderGateway` operations.
#[must_use = "errors should be handled or propagated"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The base URL, environment name, or credentials are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The payload failed pre-send validation or could not be serialized.
    #[error("order field bad format: {message}")]
    FieldFormat {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The request never produced a usable HTTP exchange.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: TransportFault,
    },

    /// The service answered with `isSuccessful: false`.
    #[error("order rejected by service (HTTP {status}): {}", .reason.as_deref().unwrap_or("no reason given"))]
    BusinessRejection { status: u16, reason: Option<String> },

    /// The service answered with something that is not a complete success.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Coarse category of a [`GatewayError`], for callers that only branch on
/// the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidConfiguration,
    FieldFormat,
    Transport,
    BusinessRejection,
    MalformedResponse,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            GatewayError::FieldFormat { .. } => ErrorKind::FieldFormat,
            GatewayError::Transport { .. } => ErrorKind::Transport,
            GatewayError::BusinessRejection { .. } => ErrorKind::BusinessRejection,
            GatewayError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    pub(crate) fn field_format(message: impl Into<String>) -> Self {
        GatewayError::FieldFormat {
            message: message.into(),
            source: None,
        }
    }
}

/// Low-level failure reported by a [`crate::http::Transport`].
#[derive(Debug, Error)]
pub enum TransportFault {
    /// Connection refused, DNS failure, timeout, TLS failure, unreadable body.
    #[error(transparent)]
    Http(#[from] ureq::Error),

    /// The service answered with a non-2xx status and no failure envelope.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Failure raised by a host-provided transport.
    #[error("{0}")]
    Other(String),
}
