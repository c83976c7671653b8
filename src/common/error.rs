use std::time::Duration;
use thiserror::Error;

use crate::domains::signal::types::Uid;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Failed to connect to simulator at {endpoint}: {reason}")]
    ConnectionFailure { endpoint: String, reason: String },

    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("Protocol desync: requested uid {requested}, reply came from uid {received}")]
    ProtocolDesync { requested: Uid, received: Uid },

    #[error("No reply within {waited:?}")]
    Timeout { waited: Duration },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SignalError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        SignalError::MalformedPayload { reason: reason.into() }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SignalError::InvalidRequest { reason: reason.into() }
    }
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type SignalResult<T> = Result<T, SignalError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
