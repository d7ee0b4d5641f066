//! Error types for the MeOS information-service client.
//!
//! # Design
//! Only genuine failures live here. "No competitor for this card" and "several
//! competitors, none still running" are ordinary lookup outcomes (see
//! `LookupOutcome`), so callers can tell a missing runner from a broken
//! service without inspecting error strings.

use serde::Serialize;
use thiserror::Error;

/// Errors returned while building, executing or parsing a request.
#[derive(Debug, Error)]
pub enum MeosError {
    /// The base URL is missing or is not an absolute http(s) URL.
    #[error("invalid info service URL {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The host could not be reached, or the exchange broke off mid-way.
    #[error("failed to reach {url}: {reason}")]
    TransportUnreachable { url: String, reason: String },

    /// The server answered with a non-2xx status.
    #[error("info service returned HTTP {status}")]
    TransportHttpError { status: u16 },

    /// The body could not be decoded or is not well-formed XML.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Coarse classification of a `MeosError`, carried by `LookupOutcome::Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidEndpoint,
    TransportUnreachable,
    TransportHttpError { status: u16 },
    MalformedResponse,
}

impl MeosError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MeosError::InvalidEndpoint { .. } => ErrorKind::InvalidEndpoint,
            MeosError::TransportUnreachable { .. } => ErrorKind::TransportUnreachable,
            MeosError::TransportHttpError { status } => ErrorKind::TransportHttpError { status: *status },
            MeosError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    pub(crate) fn invalid_endpoint(url: impl Into<String>, reason: impl ToString) -> Self {
        MeosError::InvalidEndpoint {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn malformed(reason: impl ToString) -> Self {
        MeosError::MalformedResponse(reason.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MeosError>;
