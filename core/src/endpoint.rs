//! The info service base URL and the holder that lets it change at runtime.
//!
//! # Design
//! `ServiceEndpoint` is an immutable, validated URL. `SharedEndpoint` stores
//! an `Arc` snapshot behind a lock; a lookup clones the `Arc` once and works
//! from that copy, so a concurrent configuration update can never hand it a
//! half-written URL.

use std::fmt;
use std::sync::{Arc, RwLock};

use url::Url;

use crate::error::{MeosError, Result};

/// Documented default of the `MeosUrl` option.
pub const DEFAULT_BASE_URL: &str = "http://localhost:2009/meos";

/// A validated base URL of a MeOS information server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base_url: Url,
}

impl ServiceEndpoint {
    /// Parse `base_url`, accepting only absolute `http`/`https` URLs.
    pub fn parse(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url.trim()).map_err(|e| MeosError::invalid_endpoint(base_url, e))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(MeosError::invalid_endpoint(
                    base_url,
                    format!("unsupported scheme {other:?}"),
                ))
            }
        }
        if url.host_str().is_none() {
            return Err(MeosError::invalid_endpoint(base_url, "URL has no host"));
        }
        Ok(Self { base_url: url })
    }

    /// Like `parse`, but treats a missing URL as `InvalidEndpoint`.
    pub fn from_option(base_url: Option<&str>) -> Result<Self> {
        match base_url {
            Some(url) => Self::parse(url),
            None => Err(MeosError::invalid_endpoint("", "info service URL must be configured")),
        }
    }

    pub fn as_str(&self) -> &str {
        self.base_url.as_str()
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that wants to hear about a new endpoint configuration.
///
/// `None` means the option was cleared; later lookups fail with
/// `InvalidEndpoint` until a new endpoint arrives.
pub trait EndpointConsumer {
    fn endpoint_updated(&self, endpoint: Option<ServiceEndpoint>);
}

/// Thread-safe, swappable endpoint configuration.
#[derive(Debug, Default)]
pub struct SharedEndpoint {
    current: RwLock<Option<Arc<ServiceEndpoint>>>,
}

impl SharedEndpoint {
    pub fn new(endpoint: Option<ServiceEndpoint>) -> Self {
        Self {
            current: RwLock::new(endpoint.map(Arc::new)),
        }
    }

    /// The endpoint in force right now, if any.
    pub fn snapshot(&self) -> Option<Arc<ServiceEndpoint>> {
        // A poisoned lock still holds a whole `Option<Arc<_>>`; writers never
        // leave it partially assigned.
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn replace(&self, endpoint: Option<ServiceEndpoint>) {
        let next = endpoint.map(Arc::new);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}

impl EndpointConsumer for SharedEndpoint {
    fn endpoint_updated(&self, endpoint: Option<ServiceEndpoint>) {
        tracing::debug!(endpoint = ?endpoint.as_ref().map(ServiceEndpoint::as_str), "endpoint updated");
        self.replace(endpoint);
    }
}
