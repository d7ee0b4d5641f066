//! Blocking execution of `HttpRequest` values.

use std::time::Duration;

use crate::error::{MeosError, Result};
use crate::http::{HttpRequest, HttpResponse};

/// Default upper bound on one request, connect to last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Executes one GET and returns the response as data.
///
/// Implementations report connection-level failures as
/// `TransportUnreachable` and hand back every HTTP status, leaving status
/// interpretation to the caller.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// `Transport` backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        // Status codes come back as data so `HttpResponse::ensure_success`
        // can turn them into `TransportHttpError`.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let unreachable = |e: ureq::Error| MeosError::TransportUnreachable {
            url: request.url.clone(),
            reason: e.to_string(),
        };

        let mut builder = self.agent.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.call().map_err(unreachable)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_vec().map_err(unreachable)?;

        tracing::debug!(url = %request.url, status, bytes = body.len(), "GET completed");
        Ok(HttpResponse { status, headers, body })
    }
}
