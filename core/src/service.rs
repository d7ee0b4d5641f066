//! Host-facing entry point: a swappable endpoint plus a transport.
//!
//! # Design
//! The host builds one `MeosInfoService`, shares it between whatever threads
//! poll for punches, and pushes configuration changes through
//! `EndpointConsumer`. Every call snapshots the endpoint once, so an update
//! racing a lookup affects only later calls.

use crate::client::MeosInfoClient;
use crate::endpoint::{EndpointConsumer, ServiceEndpoint, SharedEndpoint};
use crate::error::{MeosError, Result};
use crate::transport::{Transport, UreqTransport};
use crate::types::{LookupOutcome, VerificationOutcome};
use crate::verify::verify_endpoint;

#[derive(Debug)]
pub struct MeosInfoService<T = UreqTransport> {
    endpoint: SharedEndpoint,
    transport: T,
}

impl MeosInfoService<UreqTransport> {
    pub fn new(endpoint: Option<ServiceEndpoint>) -> Self {
        Self::with_transport(endpoint, UreqTransport::new())
    }
}

impl<T: Transport> MeosInfoService<T> {
    pub fn with_transport(endpoint: Option<ServiceEndpoint>, transport: T) -> Self {
        Self {
            endpoint: SharedEndpoint::new(endpoint),
            transport,
        }
    }

    /// Client bound to the endpoint in force right now.
    pub fn client(&self) -> Result<MeosInfoClient> {
        let endpoint = self
            .endpoint
            .snapshot()
            .ok_or_else(|| MeosError::invalid_endpoint("", "info service URL must be configured"))?;
        Ok(MeosInfoClient::new(ServiceEndpoint::clone(&endpoint)))
    }

    /// Look up `card_number`, propagating transport and parse failures.
    pub fn lookup(&self, card_number: &str) -> Result<LookupOutcome> {
        self.client()?.lookup(&self.transport, card_number)
    }

    /// Look up `card_number`, logging a failure and folding it into
    /// `LookupOutcome::Failed` so a polling loop can carry on.
    pub fn lookup_card(&self, card_number: &str) -> LookupOutcome {
        match self.lookup(card_number) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(card = card_number, error = %e, "card lookup failed");
                LookupOutcome::Failed { kind: e.kind() }
            }
        }
    }

    /// Verify the endpoint in force right now.
    pub fn verify(&self) -> VerificationOutcome {
        let snapshot = self.endpoint.snapshot();
        verify_endpoint(&self.transport, snapshot.as_deref().map(ServiceEndpoint::as_str))
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T> EndpointConsumer for MeosInfoService<T> {
    fn endpoint_updated(&self, endpoint: Option<ServiceEndpoint>) {
        self.endpoint.endpoint_updated(endpoint);
    }
}
