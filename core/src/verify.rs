//! Configuration-time check of an info service URL.

use crate::client::MeosInfoClient;
use crate::endpoint::ServiceEndpoint;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::VerificationOutcome;

/// Ask `url` for `get=competition` and report what happened.
///
/// Every failure, including a missing or unparseable URL, becomes a
/// `VerificationOutcome` with `success == false`.
pub fn verify_endpoint<T: Transport>(transport: &T, url: Option<&str>) -> VerificationOutcome {
    match competition_at(transport, url) {
        Ok(name) => VerificationOutcome::ok(format!("URL is valid. Found competition \"{name}\".")),
        Err(e) => {
            tracing::debug!(url = ?url, error = %e, "info service URL verification failed");
            VerificationOutcome::failed(e.to_string())
        }
    }
}

fn competition_at<T: Transport>(transport: &T, url: Option<&str>) -> Result<String> {
    let endpoint = ServiceEndpoint::from_option(url)?;
    MeosInfoClient::new(endpoint).competition_name(transport)
}
