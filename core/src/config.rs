//! The `MeosUrl` configuration option.
//!
//! # Design
//! The host owns its configuration store; this module only describes the one
//! option the client consumes and how to turn its value into a
//! `ServiceEndpoint`. `MEOS_URL_OPTION` carries everything a settings UI
//! needs, including the verifier to run when the value changes.

use serde::Deserialize;

use crate::endpoint::{ServiceEndpoint, DEFAULT_BASE_URL};
use crate::error::Result;
use crate::transport::UreqTransport;
use crate::types::VerificationOutcome;
use crate::verify::verify_endpoint;

/// Metadata and validation hook of a string configuration option.
#[derive(Clone, Copy)]
pub struct ConfigOptionDefinition {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub mandatory: bool,
    pub default_value: &'static str,
    pub verifier: fn(Option<&str>) -> VerificationOutcome,
    /// Shown alongside the verifier's own message when verification fails.
    pub verification_failed_message: &'static str,
}

impl ConfigOptionDefinition {
    pub fn verify(&self, value: Option<&str>) -> VerificationOutcome {
        (self.verifier)(value)
    }
}

pub const MEOS_URL_OPTION: ConfigOptionDefinition = ConfigOptionDefinition {
    name: "MeosUrl",
    display_name: "Info service URL",
    description: "The base URL to where MeOS info service is up and running.",
    mandatory: true,
    default_value: DEFAULT_BASE_URL,
    verifier: verify_with_default_transport,
    verification_failed_message: "The Info service URL was not valid.",
};

fn verify_with_default_transport(url: Option<&str>) -> VerificationOutcome {
    verify_endpoint(&UreqTransport::new(), url)
}

/// The MeOS info service configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MeosInfoConfig {
    #[serde(rename = "MeosUrl", default = "default_url")]
    pub url: Option<String>,
}

fn default_url() -> Option<String> {
    Some(DEFAULT_BASE_URL.to_string())
}

impl Default for MeosInfoConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

impl MeosInfoConfig {
    pub fn endpoint(&self) -> Result<ServiceEndpoint> {
        ServiceEndpoint::from_option(self.url.as_deref())
    }
}
