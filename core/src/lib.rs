//! Blocking client core for the MeOS information service.
//!
//! # Overview
//! Resolves a punched card number to a team bib number and relay leg by
//! asking a MeOS information server (`?lookup=competitor&card=N`) and reading
//! its namespaced XML reply. A separate `?get=competition` request checks a
//! configured URL before it is put to use.
//!
//! # Design
//! - `MeosInfoClient` is stateless: it holds only a `ServiceEndpoint`.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`); a `Transport` runs the GET in
//!   between, so parsing and disambiguation are testable without a network.
//! - `MeosInfoService` adds a swappable endpoint and the default
//!   `UreqTransport` for hosts that poll from several threads.
//! - Missing and ambiguous competitors are `LookupOutcome` values, not
//!   errors.

pub mod cli;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod logging;
pub mod query;
pub mod resolver;
pub mod service;
pub mod transport;
pub mod types;
pub mod verify;
pub mod xml;

pub use client::MeosInfoClient;
pub use config::{MeosInfoConfig, MEOS_URL_OPTION};
pub use endpoint::{EndpointConsumer, ServiceEndpoint, SharedEndpoint, DEFAULT_BASE_URL};
pub use error::{ErrorKind, MeosError};
pub use http::{HttpRequest, HttpResponse};
pub use service::MeosInfoService;
pub use transport::{Transport, UreqTransport};
pub use types::{CompetitorRecord, LookupOutcome, LookupResult, VerificationOutcome};
pub use verify::verify_endpoint;
