//! Request building and response parsing for the MOP information server.
//!
//! # Design
//! `MeosInfoClient` holds only a `ServiceEndpoint` and carries no state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`; the `lookup` and `competition_name` helpers join the two
//! around a `Transport`. Failures propagate as `MeosError`; "no match" and
//! "ambiguous" are `LookupOutcome` values.

use crate::endpoint::ServiceEndpoint;
use crate::error::{MeosError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::query::{build_url, competition_params, lookup_competitor_params};
use crate::resolver::{competitor_from_element, resolve_lookup};
use crate::transport::Transport;
use crate::types::{CompetitorRecord, LookupOutcome};
use crate::xml::Document;

/// Stateless client for one MeOS information server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeosInfoClient {
    endpoint: ServiceEndpoint,
}

impl MeosInfoClient {
    pub fn new(endpoint: ServiceEndpoint) -> Self {
        Self { endpoint }
    }

    pub fn build_lookup_competitor(&self, card_number: &str) -> Result<HttpRequest> {
        let url = build_url(self.endpoint.as_str(), &lookup_competitor_params(card_number))?;
        Ok(HttpRequest::get(url))
    }

    pub fn build_get_competition(&self) -> Result<HttpRequest> {
        let url = build_url(self.endpoint.as_str(), &competition_params())?;
        Ok(HttpRequest::get(url))
    }

    /// Every `<Competitor>` in a lookup response, in document order.
    pub fn parse_competitors(&self, card_number: &str, response: &HttpResponse) -> Result<Vec<CompetitorRecord>> {
        let doc = parse_document(response)?;
        let competitors: Vec<CompetitorRecord> = doc
            .root()
            .find_all("Competitor")
            .into_iter()
            .map(|element| competitor_from_element(card_number, element))
            .collect();
        tracing::debug!(card = card_number, count = competitors.len(), "parsed competitors");
        Ok(competitors)
    }

    pub fn parse_lookup_competitor(&self, card_number: &str, response: &HttpResponse) -> Result<LookupOutcome> {
        let competitors = self.parse_competitors(card_number, response)?;
        Ok(resolve_lookup(card_number, &competitors))
    }

    /// Root-level `competition` text of a `get=competition` response.
    pub fn parse_get_competition(&self, response: &HttpResponse) -> Result<String> {
        let doc = parse_document(response)?;
        doc.root()
            .find_text("competition")
            .map(|name| name.trim().to_string())
            .ok_or_else(|| MeosError::malformed("response has no competition element"))
    }

    pub fn lookup<T: Transport>(&self, transport: &T, card_number: &str) -> Result<LookupOutcome> {
        let request = self.build_lookup_competitor(card_number)?;
        tracing::debug!(url = %request.url, "looking up card");
        let response = transport.execute(&request)?;
        self.parse_lookup_competitor(card_number, &response)
    }

    pub fn competition_name<T: Transport>(&self, transport: &T) -> Result<String> {
        let request = self.build_get_competition()?;
        let response = transport.execute(&request)?;
        self.parse_get_competition(&response)
    }
}

fn parse_document(response: &HttpResponse) -> Result<Document> {
    response.ensure_success()?;
    let body = response.decode_body()?;
    tracing::trace!(charset = %body.charset, "decoded response body");
    Document::parse(&body.text)
}
