//! Records and outcomes exchanged with callers.
//!
//! # Design
//! `LookupResult` serializes with the camelCase keys (`bibNumber`,
//! `relayLeg`) that start-list consumers already expect. `LookupOutcome`
//! keeps "nothing found" and "cannot decide" apart, since the latter points
//! at a data problem in the event rather than a missing runner.

use serde::Serialize;

use crate::error::ErrorKind;

/// One `<Competitor>` entry of a lookup response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitorRecord {
    pub card_number: String,
    /// `Team/@id`; `None` when the competitor has no team.
    pub team_bib_number: Option<String>,
    pub relay_leg: Option<String>,
    pub status_code: Option<String>,
}

impl CompetitorRecord {
    /// Status `"0"`: no finish result yet, so this leg is the one running.
    pub fn has_no_result(&self) -> bool {
        self.status_code.as_deref() == Some("0")
    }
}

/// Bib number and relay leg for a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub bib_number: String,
    pub relay_leg: Option<String>,
}

/// What a card lookup came to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found(LookupResult),
    NotFound,
    /// Several competitors carry the card and none is still running.
    AmbiguousUnresolved { candidates: usize },
    Failed { kind: ErrorKind },
}

impl LookupOutcome {
    pub fn found(&self) -> Option<&LookupResult> {
        match self {
            LookupOutcome::Found(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<LookupResult> {
        match self {
            LookupOutcome::Found(result) => Some(result),
            _ => None,
        }
    }
}

/// Result of checking an info service URL. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    pub success: bool,
    pub message: String,
}

impl VerificationOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_result_uses_camel_case_keys() {
        let result = LookupResult {
            bib_number: "42".to_string(),
            relay_leg: Some("2".to_string()),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"bibNumber": "42", "relayLeg": "2"}));
    }

    #[test]
    fn outcomes_are_tagged() {
        let found = LookupOutcome::Found(LookupResult {
            bib_number: "7".to_string(),
            relay_leg: None,
        });
        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            serde_json::json!({"outcome": "found", "bibNumber": "7", "relayLeg": null})
        );
        assert_eq!(
            serde_json::to_value(LookupOutcome::AmbiguousUnresolved { candidates: 3 }).unwrap(),
            serde_json::json!({"outcome": "ambiguous_unresolved", "candidates": 3})
        );
        assert_eq!(
            serde_json::to_value(LookupOutcome::Failed { kind: ErrorKind::MalformedResponse }).unwrap(),
            serde_json::json!({"outcome": "failed", "kind": "malformed_response"})
        );
    }

    #[test]
    fn only_found_yields_a_result() {
        assert!(LookupOutcome::NotFound.found().is_none());
        assert!(LookupOutcome::AmbiguousUnresolved { candidates: 2 }.into_found().is_none());
    }
}
