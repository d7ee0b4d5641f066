//! Turning the `<Competitor>` entries for one card into a single answer.
//!
//! A relay team may hand the same card from leg to leg, so a lookup can
//! return several competitors. The one still running (status `"0"`) is the
//! leg that just punched.

use crate::types::{CompetitorRecord, LookupOutcome, LookupResult};
use crate::xml::Element;

/// Which candidate, if any, a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    None,
    Selected(&'a CompetitorRecord),
    Ambiguous { candidates: usize },
}

/// Read the fields the resolver needs from one `<Competitor>` element.
pub fn competitor_from_element(card_number: &str, element: &Element) -> CompetitorRecord {
    let team_bib_number = element.find("Team").map(|team| {
        team.attribute("id").map(str::trim).unwrap_or_default().to_string()
    });
    let relay_leg = element
        .find_text("Leg")
        .map(|leg| leg.trim().to_string())
        .filter(|leg| !leg.is_empty());
    let status_code = element
        .find("Status")
        .and_then(|status| status.attribute("code"))
        .map(|code| code.trim().to_string());

    CompetitorRecord {
        card_number: card_number.to_string(),
        team_bib_number,
        relay_leg,
        status_code,
    }
}

/// Pick the single candidate a card refers to.
///
/// One candidate is taken as-is. Among several, the first in document order
/// with no result yet wins; if none qualifies the answer is `Ambiguous`.
pub fn resolve(candidates: &[CompetitorRecord]) -> Resolution<'_> {
    match candidates {
        [] => Resolution::None,
        [only] => Resolution::Selected(only),
        many => many
            .iter()
            .find(|candidate| candidate.has_no_result())
            .map(Resolution::Selected)
            .unwrap_or(Resolution::Ambiguous {
                candidates: many.len(),
            }),
    }
}

/// Resolve `candidates` and shape the answer for the caller.
pub fn resolve_lookup(card_number: &str, candidates: &[CompetitorRecord]) -> LookupOutcome {
    let selected = match resolve(candidates) {
        Resolution::None => {
            tracing::info!(card = card_number, "no competitor found");
            return LookupOutcome::NotFound;
        }
        Resolution::Ambiguous { candidates } => {
            tracing::warn!(
                card = card_number,
                candidates,
                "several competitors share the card and all have results"
            );
            return LookupOutcome::AmbiguousUnresolved { candidates };
        }
        Resolution::Selected(selected) => selected,
    };

    if candidates.len() > 1 {
        tracing::info!(
            card = card_number,
            candidates = candidates.len(),
            leg = ?selected.relay_leg,
            "picked the competitor without a result"
        );
    }

    match selected.team_bib_number.as_deref() {
        Some(bib) if !bib.is_empty() => LookupOutcome::Found(LookupResult {
            bib_number: bib.to_string(),
            relay_leg: selected.relay_leg.clone(),
        }),
        Some(_) => {
            tracing::warn!(card = card_number, "team has no id, cannot derive a bib number");
            LookupOutcome::NotFound
        }
        None => {
            tracing::debug!(card = card_number, "competitor has no team");
            LookupOutcome::NotFound
        }
    }
}
