//! The `meos-lookup` command line.
//!
//! `run` does everything except printing and exiting, so the binary is a
//! thin wrapper and the dispatch can be driven against a live server.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::MeosInfoConfig;
use crate::service::MeosInfoService;
use crate::transport::UreqTransport;
use crate::types::LookupOutcome;
use crate::verify::verify_endpoint;

/// Exit code of a failed `verify`.
pub const EXIT_VERIFY_FAILED: u8 = 1;
/// Exit code of a `lookup` run in which at least one card failed.
pub const EXIT_LOOKUP_FAILED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "meos-lookup")]
#[command(about = "Look up bib numbers and relay legs from a MeOS info service")]
pub struct Cli {
    /// Info service base URL. Defaults to http://localhost:2009/meos.
    #[arg(long, env = "MEOS_URL", global = true)]
    pub url: Option<String>,

    #[arg(long, global = true, default_value = "10")]
    pub timeout_secs: u64,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the URL answers with a competition.
    Verify,
    /// Resolve card numbers to bib number and relay leg.
    Lookup {
        #[arg(required = true)]
        cards: Vec<String>,
    },
}

/// What a command printed to stdout, line by line, and how it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliReport {
    pub lines: Vec<String>,
    pub exit_code: u8,
}

pub fn run(cli: &Cli) -> CliReport {
    let config = match &cli.url {
        Some(url) => MeosInfoConfig { url: Some(url.clone()) },
        None => MeosInfoConfig::default(),
    };
    let transport = UreqTransport::with_timeout(Duration::from_secs(cli.timeout_secs));

    match &cli.command {
        Command::Verify => {
            // The raw value, so an unparseable URL is reported as such.
            let outcome = verify_endpoint(&transport, config.url.as_deref());
            CliReport {
                lines: vec![outcome.message],
                exit_code: if outcome.success { 0 } else { EXIT_VERIFY_FAILED },
            }
        }
        Command::Lookup { cards } => {
            // An unusable URL makes every lookup fail with InvalidEndpoint.
            let endpoint = match config.endpoint() {
                Ok(endpoint) => Some(endpoint),
                Err(e) => {
                    tracing::error!("{e}");
                    None
                }
            };
            let service = MeosInfoService::with_transport(endpoint, transport);
            lookup_cards(&service, cards)
        }
    }
}

fn lookup_cards(service: &MeosInfoService, cards: &[String]) -> CliReport {
    let mut lines = Vec::with_capacity(cards.len());
    let mut failures = 0usize;
    for card in cards {
        let outcome = service.lookup_card(card);
        if matches!(outcome, LookupOutcome::Failed { .. }) {
            failures += 1;
        }
        lines.push(serde_json::json!({ "card": card, "outcome": outcome }).to_string());
    }

    let exit_code = if failures == 0 {
        0
    } else {
        tracing::warn!(failures, total = cards.len(), "some lookups failed");
        EXIT_LOOKUP_FAILED
    };
    CliReport { lines, exit_code }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["meos-lookup", "lookup", "1", "2", "--url", "http://h/meos"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://h/meos"));
        assert_eq!(cli.timeout_secs, 10);
        match cli.command {
            Command::Lookup { cards } => assert_eq!(cards, ["1", "2"]),
            Command::Verify => panic!("expected lookup"),
        }
    }

    #[test]
    fn lookup_needs_a_card() {
        assert!(Cli::try_parse_from(["meos-lookup", "lookup"]).is_err());
    }

    #[test]
    fn unusable_url_fails_every_card() {
        let cli = Cli::try_parse_from(["meos-lookup", "--url", "not a url", "lookup", "1", "2"]).unwrap();
        let report = run(&cli);
        assert_eq!(report.exit_code, EXIT_LOOKUP_FAILED);
        let lines: Vec<serde_json::Value> = report
            .lines
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            lines,
            [
                serde_json::json!({ "card": "1", "outcome": { "outcome": "failed", "kind": "invalid_endpoint" } }),
                serde_json::json!({ "card": "2", "outcome": { "outcome": "failed", "kind": "invalid_endpoint" } }),
            ]
        );
    }

    #[test]
    fn unusable_url_fails_verification() {
        let cli = Cli::try_parse_from(["meos-lookup", "verify", "--url", "ftp://h/meos"]).unwrap();
        let report = run(&cli);
        assert_eq!(report.exit_code, EXIT_VERIFY_FAILED);
        assert_eq!(report.lines.len(), 1);
        assert!(report.lines[0].contains("unsupported scheme"), "{}", report.lines[0]);
    }
}
