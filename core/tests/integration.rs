//! Lookups and verification against the live mock info server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `MeosInfoService`
//! over real HTTP with the default `UreqTransport`, checking that request
//! building, charset handling, XML parsing and disambiguation line up with
//! what the server sends.

use std::net::SocketAddr;
use std::time::Duration;

use meos_core::{
    EndpointConsumer, ErrorKind, LookupOutcome, LookupResult, MeosInfoService, ServiceEndpoint, UreqTransport,
};

/// Start the mock server with its sample relay event on a random port.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn service_for(url: &str) -> MeosInfoService {
    MeosInfoService::with_transport(
        Some(ServiceEndpoint::parse(url).unwrap()),
        UreqTransport::with_timeout(Duration::from_secs(5)),
    )
}

fn found(bib: &str, leg: Option<&str>) -> LookupOutcome {
    LookupOutcome::Found(LookupResult {
        bib_number: bib.to_string(),
        relay_leg: leg.map(str::to_string),
    })
}

#[test]
fn relay_lookups() {
    let addr = start_server();
    let service = service_for(&format!("http://{addr}/meos"));

    // Step 1: card shared by two legs; the running one wins.
    assert_eq!(service.lookup("8001234").unwrap(), found("42", Some("2")));

    // Step 2: card used once.
    assert_eq!(service.lookup("8005555").unwrap(), found("7", Some("1")));

    // Step 3: card shared by two finished legs.
    assert_eq!(
        service.lookup("8009999").unwrap(),
        LookupOutcome::AmbiguousUnresolved { candidates: 2 }
    );

    // Step 4: competitor without a team.
    assert_eq!(service.lookup("8000001").unwrap(), LookupOutcome::NotFound);

    // Step 5: unknown card.
    assert_eq!(service.lookup("123").unwrap(), LookupOutcome::NotFound);
}

#[test]
fn verification_names_competition() {
    let addr = start_server();
    let service = service_for(&format!("http://{addr}/meos"));

    let first = service.verify();
    assert!(first.success, "{}", first.message);
    assert_eq!(first.message, "URL is valid. Found competition \"Autumn Relay\".");

    // Verifying again changes nothing.
    assert_eq!(service.verify(), first);
}

#[test]
fn wrong_path_is_http_error() {
    let addr = start_server();
    let service = service_for(&format!("http://{addr}/not-meos"));

    let err = service.lookup("8001234").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportHttpError { status: 404 });

    let outcome = service.verify();
    assert!(!outcome.success);
    assert!(outcome.message.contains("404"), "{}", outcome.message);
}

#[test]
fn unreachable_host_is_reported() {
    // Bind then drop to get a local port nobody listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let service = service_for(&format!("http://127.0.0.1:{port}/meos"));

    assert_eq!(service.lookup("8001234").unwrap_err().kind(), ErrorKind::TransportUnreachable);
    assert_eq!(
        service.lookup_card("8001234"),
        LookupOutcome::Failed {
            kind: ErrorKind::TransportUnreachable
        }
    );

    let outcome = service.verify();
    assert!(!outcome.success);
    assert!(outcome.message.starts_with("failed to reach"), "{}", outcome.message);
}

#[test]
fn endpoint_update_redirects_lookups() {
    let addr = start_server();
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let service = service_for(&format!("http://127.0.0.1:{port}/meos"));
    assert!(matches!(service.lookup_card("8001234"), LookupOutcome::Failed { .. }));

    service.endpoint_updated(Some(ServiceEndpoint::parse(&format!("http://{addr}/meos")).unwrap()));
    assert_eq!(service.lookup_card("8001234"), found("42", Some("2")));

    service.endpoint_updated(None);
    assert_eq!(
        service.lookup_card("8001234"),
        LookupOutcome::Failed {
            kind: ErrorKind::InvalidEndpoint
        }
    );
}
