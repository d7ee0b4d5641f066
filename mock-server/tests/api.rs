use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, sample_event, Event};
use tower::ServiceExt;

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- competition ---

#[tokio::test]
async fn get_competition_returns_xml() {
    let resp = app().oneshot(get("/meos?get=competition")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "text/xml; charset=utf-8"
    );
    let body = body_text(resp).await;
    assert!(body.contains("<competition date=\"2026-10-18\">Autumn Relay</competition>"));
}

#[tokio::test]
async fn get_competition_uses_seeded_event() {
    let event = Event {
        competition: "Night Sprint".to_string(),
        date: "2026-11-01".to_string(),
        competitors: Vec::new(),
    };
    let resp = app_with(event).oneshot(get("/meos?get=competition")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains(">Night Sprint</competition>"));
}

// --- lookup ---

#[tokio::test]
async fn lookup_shared_card_returns_every_leg() {
    let resp = app()
        .oneshot(get("/meos?lookup=competitor&card=8001234"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert_eq!(body.matches("<Competitor ").count(), 2);
    assert!(body.contains("<Status code=\"0\"/><Team id=\"42\">OK Linné 1</Team><Leg>2</Leg>"));
}

#[tokio::test]
async fn lookup_unknown_card_is_empty() {
    let resp = app()
        .oneshot(get("/meos?lookup=competitor&card=123"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!body_text(resp).await.contains("<Competitor"));
}

#[tokio::test]
async fn lookup_decodes_card_parameter() {
    let mut event = sample_event();
    event.competitors[0].card = "80 01".to_string();
    let resp = app_with(event)
        .oneshot(get("/meos?lookup=competitor&card=80+01"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Anna Berg"));
}

// --- bad requests ---

#[tokio::test]
async fn lookup_without_card_is_bad_request() {
    let resp = app().oneshot(get("/meos?lookup=competitor")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_query_is_bad_request() {
    let resp = app().oneshot(get("/meos?get=classes")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_paths_are_not_found() {
    let resp = app().oneshot(get("/mop")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
