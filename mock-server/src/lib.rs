use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const MOP_NAMESPACE: &str = "http://www.melin.nu/mop";

/// One runner entry the server reports for a card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Competitor {
    pub id: u32,
    pub card: String,
    pub name: String,
    /// `None` omits the `<Status>` element.
    pub status: Option<u32>,
    /// `None` omits the `<Team>` element.
    pub team_id: Option<String>,
    pub team_name: String,
    pub leg: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub competition: String,
    pub date: String,
    pub competitors: Vec<Competitor>,
}

pub type Db = Arc<RwLock<Event>>;

/// A two-team relay where team 42 hands card 8001234 from leg 1 (finished)
/// to leg 2 (running), and card 8009999 was used by two finished legs.
pub fn sample_event() -> Event {
    let runner = |id, card: &str, name: &str, status, team_id: Option<&str>, leg| Competitor {
        id,
        card: card.to_string(),
        name: name.to_string(),
        status,
        team_id: team_id.map(str::to_string),
        team_name: "OK Linné 1".to_string(),
        leg,
    };
    Event {
        competition: "Autumn Relay".to_string(),
        date: "2026-10-18".to_string(),
        competitors: vec![
            runner(1, "8001234", "Anna Berg", Some(1), Some("42"), Some(1)),
            runner(2, "8001234", "Bo Ek", Some(0), Some("42"), Some(2)),
            runner(3, "8005555", "Cecilia Lund", Some(0), Some("7"), Some(1)),
            runner(4, "8009999", "David Ahl", Some(1), Some("7"), Some(2)),
            runner(5, "8009999", "Eva Strand", Some(3), Some("7"), Some(3)),
            runner(6, "8000001", "Filip Nyman", Some(0), None, None),
        ],
    }
}

pub fn app() -> Router {
    app_with(sample_event())
}

pub fn app_with(event: Event) -> Router {
    let db: Db = Arc::new(RwLock::new(event));
    Router::new().route("/meos", get(info_service)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, event: Event) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(event)).await
}

async fn info_service(State(db): State<Db>, Query(params): Query<HashMap<String, String>>) -> Response {
    let event = db.read().await;
    let get = params.get("get").map(String::as_str);
    let lookup = params.get("lookup").map(String::as_str);

    match (get, lookup, params.get("card")) {
        (Some("competition"), _, _) => xml(competition_xml(&event)),
        (_, Some("competitor"), Some(card)) => xml(competitors_xml(&event, card)),
        _ => (StatusCode::BAD_REQUEST, "unsupported query").into_response(),
    }
}

/// Read an event in the `EVENT_FILE` format: `Event` as JSON, optional
/// fields `null` or left out.
pub fn event_from_json(raw: &str) -> Result<Event, serde_json::Error> {
    serde_json::from_str(raw)
}

fn xml(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], body).into_response()
}

pub fn competition_xml(event: &Event) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<MOPComplete xmlns=\"{MOP_NAMESPACE}\"><competition date=\"{}\">{}</competition></MOPComplete>",
        escape(&event.date),
        escape(&event.competition)
    )
}

pub fn competitors_xml(event: &Event, card: &str) -> String {
    let mut out = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<MOPComplete xmlns=\"{MOP_NAMESPACE}\">");
    for c in event.competitors.iter().filter(|c| c.card == card) {
        out.push_str(&format!("<Competitor id=\"{}\"><Name>{}</Name>", c.id, escape(&c.name)));
        if let Some(status) = c.status {
            out.push_str(&format!("<Status code=\"{status}\"/>"));
        }
        if let Some(team_id) = &c.team_id {
            out.push_str(&format!("<Team id=\"{}\">{}</Team>", escape(team_id), escape(&c.team_name)));
        }
        if let Some(leg) = c.leg {
            out.push_str(&format!("<Leg>{leg}</Leg>"));
        }
        out.push_str("</Competitor>");
    }
    out.push_str("</MOPComplete>");
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
