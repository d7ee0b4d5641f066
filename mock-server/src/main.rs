use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "2009".to_string());
    let event = match std::env::var("EVENT_FILE") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)?;
            mock_server::event_from_json(&raw).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?
        }
        Err(_) => mock_server::sample_event(),
    };
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("MOP info service listening on http://{addr}/meos");
    mock_server::run_with(listener, event).await
}
