#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::Router;
use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use redirect_relay::state::AppState;
use redirect_relay::tracker::TrackerNotifier;
use tokio::sync::mpsc;
use url::Url;

pub fn create_test_state(
    trackers: Vec<Url>,
    allowed_domains: Vec<String>,
    timeout_ms: u64,
) -> AppState {
    let notifier = TrackerNotifier::new(
        trackers,
        Duration::from_millis(timeout_ms),
        "test-relay".to_string(),
    )
    .unwrap();

    AppState::new(allowed_domains, notifier)
}

/// Spawns a local HTTP server that records the query string of every hit.
///
/// Returns the tracker base URL and a receiver yielding one raw query
/// string per notification.
pub async fn spawn_capture_tracker() -> (Url, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let app = Router::new().route(
        "/hit",
        get(move |RawQuery(query): RawQuery| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(query.unwrap_or_default());
                StatusCode::OK
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base = Url::parse(&format!("http://{addr}/hit")).unwrap();
    (base, rx)
}

/// Spawns a listener that accepts connections but never responds, to
/// exercise the notification timeout path.
pub async fn spawn_unresponsive_tracker() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    Url::parse(&format!("http://{addr}/")).unwrap()
}

/// Parses an `application/x-www-form-urlencoded` query string into a map.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
