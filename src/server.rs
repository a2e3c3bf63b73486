//! HTTP server initialization and runtime setup.
//!
//! Builds the tracker endpoint list and notifier from the configuration
//! snapshot, assembles shared state, and runs the Axum server.

use crate::config::Config;
use crate::routes::app_router;
use crate::state::AppState;
use crate::tracker::{TrackerNotifier, build_tracker_list};

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Validated, deduplicated tracker endpoint list
/// - Shared HTTP client for tracker notifications
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the bind fails, or
/// the server encounters a runtime error.
pub async fn run(config: Config) -> Result<()> {
    let trackers = build_tracker_list(&config.tracker_sources, config.require_secure_trackers);
    if trackers.is_empty() {
        tracing::warn!("No tracker endpoints configured; redirects will not be tracked");
    } else {
        tracing::info!("Tracking to {} endpoint(s)", trackers.len());
    }

    let notifier = TrackerNotifier::new(
        trackers,
        Duration::from_millis(config.tracker_timeout_ms),
        config.provenance_tag.clone(),
    )?;

    let state = AppState::new(config.allowed_domains.clone(), notifier);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
