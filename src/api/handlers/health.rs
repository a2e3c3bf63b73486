//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// The service is stateless, so the checks report effective configuration
/// rather than probing dependencies: tracker endpoint count and domain gate
/// state. Always 200 while the process is serving.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "trackers": { "status": "ok", "message": "2 endpoints configured" },
///     "domain_gate": { "status": "ok", "message": "1 allowed suffixes" }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let trackers = CheckStatus {
        status: "ok".to_string(),
        message: Some(format!(
            "{} endpoints configured",
            state.notifier.tracker_count()
        )),
    };

    let domain_gate = CheckStatus {
        status: "ok".to_string(),
        message: Some(if state.allowed_domains.is_empty() {
            "disabled".to_string()
        } else {
            format!("{} allowed suffixes", state.allowed_domains.len())
        }),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            trackers,
            domain_gate,
        },
    })
}
