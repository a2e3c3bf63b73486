//! Handler for the tracked redirect endpoint.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::domain_gate::is_allowed;
use crate::utils::url_normalizer::normalize_dest;

/// Query parameters for the redirect endpoint.
#[derive(Debug, Deserialize)]
pub struct RedirectParams {
    /// Opaque redirect id forwarded to trackers. Optional.
    pub rid: Option<String>,
    /// Raw destination URL or bare hostname. Required.
    pub dest: Option<String>,
}

/// HTML fallback body for the 302 response.
///
/// Renders `templates/redirect.html` with a meta-refresh and an anchor to
/// the destination. Askama escapes `dest`, so a destination containing
/// markup cannot inject into the page.
#[derive(Template, WebTemplate)]
#[template(path = "redirect.html")]
struct RedirectPage {
    dest: String,
}

/// Validates the destination and redirects to it, notifying trackers.
///
/// # Endpoint
///
/// `GET /r?rid=<id>&dest=<url>`
///
/// # Request Flow
///
/// 1. Reject absent or blank `dest` (400)
/// 2. Normalize `dest` to a canonical `http`/`https` URL (400 on failure)
/// 3. Check the host against the allow-list, if one is configured (403)
/// 4. Notify all configured trackers concurrently and wait for every
///    attempt to settle; failures are logged, never surfaced
/// 5. Respond 302 with `Location`, cache-suppression headers, and an
///    HTML fallback body
///
/// # Tracker Notification
///
/// Awaited before responding. Each tracker call has its own timeout and
/// the calls run in parallel, so the added latency is bounded by one
/// timeout interval regardless of tracker count.
///
/// # Errors
///
/// Returns 400 for a missing or invalid `dest`, 403 when the domain gate
/// rejects the destination host.
pub async fn redirect_handler(
    Query(params): Query<RedirectParams>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let raw = params
        .dest
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingDest)?;

    let dest = normalize_dest(raw).map_err(|e| {
        debug!("Rejected dest '{}': {}", raw, e);
        AppError::InvalidDest
    })?;

    let host = dest.host_str().ok_or(AppError::InvalidDest)?;
    if !is_allowed(host, &state.allowed_domains) {
        debug!("Domain gate rejected host '{}'", host);
        return Err(AppError::DomainNotAllowed);
    }

    let rid = params.rid.unwrap_or_default();
    state.notifier.notify_all(&rid, dest.as_str()).await;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(dest.as_str())
            .map_err(|e| AppError::Internal(e.into()))?,
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, max-age=0"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));

    let page = RedirectPage {
        dest: dest.as_str().to_string(),
    };

    Ok((StatusCode::FOUND, headers, page))
}
