//! Shared application state.

use std::sync::Arc;

use crate::tracker::TrackerNotifier;

/// Read-only state shared across request handlers.
///
/// Built once at startup from the configuration snapshot; requests never
/// mutate it, so no synchronization beyond `Arc` is needed.
#[derive(Clone)]
pub struct AppState {
    /// Hostname suffixes the domain gate admits. Empty disables the gate.
    pub allowed_domains: Arc<Vec<String>>,
    /// Shared tracker notifier (HTTP client + validated endpoint list).
    pub notifier: Arc<TrackerNotifier>,
}

impl AppState {
    pub fn new(allowed_domains: Vec<String>, notifier: TrackerNotifier) -> Self {
        Self {
            allowed_domains: Arc::new(allowed_domains),
            notifier: Arc::new(notifier),
        }
    }
}
