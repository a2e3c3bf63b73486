//! Best-effort concurrent tracker notification.
//!
//! Every redirect fans out one GET per configured tracker endpoint. Calls
//! run in parallel, each under its own timeout, and every outcome is logged
//! and swallowed: a slow or broken tracker must never fail or delay the
//! redirect beyond one timeout interval.
//!
//! Completion discipline: [`TrackerNotifier::notify_all`] waits until every
//! attempt has settled (success, transport error, or timeout). The handler
//! awaits it before responding, trading up to one timeout interval of added
//! latency for delivery confidence. No retries.

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

/// Outcome of a single tracker notification attempt. Never propagated as an
/// error; consumed by the logging sink in [`TrackerNotifier::notify_all`].
#[derive(Debug)]
enum NotifyOutcome {
    Delivered(reqwest::StatusCode),
    TransportError(reqwest::Error),
    TimedOut,
}

/// Issues redirect notifications to the configured tracker endpoints.
///
/// Holds the shared HTTP client, the validated endpoint list, the per-call
/// timeout, and the provenance tag. Cheap to clone via [`crate::AppState`];
/// all fields are read-only after construction.
pub struct TrackerNotifier {
    client: reqwest::Client,
    trackers: Vec<Url>,
    timeout: Duration,
    provenance_tag: String,
}

impl TrackerNotifier {
    /// Creates a notifier over the given endpoint list.
    ///
    /// The client carries the same timeout as the per-call
    /// `tokio::time::timeout` guard, so a hung connection is bounded twice.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        trackers: Vec<Url>,
        timeout: Duration,
        provenance_tag: String,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("redirect-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            trackers,
            timeout,
            provenance_tag,
        })
    }

    /// Number of configured tracker endpoints.
    pub fn tracker_count(&self) -> usize {
        self.trackers.len()
    }

    /// Notifies every tracker of a redirect, concurrently.
    ///
    /// Returns once all attempts have settled. Individual failures and
    /// timeouts are logged at WARN and swallowed; this function never fails
    /// and never takes longer than roughly one timeout interval, regardless
    /// of tracker count.
    pub async fn notify_all(&self, rid: &str, dest: &str) {
        if self.trackers.is_empty() {
            return;
        }

        let calls: Vec<_> = self
            .trackers
            .iter()
            .map(|base| {
                let url = self.notification_url(base, rid, dest);
                async move { (base, self.notify_one(url).await) }
            })
            .collect();

        for (base, outcome) in futures::future::join_all(calls).await {
            match outcome {
                NotifyOutcome::Delivered(status) => {
                    debug!("Tracker {} responded {}", base, status);
                }
                NotifyOutcome::TransportError(e) => {
                    warn!("Tracker {} notification failed: {}", base, e);
                }
                NotifyOutcome::TimedOut => {
                    warn!(
                        "Tracker {} notification timed out after {:?}",
                        base, self.timeout
                    );
                }
            }
        }
    }

    /// Builds the full notification URL for one tracker endpoint.
    ///
    /// Appends `action=track`, `rid`, `dest`, and `via=<provenance tag>` to
    /// the endpoint's existing query string. `Url::query_pairs_mut` handles
    /// the `?` vs `&` separator and percent-encodes the values.
    fn notification_url(&self, base: &Url, rid: &str, dest: &str) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .append_pair("action", "track")
            .append_pair("rid", rid)
            .append_pair("dest", dest)
            .append_pair("via", &self.provenance_tag);
        url
    }

    /// Issues a single notification GET under the per-call timeout.
    async fn notify_one(&self, url: Url) -> NotifyOutcome {
        let request = self.client.get(url.as_str()).send();

        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => NotifyOutcome::Delivered(response.status()),
            Ok(Err(e)) => NotifyOutcome::TransportError(e),
            Err(_) => NotifyOutcome::TimedOut,
        }
    }
}
