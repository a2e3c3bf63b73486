//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup into an immutable snapshot and
//! validated before the server starts. Handlers never read the environment.
//!
//! ## Tracker Sources
//!
//! Tracker base URLs can come from several keys, merged in priority order:
//!
//! ```bash
//! export TRACKER_URLS="https://t1.example/hit,https://t2.example/hit"
//! export TRACKER_URL="https://legacy.example/hit"       # legacy scalar
//! export TRACKER_URL_1="https://slot1.example/hit"      # legacy slots 1..20
//! export ADDITIONAL_TRACKERS="https://extra.example/hit"
//! ```
//!
//! Duplicate entries across sources collapse to one, first occurrence wins.
//!
//! ## Optional Variables
//!
//! - `ALLOWED_DOMAINS` - comma-separated hostname suffixes; empty = gate off
//! - `TRACKER_TIMEOUT_MS` - per-tracker call timeout (default: 500)
//! - `REQUIRE_SECURE_TRACKERS` - drop non-https trackers (default: true)
//! - `TRACKER_VIA` - provenance tag sent as `via=` (default: `redirect-relay`)
//! - `LISTEN` - bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;

/// Maximum number of `TRACKER_URL_<n>` legacy slots scanned.
pub const MAX_TRACKER_SLOTS: usize = 20;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Hostname suffixes the domain gate admits. Empty disables the gate.
    pub allowed_domains: Vec<String>,
    /// Raw tracker URL candidates, in source priority order. Validated and
    /// deduplicated by the tracker list builder at startup.
    pub tracker_sources: TrackerSources,
    /// Per-tracker notification timeout in milliseconds
    /// (`TRACKER_TIMEOUT_MS`, default: 500).
    pub tracker_timeout_ms: u64,
    /// When true, non-https tracker URLs are dropped at list-build time.
    /// Tracker notifications carry the destination and rid in the query
    /// string, so plaintext transport is refused by default.
    pub require_secure_trackers: bool,
    /// Provenance tag appended to every notification as `via=`.
    pub provenance_tag: String,
}

/// Raw tracker URL candidates collected from the environment.
///
/// Kept unvalidated here; [`crate::tracker::endpoints::build_tracker_list`]
/// turns them into the deduplicated endpoint set.
#[derive(Debug, Clone, Default)]
pub struct TrackerSources {
    /// `TRACKER_URLS` - comma-separated primary list.
    pub combined: Option<String>,
    /// `TRACKER_URL` - legacy single value.
    pub legacy: Option<String>,
    /// `TRACKER_URL_1..20` - legacy numbered slots, in slot order.
    pub numbered: Vec<String>,
    /// `ADDITIONAL_TRACKERS` - extra comma-separated list.
    pub additional: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let allowed_domains = env::var("ALLOWED_DOMAINS")
            .map(|v| split_comma_list(&v))
            .unwrap_or_default();

        let tracker_sources = Self::load_tracker_sources();

        let tracker_timeout_ms = env::var("TRACKER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        let require_secure_trackers = env::var("REQUIRE_SECURE_TRACKERS")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        let provenance_tag =
            env::var("TRACKER_VIA").unwrap_or_else(|_| "redirect-relay".to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            allowed_domains,
            tracker_sources,
            tracker_timeout_ms,
            require_secure_trackers,
            provenance_tag,
        })
    }

    /// Collects tracker URL candidates from all supported keys.
    ///
    /// Priority order (first occurrence wins at dedup time):
    /// 1. `TRACKER_URLS` comma list
    /// 2. `TRACKER_URL` legacy scalar
    /// 3. `TRACKER_URL_1..20` legacy numbered slots
    /// 4. `ADDITIONAL_TRACKERS` comma list
    fn load_tracker_sources() -> TrackerSources {
        let numbered = (1..=MAX_TRACKER_SLOTS)
            .filter_map(|n| env::var(format!("TRACKER_URL_{n}")).ok())
            .collect();

        TrackerSources {
            combined: env::var("TRACKER_URLS").ok(),
            legacy: env::var("TRACKER_URL").ok(),
            numbered,
            additional: env::var("ADDITIONAL_TRACKERS").ok(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tracker_timeout_ms` is outside 50..=10000
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not in `host:port` form
    /// - `provenance_tag` is empty
    pub fn validate(&self) -> Result<()> {
        if !(50..=10_000).contains(&self.tracker_timeout_ms) {
            anyhow::bail!(
                "TRACKER_TIMEOUT_MS must be between 50 and 10000, got {}",
                self.tracker_timeout_ms
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.provenance_tag.trim().is_empty() {
            anyhow::bail!("TRACKER_VIA must not be empty");
        }

        Ok(())
    }

    /// Returns whether the domain gate is active.
    pub fn is_gate_enabled(&self) -> bool {
        !self.allowed_domains.is_empty()
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if self.allowed_domains.is_empty() {
            tracing::info!("  Domain gate: disabled");
        } else {
            tracing::info!("  Domain gate: {} suffixes", self.allowed_domains.len());
        }

        tracing::info!("  Tracker timeout: {}ms", self.tracker_timeout_ms);
        tracing::info!(
            "  Secure trackers required: {}",
            self.require_secure_trackers
        );
        tracing::info!("  Provenance tag: {}", self.provenance_tag);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated value, trimming entries and dropping blanks.
pub fn split_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
