//! # Redirect Relay
//!
//! A single-endpoint redirect service with best-effort tracker notification,
//! built with Axum.
//!
//! A client requests `GET /r?rid=<id>&dest=<url>`; the service validates and
//! normalizes `dest`, optionally checks it against a domain allow-list,
//! notifies every configured tracker endpoint concurrently, and answers with
//! a 302 to the normalized destination.
//!
//! ## Architecture
//!
//! - **API layer** ([`api`]) - handlers, DTOs, and tracing middleware
//! - **Tracker layer** ([`tracker`]) - endpoint list builder and concurrent
//!   notifier
//! - **Utilities** ([`utils`]) - destination normalizer and domain gate
//!
//! ## Design Points
//!
//! - Only `http`/`https` destinations are accepted; `javascript:`, `data:`,
//!   `file:` and friends are rejected during normalization (open-redirect
//!   and XSS guard).
//! - Tracker notifications are best-effort: issued in parallel, each under
//!   its own timeout, failures logged and swallowed. The handler awaits all
//!   outcomes, bounding added latency to roughly one timeout interval.
//! - The process is stateless across requests; configuration is an
//!   immutable snapshot taken at startup.
//!
//! ## Quick Start
//!
//! ```bash
//! export TRACKER_URLS="https://t1.example/hit,https://t2.example/hit"
//! export ALLOWED_DOMAINS="example.com"   # optional domain gate
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod tracker;
pub mod utils;

pub use error::AppError;
pub use state::AppState;
