//! Tracker integration: endpoint list construction and notification fan-out.
//!
//! - [`endpoints`] - merges and validates tracker base URLs from configuration
//! - [`notifier`] - concurrent, timeout-bounded, best-effort notifications

pub mod endpoints;
pub mod notifier;

pub use endpoints::build_tracker_list;
pub use notifier::TrackerNotifier;
