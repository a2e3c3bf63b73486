//! Utility functions for destination validation.
//!
//! - [`url_normalizer`] - Destination URL normalization and sanitization
//! - [`domain_gate`] - Allow-list check on the normalized destination host

pub mod domain_gate;
pub mod url_normalizer;
