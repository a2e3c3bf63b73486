//! Tracker endpoint list construction.
//!
//! Merges tracker base URLs from every supported configuration source into a
//! deduplicated, order-preserving list of validated endpoints. Invalid
//! entries are logged and dropped; a broken tracker entry must never prevent
//! the service from starting or redirecting.

use std::collections::HashSet;

use tracing::warn;
use url::Url;

use crate::config::{TrackerSources, split_comma_list};
use crate::utils::url_normalizer::normalize_dest;

/// Builds the validated tracker endpoint set from raw configuration sources.
///
/// Candidates are taken in source priority order (`TRACKER_URLS`, then
/// `TRACKER_URL`, then the numbered slots, then `ADDITIONAL_TRACKERS`), each
/// trimmed, given an `https://` default scheme when scheme-less, and parsed
/// as an absolute `http`/`https` URL. Duplicates across sources collapse to
/// the first occurrence, order preserved.
///
/// When `require_secure` is set, `http` endpoints are dropped: notification
/// URLs carry the destination and rid in the query string, which should not
/// cross the network in plaintext.
pub fn build_tracker_list(sources: &TrackerSources, require_secure: bool) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut trackers = Vec::new();

    for candidate in collect_candidates(sources) {
        let url = match normalize_dest(&candidate) {
            Ok(url) => url,
            Err(e) => {
                warn!("Dropping invalid tracker URL '{}': {}", candidate, e);
                continue;
            }
        };

        if require_secure && url.scheme() != "https" {
            warn!("Dropping insecure tracker URL '{}' (https required)", candidate);
            continue;
        }

        if seen.insert(url.as_str().to_string()) {
            trackers.push(url);
        }
    }

    trackers
}

/// Flattens all sources into one candidate sequence in priority order.
fn collect_candidates(sources: &TrackerSources) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Some(combined) = &sources.combined {
        candidates.extend(split_comma_list(combined));
    }

    if let Some(legacy) = &sources.legacy {
        candidates.push(legacy.trim().to_string());
    }

    candidates.extend(sources.numbered.iter().map(|s| s.trim().to_string()));

    if let Some(additional) = &sources.additional {
        candidates.extend(split_comma_list(additional));
    }

    candidates.retain(|c| !c.is_empty());
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(list: &[Url]) -> Vec<&str> {
        list.iter().map(Url::as_str).collect()
    }

    #[test]
    fn test_empty_sources() {
        let sources = TrackerSources::default();
        assert!(build_tracker_list(&sources, true).is_empty());
    }

    #[test]
    fn test_combined_list() {
        let sources = TrackerSources {
            combined: Some("https://a.test?x=1, https://b.test".to_string()),
            ..Default::default()
        };

        let list = build_tracker_list(&sources, true);
        assert_eq!(urls(&list), vec!["https://a.test/?x=1", "https://b.test/"]);
    }

    #[test]
    fn test_dedup_across_sources_first_wins() {
        let sources = TrackerSources {
            combined: Some("https://a.test?x=1,https://b.test".to_string()),
            legacy: Some("https://a.test?x=1".to_string()),
            ..Default::default()
        };

        let list = build_tracker_list(&sources, true);
        assert_eq!(urls(&list), vec!["https://a.test/?x=1", "https://b.test/"]);
    }

    #[test]
    fn test_source_priority_order() {
        let sources = TrackerSources {
            combined: Some("https://first.test".to_string()),
            legacy: Some("https://second.test".to_string()),
            numbered: vec![
                "https://third.test".to_string(),
                "https://fourth.test".to_string(),
            ],
            additional: Some("https://fifth.test".to_string()),
        };

        let list = build_tracker_list(&sources, true);
        assert_eq!(
            urls(&list),
            vec![
                "https://first.test/",
                "https://second.test/",
                "https://third.test/",
                "https://fourth.test/",
                "https://fifth.test/",
            ]
        );
    }

    #[test]
    fn test_scheme_defaulted() {
        let sources = TrackerSources {
            legacy: Some("tracker.example/hit".to_string()),
            ..Default::default()
        };

        let list = build_tracker_list(&sources, true);
        assert_eq!(urls(&list), vec!["https://tracker.example/hit"]);
    }

    #[test]
    fn test_invalid_entries_dropped() {
        let sources = TrackerSources {
            combined: Some("https://ok.test,ftp://nope.test,:::,   ".to_string()),
            ..Default::default()
        };

        let list = build_tracker_list(&sources, true);
        assert_eq!(urls(&list), vec!["https://ok.test/"]);
    }

    #[test]
    fn test_insecure_dropped_when_required() {
        let sources = TrackerSources {
            combined: Some("http://plain.test,https://secure.test".to_string()),
            ..Default::default()
        };

        let list = build_tracker_list(&sources, true);
        assert_eq!(urls(&list), vec!["https://secure.test/"]);
    }

    #[test]
    fn test_insecure_kept_when_not_required() {
        let sources = TrackerSources {
            combined: Some("http://plain.test,https://secure.test".to_string()),
            ..Default::default()
        };

        let list = build_tracker_list(&sources, false);
        assert_eq!(
            urls(&list),
            vec!["http://plain.test/", "https://secure.test/"]
        );
    }

    #[test]
    fn test_equivalent_forms_dedup() {
        // Scheme-less and explicit forms normalize to the same endpoint.
        let sources = TrackerSources {
            combined: Some("https://a.test/hit".to_string()),
            legacy: Some("a.test/hit".to_string()),
            ..Default::default()
        };

        let list = build_tracker_list(&sources, true);
        assert_eq!(urls(&list), vec!["https://a.test/hit"]);
    }
}
