//! Destination domain allow-list check.

/// Checks a destination host against the configured allow-list.
///
/// An empty allow-list disables the gate (every host is allowed). Otherwise
/// the host must match some entry exactly or be a subdomain of it:
/// `example.com` admits `example.com` and `sub.example.com`, but not
/// `notexample.com` or `example.com.evil.com`.
///
/// Comparison is case-insensitive on both sides. Entries are trimmed and
/// blank entries are ignored.
pub fn is_allowed(host: &str, allow_list: &[String]) -> bool {
    if allow_list.is_empty() {
        return true;
    }

    let host = host.to_ascii_lowercase();

    allow_list.iter().any(|entry| {
        let entry = entry.trim().to_ascii_lowercase();
        if entry.is_empty() {
            return false;
        }
        host == entry || host.ends_with(&format!(".{entry}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_list_allows_everything() {
        assert!(is_allowed("anything.example", &[]));
    }

    #[test]
    fn test_exact_match() {
        assert!(is_allowed("example.com", &list(&["example.com"])));
    }

    #[test]
    fn test_subdomain_match() {
        assert!(is_allowed("sub.example.com", &list(&["example.com"])));
        assert!(is_allowed("a.b.example.com", &list(&["example.com"])));
    }

    #[test]
    fn test_suffix_without_dot_rejected() {
        assert!(!is_allowed("notexample.com", &list(&["example.com"])));
    }

    #[test]
    fn test_lookalike_parent_rejected() {
        assert!(!is_allowed("example.com.evil.com", &list(&["example.com"])));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_allowed("EXAMPLE.COM", &list(&["example.com"])));
        assert!(is_allowed("sub.example.com", &list(&["Example.COM"])));
    }

    #[test]
    fn test_multiple_entries() {
        let allow = list(&["example.com", "other.org"]);
        assert!(is_allowed("other.org", &allow));
        assert!(is_allowed("www.other.org", &allow));
        assert!(!is_allowed("unrelated.net", &allow));
    }

    #[test]
    fn test_blank_entries_ignored() {
        let allow = list(&["", "  ", "example.com"]);
        assert!(is_allowed("example.com", &allow));
        assert!(!is_allowed("unrelated.net", &allow));
    }

    #[test]
    fn test_entries_trimmed() {
        assert!(is_allowed("example.com", &list(&[" example.com "])));
    }
}
