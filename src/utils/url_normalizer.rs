//! Destination URL normalization and sanitization.
//!
//! Turns the caller-supplied `dest` parameter into a canonical absolute URL,
//! or rejects it. This is the primary open-redirect guard: only `http` and
//! `https` destinations ever make it past this module.

use percent_encoding::percent_decode_str;
use url::Url;

/// Errors that can occur during destination normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Normalizes a raw destination string to a canonical absolute URL.
///
/// # Normalization Rules
///
/// 1. **Decoding**: The input is percent-decoded once. A decode failure
///    (invalid UTF-8) is tolerated; the raw string is used instead.
/// 2. **Scheme defaulting**: Input without a recognizable scheme gets
///    `https://` prepended (`example.com` → `https://example.com/`).
/// 3. **Protocol**: Only HTTP and HTTPS are allowed.
/// 4. **Canonical form**: The URL parser lowercases scheme and hostname and
///    strips default ports (80 for HTTP, 443 for HTTPS).
///
/// # Security
///
/// Rejects dangerous protocols like `javascript:`, `data:`, `file:`, and
/// `mailto:`. Scheme detection distinguishes `mailto:user@host` (a scheme)
/// from `host:8080/path` (a port), so bare host-with-port input still gets
/// the `https://` default.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed or empty
/// input and [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S)
/// schemes.
///
/// # Examples
///
/// ```
/// use redirect_relay::utils::url_normalizer::normalize_dest;
///
/// let url = normalize_dest("example.com/path").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/path");
///
/// assert!(normalize_dest("javascript:alert(1)").is_err());
/// ```
pub fn normalize_dest(raw: &str) -> Result<Url, UrlNormalizationError> {
    let decoded = match percent_decode_str(raw).decode_utf8() {
        Ok(s) => s.into_owned(),
        Err(_) => raw.to_string(),
    };
    let decoded = decoded.trim();

    if decoded.is_empty() {
        return Err(UrlNormalizationError::InvalidFormat(
            "empty input".to_string(),
        ));
    }

    let candidate = if has_scheme(decoded) {
        decoded.to_string()
    } else {
        format!("https://{decoded}")
    };

    let url = Url::parse(&candidate)
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    Ok(url)
}

/// Returns whether the input carries an explicit scheme.
///
/// `scheme://` always counts. A bare `scheme:` prefix counts only when the
/// colon is followed by a non-digit, so `mailto:user@host` is a scheme while
/// `example.com:8080/path` is a host with a port.
fn has_scheme(input: &str) -> bool {
    if input.contains("://") {
        return true;
    }

    let Some((prefix, rest)) = input.split_once(':') else {
        return false;
    };

    let valid_prefix = prefix
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid_prefix && !rest.chars().next().is_some_and(|c| c.is_ascii_digit())
}
