//! URL validation and normalization.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a raw URL string.
///
/// Adds an `https://` prefix if no scheme is present, then validates the
/// result as a URL with an http or https scheme and a host. Rejects inputs
/// longer than [`MAX_URL_LENGTH`] before and after normalization.
///
/// Returns `Some(normalized)` when the URL should enter the pipeline, `None`
/// when it is malformed. A `None` here is the pipeline's only terminal
/// failure: the aggregator short-circuits to a `Malicious` verdict.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() || url.len() > MAX_URL_LENGTH {
        warn!("Rejecting empty or over-length URL ({} chars)", url.len());
        return None;
    }

    // An explicit non-http(s) scheme is rejected outright; prepending would
    // otherwise mangle "ftp://host" into "https://ftp://host", which parses.
    if let Some(idx) = url.find("://") {
        let prefix = &url[..idx];
        let is_scheme = !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if is_scheme
            && !prefix.eq_ignore_ascii_case("http")
            && !prefix.eq_ignore_ascii_case("https")
        {
            warn!("Rejecting URL with non-http scheme: {url}");
            return None;
        }
    }

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length after normalization ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            _ => {
                warn!("Rejecting URL with unsupported scheme or missing host: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Rejecting invalid URL: {url}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;

    #[test]
    fn test_adds_https_when_scheme_missing() {
        assert_eq!(
            validate_and_normalize_url("example.com"),
            Some("https://example.com".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("bit.ly/abc"),
            Some("https://bit.ly/abc".to_string())
        );
    }

    #[test]
    fn test_preserves_existing_scheme() {
        assert_eq!(
            validate_and_normalize_url("http://example.com"),
            Some("http://example.com".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("https://example.com"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(validate_and_normalize_url("not a url at all!!!"), None);
        assert_eq!(validate_and_normalize_url(""), None);
        assert_eq!(validate_and_normalize_url("   "), None);
        assert_eq!(validate_and_normalize_url("://example.com"), None);
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert_eq!(validate_and_normalize_url("ftp://example.com"), None);
        assert_eq!(validate_and_normalize_url("FTP://example.com"), None);
        assert_eq!(validate_and_normalize_url("file:///etc/passwd"), None);
        assert_eq!(validate_and_normalize_url("ssh://host.example.com"), None);
    }

    #[test]
    fn test_scheme_separator_in_query_is_not_a_scheme() {
        assert_eq!(
            validate_and_normalize_url("example.com/redirect?to=ftp://files.example.com"),
            Some("https://example.com/redirect?to=ftp://files.example.com".to_string())
        );
    }

    #[test]
    fn test_accepts_path_query_fragment() {
        assert_eq!(
            validate_and_normalize_url("example.com/login?next=/home#top"),
            Some("https://example.com/login?next=/home#top".to_string())
        );
    }

    #[test]
    fn test_accepts_ip_host() {
        assert_eq!(
            validate_and_normalize_url("http://192.168.1.5/login"),
            Some("http://192.168.1.5/login".to_string())
        );
    }

    #[test]
    fn test_rejects_over_length() {
        let long = format!("https://example.com/{}", "a".repeat(2100));
        assert_eq!(validate_and_normalize_url(&long), None);
    }

    #[test]
    fn test_rejects_over_length_after_prefixing() {
        // Under the limit as typed, over it once https:// is prepended.
        let borderline = format!("example.com/{}", "a".repeat(2032));
        assert_eq!(borderline.len(), 2044);
        assert_eq!(validate_and_normalize_url(&borderline), None);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_normalization_idempotent(url in "[a-z]{3,20}\\.[a-z]{2,5}") {
            if let Some(n1) = validate_and_normalize_url(&url) {
                prop_assert_eq!(Some(n1.clone()), validate_and_normalize_url(&n1));
            }
        }

        #[test]
        fn test_scheme_always_http_or_https(domain in "[a-z]{3,20}\\.[a-z]{2,5}") {
            let normalized = validate_and_normalize_url(&domain);
            prop_assert!(normalized.is_some());
            prop_assert!(normalized.unwrap().starts_with("https://"));
        }

        #[test]
        fn test_no_panic_on_arbitrary_input(input in ".{0,300}") {
            let _ = validate_and_normalize_url(&input);
        }
    }
}
