//! Stateless structural heuristics over the URL string.
//!
//! Every check here is a pure function of the raw URL: no network access, no
//! shared state. The individual flags are combined by the aggregator (and the
//! AI prompt) rather than scored here.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Known URL-shortening service domains, matched exactly against the
/// registrable domain.
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "short.link",
    "t.co",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "v.gd",
    "shorturl.at",
    "rebrand.ly",
    "cutt.ly",
    "short.ly",
    "tiny.cc",
    "buff.ly",
];

/// Domains treated as inherently suspicious (the widely abused shortener
/// core), matched exactly against the registrable domain.
pub const SUSPICIOUS_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "short.link",
    "t.co",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "v.gd",
    "shorturl.at",
];

/// Brand-typo tokens matched as substrings of the lowercased URL.
pub const TYPO_TOKENS: &[&str] = &["goggle", "facebok", "twiter", "amazom", "paypall"];

/// Host tokens commonly used in phishing hostnames, matched as substrings of
/// the lowercased URL.
pub const PHISHING_PATTERNS: &[&str] = &[
    "paypal-security",
    "amazon-verification",
    "microsoft-update",
    "apple-id",
    "google-security",
    "facebook-login",
    "twitter-verify",
];

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").expect("static IPv4 pattern")
});

/// Heuristics computed from the URL string alone. Deterministic, no I/O.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuralSignals {
    /// Any of `@`, `\`, a double slash in the path, or `..` present.
    pub has_suspicious_chars: bool,
    /// URL contains a dotted-quad IPv4 literal.
    pub has_ip_address: bool,
    /// Dot-separated segment count minus two. Can be negative for malformed
    /// input; preserved as-is rather than corrected.
    pub subdomain_count: i32,
    /// A known brand-typo token appears in the URL.
    pub has_typosquatting: bool,
    pub url_length: usize,
}

/// Analyzes URL structure for suspicious patterns.
pub fn analyze_structure(url: &str) -> StructuralSignals {
    let lower = url.to_lowercase();

    // The scheme's own "//" doesn't count; only look past it.
    let after_scheme = url.find("://").map(|i| &url[i + 3..]).unwrap_or(url);
    let has_suspicious_chars = url.contains('@')
        || url.contains('\\')
        || url.contains("..")
        || after_scheme.contains("//");

    let has_ip_address = IPV4_PATTERN.is_match(url);

    let segments = url.split('.').count() as i32;
    let subdomain_count = segments - 2;

    let has_typosquatting = TYPO_TOKENS.iter().any(|typo| lower.contains(typo));

    StructuralSignals {
        has_suspicious_chars,
        has_ip_address,
        subdomain_count,
        has_typosquatting,
        url_length: url.len(),
    }
}

/// Whether the registrable domain is a known URL-shortening service.
pub fn is_shortener(domain: &str) -> bool {
    SHORTENER_DOMAINS.contains(&domain)
}

/// Whether the registrable domain is on the inherently-suspicious list.
pub fn is_suspicious_domain(domain: &str) -> bool {
    SUSPICIOUS_DOMAINS.contains(&domain)
}

/// Whether the URL contains a known phishing hostname token.
pub fn has_phishing_pattern(url: &str) -> bool {
    let lower = url.to_lowercase();
    PHISHING_PATTERNS.iter().any(|p| lower.contains(p))
}
