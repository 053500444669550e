//! Public-suffix-aware domain decomposition.

use serde::{Deserialize, Serialize};
use tldextract::TldExtractor;

/// A URL's host split into its registrable domain, subdomain label, and full
/// host. Immutable once computed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainInfo {
    /// Registrable domain, e.g. "example.co.uk" for "www.example.co.uk".
    pub domain: String,
    /// Subdomain label(s), e.g. "www"; empty when absent.
    pub subdomain: String,
    /// Full host including subdomain.
    pub full_domain: String,
}

/// Decomposes a URL's host against the Public Suffix List.
///
/// Pure and infallible: malformed input yields empty strings, not an error.
pub fn decompose(extractor: &TldExtractor, url: &str) -> DomainInfo {
    let extracted = match extractor.extract(url) {
        Ok(e) => e,
        Err(_) => return DomainInfo::default(),
    };

    let domain = match (extracted.domain, extracted.suffix) {
        (Some(d), Some(s)) => format!("{}.{}", d.to_lowercase(), s.to_lowercase()),
        (Some(d), None) => d.to_lowercase(),
        _ => return DomainInfo::default(),
    };
    let subdomain = extracted.subdomain.unwrap_or_default().to_lowercase();
    let full_domain = if subdomain.is_empty() {
        domain.clone()
    } else {
        format!("{subdomain}.{domain}")
    };

    DomainInfo {
        domain,
        subdomain,
        full_domain,
    }
}
