//! Domain registration analysis.
//!
//! WHOIS/RDAP lookup is intentionally disabled; the default analyzer returns
//! "unavailable" sentinels for every field. The trait boundary exists so a
//! real backend can be substituted without touching the aggregator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sentinel value for registration fields with no data source.
pub const UNAVAILABLE: &str = "Unknown (WHOIS disabled)";

/// Best-effort domain registration data. Every field may carry an
/// "unavailable" sentinel; `is_recently_registered` is never inferred from
/// absent data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationInfo {
    pub registrar: String,
    pub creation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_old: Option<i64>,
    pub is_recently_registered: bool,
    pub country: String,
}

impl Default for RegistrationInfo {
    fn default() -> Self {
        RegistrationInfo {
            registrar: UNAVAILABLE.to_string(),
            creation_date: UNAVAILABLE.to_string(),
            days_old: None,
            is_recently_registered: false,
            country: UNAVAILABLE.to_string(),
        }
    }
}

/// Pluggable registration data source.
///
/// Implementations must degrade rather than fail: a lookup that cannot
/// complete returns sentinels, never an error.
#[async_trait]
pub trait RegistrationAnalyzer: Send + Sync {
    async fn analyze(&self, domain: &str) -> RegistrationInfo;

    /// Whether this source performs real lookups. When false, sentinel
    /// results are expected and not counted as a degradation.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// The default analyzer: no data source, sentinels for everything.
pub struct DisabledRegistration;

#[async_trait]
impl RegistrationAnalyzer for DisabledRegistration {
    async fn analyze(&self, _domain: &str) -> RegistrationInfo {
        RegistrationInfo::default()
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
