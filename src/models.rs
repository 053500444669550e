//! Shared result types returned to callers and persisted in the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::ContentSignals;
use crate::domain::DomainInfo;
use crate::redirects::RedirectInfo;
use crate::registration::RegistrationInfo;
use crate::structural::StructuralSignals;

/// Primary classification for a URL.
///
/// `Error` marks a batch element whose analysis itself failed; it is never
/// produced by a completed pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Safe,
    Suspicious,
    Malicious,
    Error,
}

impl Verdict {
    /// Parses a verdict string case-insensitively. Unrecognized strings
    /// return `None`; callers decide the fallback.
    pub fn from_loose(s: &str) -> Option<Verdict> {
        match s.trim().to_lowercase().as_str() {
            "safe" => Some(Verdict::Safe),
            "suspicious" => Some(Verdict::Suspicious),
            "malicious" => Some(Verdict::Malicious),
            "error" => Some(Verdict::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Safe => "Safe",
            Verdict::Suspicious => "Suspicious",
            Verdict::Malicious => "Malicious",
            Verdict::Error => "Error",
        };
        f.write_str(s)
    }
}

/// Boolean summary of the heuristic flags, attached to the result for
/// transparency. Advisory only: never alters the verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicChecks {
    pub suspicious_domain: bool,
    pub phishing_pattern: bool,
    pub suspicious_redirect: bool,
    pub is_shortener: bool,
    pub recently_registered: bool,
    pub has_suspicious_chars: bool,
    pub has_ip_address: bool,
    pub has_typosquatting: bool,
}

/// The aggregate of every signal source for one URL, plus the AI verdict.
///
/// This is the unit persisted to the threat ledger and returned to callers.
/// The `verdict` field is always populated: invalid input short-circuits to
/// `Malicious`, AI failure degrades to `Suspicious`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub url: String,
    pub verdict: Verdict,
    pub confidence: u8,
    pub explanation: String,
    pub threats_detected: Vec<String>,
    pub domain_info: DomainInfo,
    pub redirect_info: RedirectInfo,
    pub registration: RegistrationInfo,
    pub url_structure: StructuralSignals,
    pub content_analysis: ContentSignals,
    pub basic_checks: BasicChecks,
    /// Hex SHA-256 of the raw URL string; ledger lookup key.
    pub fingerprint: String,
    pub timestamp: DateTime<Utc>,
}

/// Monotonic counters owned by the threat ledger, with percentages derived
/// at snapshot time when anything has been analyzed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatStatistics {
    pub total_analyzed: u64,
    pub safe_count: u64,
    pub suspicious_count: u64,
    pub malicious_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicious_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malicious_percentage: Option<f64>,
}

/// Aggregate summary produced by a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_urls: usize,
    pub successful_analyses: usize,
    /// Count per verdict label, in first-seen order of the results.
    pub verdict_distribution: Vec<(String, usize)>,
    pub average_confidence: f64,
}

/// Scorer output for free-text email content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailVerdict {
    pub suspicious_patterns: usize,
    pub urgency_indicators: usize,
    pub action_requests: usize,
    /// `20*patterns + 10*urgency + 5*action`, clamped to 100.
    pub email_threat_score: u32,
    /// True strictly above 50.
    pub is_likely_phishing: bool,
}
