//! Email content phishing scorer.
//!
//! A self-contained heuristic over free text: no network, no shared state.

use crate::models::EmailVerdict;

/// Phrases characteristic of credential-phishing emails.
pub const EMAIL_THREAT_PATTERNS: &[&str] = &[
    "verify your account",
    "suspended account",
    "urgent action required",
    "click here to verify",
    "account security alert",
    "immediate attention",
];

const URGENCY_WORDS: &[&str] = &["urgent", "immediately", "asap", "critical", "emergency"];

const ACTION_WORDS: &[&str] = &["click", "verify", "confirm", "update", "validate"];

/// Scores email text for phishing likelihood.
///
/// `score = 20*patterns + 10*urgency + 5*action`, clamped to 100. The
/// phishing flag trips strictly above 50, so a score of exactly 50 is not
/// flagged.
pub fn analyze_email_content(text: &str) -> EmailVerdict {
    let lower = text.to_lowercase();

    let suspicious_patterns = EMAIL_THREAT_PATTERNS
        .iter()
        .filter(|p| lower.contains(*p))
        .count();
    let urgency_indicators = URGENCY_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let action_requests = ACTION_WORDS.iter().filter(|w| lower.contains(*w)).count();

    let score = (suspicious_patterns as u32) * 20
        + (urgency_indicators as u32) * 10
        + (action_requests as u32) * 5;
    let email_threat_score = score.min(100);

    EmailVerdict {
        suspicious_patterns,
        urgency_indicators,
        action_requests,
        email_threat_score,
        is_likely_phishing: email_threat_score > 50,
    }
}
