//! Tolerant parsing of free-text model responses.
//!
//! Models do not reliably return bare JSON, so extraction tries three
//! strategies in order: a fenced ```json block, the first-`{`-to-last-`}`
//! substring, and finally keyword sniffing of the raw text. Pure functions
//! throughout; no network dependency.

use serde::Deserialize;

use crate::models::Verdict;

use super::AiVerdict;

/// Maximum raw-response characters echoed into a fallback explanation.
const RAW_SNIPPET_LEN: usize = 200;

/// A parsed verdict plus whether the keyword fallback was needed, so the
/// caller can count the degradation.
#[derive(Debug)]
pub struct ParsedVerdict {
    pub verdict: AiVerdict,
    pub used_keyword_fallback: bool,
}

#[derive(Deserialize)]
struct RawVerdict {
    #[serde(default)]
    verdict: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    threats_detected: Option<Vec<String>>,
}

/// Parses a model response into a verdict.
///
/// Structural parse failure is recovered, never propagated: the keyword
/// fallback assigns a best-guess verdict at reduced confidence (Safe 70,
/// Malicious 80, Suspicious 60) with a `JSON Parse Error` threat tag.
pub fn parse_verdict_response(text: &str) -> ParsedVerdict {
    if let Some(candidate) = extract_json_candidate(text) {
        if let Ok(raw) = serde_json::from_str::<RawVerdict>(&candidate) {
            return ParsedVerdict {
                verdict: from_raw(raw),
                used_keyword_fallback: false,
            };
        }
    }

    ParsedVerdict {
        verdict: keyword_fallback(text),
        used_keyword_fallback: true,
    }
}

/// Locates the most likely JSON payload inside free text: a fenced block if
/// present, otherwise the first `{` through the last `}`.
fn extract_json_candidate(text: &str) -> Option<String> {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + 7..];
        if let Some(end) = rest.find("```") {
            return Some(rest[..end].trim().to_string());
        }
    }
    let open = text.find('{')?;
    let close = text.rfind('}')?;
    if close < open {
        return None;
    }
    Some(text[open..=close].to_string())
}

fn from_raw(raw: RawVerdict) -> AiVerdict {
    let verdict = raw
        .verdict
        .as_deref()
        .and_then(Verdict::from_loose)
        .unwrap_or(Verdict::Suspicious);
    let confidence = raw.confidence.unwrap_or(50.0).clamp(0.0, 100.0) as u8;
    AiVerdict {
        verdict,
        confidence,
        explanation: raw
            .explanation
            .unwrap_or_else(|| "Analysis completed".to_string()),
        threats_detected: raw.threats_detected.unwrap_or_default(),
    }
}

fn keyword_fallback(text: &str) -> AiVerdict {
    let lower = text.to_lowercase();
    let (verdict, confidence) = if lower.contains("safe") {
        (Verdict::Safe, 70)
    } else if lower.contains("malicious") {
        (Verdict::Malicious, 80)
    } else {
        (Verdict::Suspicious, 60)
    };

    let snippet: String = text.chars().take(RAW_SNIPPET_LEN).collect();
    AiVerdict {
        verdict,
        confidence,
        explanation: format!(
            "AI analysis completed but JSON parsing failed. Raw response: {snippet}..."
        ),
        threats_detected: vec!["JSON Parse Error".to_string()],
    }
}
