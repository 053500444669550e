//! Error types and pipeline health counters.
//!
//! Only one condition in the whole pipeline is terminal: a URL that fails
//! validation. Every other failure degrades in place (zeroed signals, sentinel
//! fields, synthetic verdicts) and is counted here so operators can see how
//! often each sub-check fell back.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    /// No API credentials were configured.
    #[error("no API keys configured (set GEMINI_API_KEY or GEMINI_API_KEYS)")]
    NoCredentials,
}

/// Error returned by a verdict backend for a single call with one credential.
///
/// These never escape the verdict client; they drive credential rotation and,
/// after the pool is exhausted, a synthetic degraded verdict.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport-level failure (timeout, DNS, TLS, connection reset).
    #[error("backend transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status (quota, auth, 5xx).
    #[error("backend returned status {0}")]
    Status(u16),

    /// The backend answered 200 but the envelope carried no candidate text.
    #[error("backend response missing candidate text")]
    EmptyResponse,
}

/// Degradation events counted during analysis.
///
/// Each variant is a sub-check that failed soft and fell back instead of
/// aborting the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Degradation {
    /// Redirect probe failed; chain reported as empty.
    RedirectProbeFailed,
    /// Content fetch or parse failed; signals zeroed.
    ContentFetchFailed,
    /// Registration lookup returned no data.
    RegistrationUnavailable,
    /// A credential failed and the pool rotated to the next key.
    AiKeyRotated,
    /// Every credential in the pool failed for one request.
    AiBackendExhausted,
    /// AI response was not valid JSON; keyword fallback used.
    AiParseFallback,
}

impl Degradation {
    fn describe(&self) -> &'static str {
        match self {
            Degradation::RedirectProbeFailed => "redirect probe failures",
            Degradation::ContentFetchFailed => "content fetch failures",
            Degradation::RegistrationUnavailable => "registration lookups unavailable",
            Degradation::AiKeyRotated => "API key rotations",
            Degradation::AiBackendExhausted => "AI backend exhaustions",
            Degradation::AiParseFallback => "AI response parse fallbacks",
        }
    }
}

/// Thread-safe degradation counters, shared across concurrent analyses.
///
/// All variants are initialized to zero on creation so lookups never miss.
pub struct PipelineStats {
    counters: HashMap<Degradation, AtomicUsize>,
}

impl PipelineStats {
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for kind in Degradation::iter() {
            counters.insert(kind, AtomicUsize::new(0));
        }
        PipelineStats { counters }
    }

    /// Increment the counter for a degradation event.
    pub fn record(&self, kind: Degradation) {
        if let Some(counter) = self.counters.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get the count for a degradation event.
    pub fn count(&self, kind: Degradation) -> usize {
        self.counters
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Logs a one-line-per-kind summary of all nonzero counters.
    pub fn log_summary(&self) {
        let mut any = false;
        for kind in Degradation::iter() {
            let n = self.count(kind);
            if n > 0 {
                log::info!("{}: {}", kind.describe(), n);
                any = true;
            }
        }
        if !any {
            log::info!("no pipeline degradations recorded");
        }
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}
