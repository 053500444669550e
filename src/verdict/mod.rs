//! AI verdict client with credential failover.
//!
//! This module owns the generative-model leg of the pipeline:
//! - [`prompt`] builds the deterministic analysis prompt
//! - [`VerdictBackend`] abstracts the model call (Gemini in production,
//!   scripted backends in tests)
//! - [`CredentialPool`] holds the ordered key pool and rotation cursor
//! - [`parse`] turns free-text responses into a constrained verdict
//!
//! Failover walks the pool at most once per request: every call failure
//! rotates the shared cursor to the next key and retries; when all keys have
//! failed, the client returns a synthetic degraded verdict rather than an
//! error, so the aggregator always has something to report.

mod gemini;
mod parse;
mod pool;
mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};
use tokio_retry::strategy::ExponentialBackoff;

use crate::config::{FAILOVER_FACTOR, FAILOVER_INITIAL_DELAY_MS, FAILOVER_MAX_DELAY_SECS};
use crate::error_handling::{BackendError, Degradation, PipelineStats};
use crate::models::Verdict;

pub use gemini::GeminiBackend;
pub use parse::{parse_verdict_response, ParsedVerdict};
pub use pool::CredentialPool;
pub use prompt::build_prompt;

/// A constrained verdict produced by the model (or synthesized on failure).
/// Confidence is always within 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiVerdict {
    pub verdict: Verdict,
    pub confidence: u8,
    pub explanation: String,
    pub threats_detected: Vec<String>,
}

/// A generative-model backend: prompt and credential in, raw response text
/// out. Implementations must not retry internally; the client owns failover.
#[async_trait]
pub trait VerdictBackend: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, BackendError>;
}

/// The verdict client: one backend, one shared credential pool.
pub struct VerdictClient {
    backend: Arc<dyn VerdictBackend>,
    pool: Arc<CredentialPool>,
    stats: Arc<PipelineStats>,
}

impl VerdictClient {
    pub fn new(
        backend: Arc<dyn VerdictBackend>,
        pool: Arc<CredentialPool>,
        stats: Arc<PipelineStats>,
    ) -> Self {
        VerdictClient {
            backend,
            pool,
            stats,
        }
    }

    /// Delay schedule between failover attempts.
    fn failover_delays() -> impl Iterator<Item = std::time::Duration> {
        ExponentialBackoff::from_millis(FAILOVER_INITIAL_DELAY_MS)
            .factor(FAILOVER_FACTOR)
            .max_delay(std::time::Duration::from_secs(FAILOVER_MAX_DELAY_SECS))
    }

    /// Requests a verdict for the prompt, rotating credentials on failure.
    ///
    /// Each credential is tried at most once per request. Exhausting the pool
    /// degrades to a synthetic `Suspicious` verdict at confidence 50; this is
    /// reported, never raised.
    pub async fn request_verdict(&self, prompt: &str) -> AiVerdict {
        let attempts = self.pool.len();
        let mut delays = Self::failover_delays();

        for attempt in 0..attempts {
            let index = self.pool.current_index();
            let key = self.pool.key_at(index);

            match self.backend.generate(key, prompt).await {
                Ok(text) => {
                    let parsed = parse_verdict_response(&text);
                    if parsed.used_keyword_fallback {
                        self.stats.record(Degradation::AiParseFallback);
                        warn!("AI response was not valid JSON; keyword fallback used");
                    }
                    return parsed.verdict;
                }
                Err(e) => {
                    warn!(
                        "AI backend call failed with key {} of {} (attempt {}): {e}",
                        index + 1,
                        attempts,
                        attempt + 1
                    );
                    self.pool.rotate_from(index);
                    if attempt + 1 < attempts {
                        self.stats.record(Degradation::AiKeyRotated);
                        if let Some(delay) = delays.next() {
                            tokio::time::sleep(delay).await;
                        }
                    }
                }
            }
        }

        self.stats.record(Degradation::AiBackendExhausted);
        warn!("All {attempts} API keys failed; returning degraded verdict");
        AiVerdict {
            verdict: Verdict::Suspicious,
            confidence: 50,
            explanation: "All API keys failed".to_string(),
            threats_detected: vec!["API Error".to_string()],
        }
    }
}
