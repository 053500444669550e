//! Configuration constants.

use std::time::Duration;

/// Maximum URL length accepted by the normalizer. Matches common browser and
/// server limits; anything longer is rejected before any network activity.
pub const MAX_URL_LENGTH: usize = 2048;

/// Timeout applied to every outbound HTTP call (content fetch, redirect
/// probes, AI backend).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like User-Agent sent with content fetches and redirect probes.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Maximum redirect hops followed before giving up on a chain.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// A chain is flagged suspicious only when it exceeds this many hops;
/// exactly this many hops is not suspicious.
pub const SUSPICIOUS_REDIRECT_THRESHOLD: usize = 3;

/// Maximum URLs accepted per interactive batch call.
pub const BATCH_LIMIT: usize = 50;

/// Maximum URLs accepted per bulk analysis call.
pub const BULK_LIMIT: usize = 100;

/// Generative model used for the verdict call.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Base endpoint for the Gemini generateContent API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Initial delay between credential failover attempts, in milliseconds.
pub const FAILOVER_INITIAL_DELAY_MS: u64 = 100;

/// Backoff factor applied to the failover delay after each failed credential.
pub const FAILOVER_FACTOR: u64 = 2;

/// Maximum delay between credential failover attempts, in seconds.
pub const FAILOVER_MAX_DELAY_SECS: u64 = 2;
