//! Construction of shared pipeline resources.

use std::sync::Arc;

use reqwest::ClientBuilder;
use tldextract::{TldExtractor, TldOption};

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::verdict::CredentialPool;

/// Initializes the logger from the environment with a default level.
///
/// `RUST_LOG` overrides the configured level. Safe to call more than once;
/// later calls are no-ops.
pub fn init_logger(level: log::LevelFilter) {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

/// HTTP client for content fetches: short timeout, browser-like User-Agent,
/// automatic redirects left on.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// HTTP client for redirect probes: redirects disabled so hops are counted
/// manually.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(Arc::new(client))
}

/// Public Suffix List extractor for domain decomposition.
pub fn init_extractor() -> Arc<TldExtractor> {
    Arc::new(TldExtractor::new(TldOption::default()))
}

/// Credential pool from the configured key list.
pub fn init_credential_pool(config: &Config) -> Result<Arc<CredentialPool>, InitializationError> {
    Ok(Arc::new(CredentialPool::new(config.api_keys.clone())?))
}
