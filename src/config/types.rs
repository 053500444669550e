//! Configuration types and CLI options.

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_USER_AGENT, GEMINI_MODEL, MAX_REDIRECT_HOPS, REQUEST_TIMEOUT,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// Constructed programmatically or populated by the binary from CLI flags and
/// environment variables.
///
/// # Examples
///
/// ```no_run
/// use linkverdict::Config;
///
/// let config = Config {
///     api_keys: vec!["key-1".into(), "key-2".into()],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Ordered pool of Gemini API keys tried in rotation on failure.
    pub api_keys: Vec<String>,

    /// Generative model name for the verdict call.
    pub model: String,

    /// HTTP User-Agent header value for content fetches and redirect probes.
    pub user_agent: String,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Maximum redirect hops to follow per chain.
    pub max_redirect_hops: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            model: GEMINI_MODEL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: REQUEST_TIMEOUT.as_secs(),
            max_redirect_hops: MAX_REDIRECT_HOPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_keys.is_empty());
        assert_eq!(config.model, GEMINI_MODEL);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.max_redirect_hops, MAX_REDIRECT_HOPS);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }
}
