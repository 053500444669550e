//! linkverdict library: AI-assisted scam link analysis
//!
//! This library takes a URL a user is unsure about and produces a structured
//! verdict: `Safe`, `Suspicious` or `Malicious`, with a confidence score, an
//! explanation, and the raw structural, redirect, content and registration
//! signals that accompanied the decision. The verdict itself comes from a
//! generative AI backend (Gemini) behind a multi-key failover pool; the
//! heuristic signals ride along for transparency.
//!
//! # Example
//!
//! ```no_run
//! use linkverdict::{Config, LinkAnalyzer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     api_keys: vec!["AIza...".to_string()],
//!     ..Default::default()
//! };
//!
//! let analyzer = LinkAnalyzer::new(&config)?;
//! let result = analyzer.analyze_url("http://bit.ly/free-prize").await;
//! println!("{}: {} ({}%)", result.url, result.verdict, result.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

mod analyzer;
pub mod config;
mod content;
mod domain;
mod email;
pub mod error_handling;
pub mod initialization;
mod ledger;
mod models;
mod normalize;
mod redirects;
mod registration;
mod structural;
pub mod verdict;

// Re-export public API
pub use analyzer::LinkAnalyzer;
pub use config::{Config, LogLevel, BATCH_LIMIT, BULK_LIMIT};
pub use content::ContentSignals;
pub use domain::DomainInfo;
pub use email::analyze_email_content;
pub use error_handling::{Degradation, InitializationError, PipelineStats};
pub use ledger::{fingerprint, LedgerEntry};
pub use models::{
    AnalysisResult, BasicChecks, BatchSummary, EmailVerdict, ThreatStatistics, Verdict,
};
pub use normalize::validate_and_normalize_url;
pub use redirects::RedirectInfo;
pub use registration::{DisabledRegistration, RegistrationAnalyzer, RegistrationInfo};
pub use structural::StructuralSignals;
