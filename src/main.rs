//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `linkverdict` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - JSON output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use linkverdict::initialization::init_logger;
use linkverdict::{analyze_email_content, Config, LinkAnalyzer, LogLevel, BATCH_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "linkverdict", about = "AI-assisted scam link analysis", version)]
struct Args {
    /// URLs to analyze
    urls: Vec<String>,

    /// File containing URLs to analyze, one per line
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Score a text file as email content instead of analyzing URLs
    #[arg(long, conflicts_with_all = ["urls", "file"])]
    email: Option<PathBuf>,

    /// Gemini model to query
    #[arg(long, default_value = linkverdict::config::GEMINI_MODEL)]
    model: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Logging level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

/// Collects API keys from the environment: `GEMINI_API_KEYS` (comma
/// separated) wins, otherwise `GEMINI_API_KEY` plus numbered fallbacks.
fn api_keys_from_env() -> Vec<String> {
    if let Ok(joined) = std::env::var("GEMINI_API_KEYS") {
        return joined
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect();
    }
    let mut keys = Vec::new();
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.trim().is_empty() {
            keys.push(key.trim().to_string());
        }
    }
    for n in 2..=9 {
        match std::env::var(format!("GEMINI_API_KEY_{n}")) {
            Ok(key) if !key.trim().is_empty() => keys.push(key.trim().to_string()),
            _ => break,
        }
    }
    keys
}

fn read_url_file(path: &PathBuf) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect())
}

async fn run(args: Args) -> Result<()> {
    // Email scoring is offline; no analyzer or API keys needed.
    if let Some(path) = &args.email {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let verdict = analyze_email_content(&text);
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        return Ok(());
    }

    let mut urls = args.urls.clone();
    if let Some(path) = &args.file {
        urls.extend(read_url_file(path)?);
    }
    if urls.is_empty() {
        bail!("No URLs given; pass URLs as arguments or use --file");
    }

    let config = Config {
        api_keys: api_keys_from_env(),
        model: args.model.clone(),
        timeout_seconds: args.timeout,
        ..Default::default()
    };
    if config.api_keys.is_empty() {
        bail!("No API keys found; set GEMINI_API_KEY or GEMINI_API_KEYS");
    }

    let analyzer = Arc::new(LinkAnalyzer::new(&config).context("Failed to initialize analyzer")?);

    if urls.len() == 1 {
        let result = analyzer.analyze_url(&urls[0]).await;
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let (results, summary) = analyzer.analyze_batch(&urls, BATCH_LIMIT).await;
        println!("{}", serde_json::to_string_pretty(&results)?);
        eprintln!(
            "Analyzed {} URL{} ({} succeeded, average confidence {:.0}%)",
            summary.total_urls,
            if summary.total_urls == 1 { "" } else { "s" },
            summary.successful_analyses,
            summary.average_confidence
        );
    }

    analyzer.pipeline_stats().log_summary();
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if it exists) so API keys
    // don't have to be exported manually.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    if let Err(e) = run(args).await {
        eprintln!("linkverdict error: {e:#}");
        process::exit(1);
    }
}
