//! Analysis aggregation.
//!
//! [`LinkAnalyzer`] owns the pipeline order: normalize, decompose, then the
//! three independent network probes concurrently, then the AI verdict call
//! (which consumes their outputs), then one ledger write. Validation failure
//! is the only terminal path; every other sub-check degrades in place.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info, warn};
use tldextract::TldExtractor;

use crate::config::Config;
use crate::content::{self, ContentSignals};
use crate::domain;
use crate::error_handling::{Degradation, InitializationError, PipelineStats};
use crate::ledger::{fingerprint, LedgerEntry, MonitorRegistry, ThreatLedger};
use crate::models::{AnalysisResult, BasicChecks, BatchSummary, ThreatStatistics, Verdict};
use crate::normalize::validate_and_normalize_url;
use crate::redirects::{self, RedirectInfo};
use crate::registration::{DisabledRegistration, RegistrationAnalyzer, RegistrationInfo};
use crate::structural::{self, StructuralSignals};
use crate::verdict::{build_prompt, GeminiBackend, VerdictBackend, VerdictClient};
use crate::{initialization, registration};

/// The orchestrator. One instance serves any number of concurrent
/// `analyze_url` calls; it owns no per-request state.
pub struct LinkAnalyzer {
    client: Arc<reqwest::Client>,
    probe_client: Arc<reqwest::Client>,
    extractor: Arc<TldExtractor>,
    registration: Arc<dyn RegistrationAnalyzer>,
    verdict_client: VerdictClient,
    ledger: ThreatLedger,
    registry: MonitorRegistry,
    stats: Arc<PipelineStats>,
    max_redirect_hops: usize,
}

impl LinkAnalyzer {
    /// Builds an analyzer with the production Gemini backend and the
    /// disabled registration stub.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let client = initialization::init_client(config)?;
        let backend = Arc::new(GeminiBackend::new((*client).clone(), &config.model));
        Self::with_parts(config, backend, Arc::new(DisabledRegistration))
    }

    /// Builds an analyzer around explicit backend and registration
    /// implementations. This is the seam tests (and future WHOIS/RDAP
    /// support) plug into.
    pub fn with_parts(
        config: &Config,
        backend: Arc<dyn VerdictBackend>,
        registration: Arc<dyn RegistrationAnalyzer>,
    ) -> Result<Self, InitializationError> {
        let stats = Arc::new(PipelineStats::new());
        let pool = initialization::init_credential_pool(config)?;
        Ok(LinkAnalyzer {
            client: initialization::init_client(config)?,
            probe_client: initialization::init_probe_client(config)?,
            extractor: initialization::init_extractor(),
            registration,
            verdict_client: VerdictClient::new(backend, pool, Arc::clone(&stats)),
            ledger: ThreatLedger::new(),
            registry: MonitorRegistry::new(),
            stats,
            max_redirect_hops: config.max_redirect_hops,
        })
    }

    /// Analyzes a single URL. Never fails: malformed input yields a
    /// `Malicious` result at confidence 100 with no network activity, and
    /// every downstream degradation is absorbed into the result's fields.
    pub async fn analyze_url(&self, raw_url: &str) -> AnalysisResult {
        let Some(url) = validate_and_normalize_url(raw_url) else {
            let result = Self::invalid_input_result(raw_url);
            self.ledger.record_analysis(&result);
            return result;
        };

        debug!("Analyzing {url}");
        let domain_info = domain::decompose(&self.extractor, &url);
        let url_structure = structural::analyze_structure(&url);

        // Independent read-only probes; order-insensitive.
        let (redirect_info, content_analysis, reg_info) = tokio::join!(
            redirects::resolve_redirects(
                &self.probe_client,
                &url,
                self.max_redirect_hops,
                &self.stats
            ),
            content::inspect_content(&self.client, &url),
            self.registration.analyze(&domain_info.domain),
        );
        if content_analysis.error.is_some() {
            self.stats.record(Degradation::ContentFetchFailed);
        }
        // A disabled source always returns sentinels; that is expected, not
        // a degradation. Only a live lookup coming back empty is counted.
        if self.registration.is_enabled() && reg_info.registrar == registration::UNAVAILABLE {
            self.stats.record(Degradation::RegistrationUnavailable);
        }

        let basic_checks = Self::summarize_checks(
            &url,
            &domain_info.domain,
            &url_structure,
            &redirect_info,
            &reg_info,
        );

        // The AI call embeds the probe outputs, so it must come after them.
        let prompt = build_prompt(&url, &domain_info, &redirect_info);
        let ai = self.verdict_client.request_verdict(&prompt).await;

        let result = AnalysisResult {
            fingerprint: fingerprint(&url),
            url,
            verdict: ai.verdict,
            confidence: ai.confidence,
            explanation: ai.explanation,
            threats_detected: ai.threats_detected,
            domain_info,
            redirect_info,
            registration: reg_info,
            url_structure,
            content_analysis,
            basic_checks,
            timestamp: Utc::now(),
        };

        info!(
            "Verdict for {}: {} ({}%)",
            result.url, result.verdict, result.confidence
        );
        self.ledger.record_analysis(&result);
        result
    }

    /// Analyzes up to `max_count` URLs, isolating per-item failures.
    ///
    /// Items run sequentially; a panic inside one item's analysis becomes an
    /// `Error`-verdict element instead of aborting the batch. URLs past the
    /// cap are dropped with a warning.
    pub async fn analyze_batch(
        self: &Arc<Self>,
        urls: &[String],
        max_count: usize,
    ) -> (Vec<AnalysisResult>, BatchSummary) {
        if urls.len() > max_count {
            warn!(
                "Batch of {} URLs exceeds cap of {max_count}; excess dropped",
                urls.len()
            );
        }

        let mut results = Vec::with_capacity(urls.len().min(max_count));
        for url in urls.iter().take(max_count) {
            let analyzer = Arc::clone(self);
            let url_owned = url.trim().to_string();
            let handle =
                tokio::spawn(async move { analyzer.analyze_url(&url_owned).await });
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Analysis task for {url} failed: {e}");
                    results.push(Self::error_result(url, &e.to_string()));
                }
            }
        }

        let summary = Self::summarize_batch(&results);
        (results, summary)
    }

    /// Ordered analysis history for a URL; empty if never analyzed.
    pub fn get_history(&self, url: &str) -> Vec<LedgerEntry> {
        match validate_and_normalize_url(url) {
            Some(normalized) => self.ledger.get_history(&normalized),
            None => self.ledger.get_history(url),
        }
    }

    /// Snapshot of the running verdict counters.
    pub fn get_statistics(&self) -> ThreatStatistics {
        self.ledger.statistics()
    }

    /// Flags a URL for periodic re-checking. Scheduling is the caller's
    /// concern; re-checks invoke `analyze_url` like anyone else.
    pub fn start_monitoring(&self, url: &str, interval_hours: u32) {
        self.registry.start_monitoring(url, interval_hours);
    }

    pub fn stop_monitoring(&self, url: &str) {
        self.registry.stop_monitoring(url);
    }

    pub fn list_monitored(&self) -> Vec<String> {
        self.registry.list_monitored()
    }

    /// Pipeline degradation counters for health reporting.
    pub fn pipeline_stats(&self) -> &PipelineStats {
        &self.stats
    }

    fn summarize_checks(
        url: &str,
        domain: &str,
        url_structure: &StructuralSignals,
        redirect_info: &RedirectInfo,
        reg_info: &RegistrationInfo,
    ) -> BasicChecks {
        BasicChecks {
            suspicious_domain: structural::is_suspicious_domain(domain),
            phishing_pattern: structural::has_phishing_pattern(url),
            suspicious_redirect: redirect_info.suspicious_redirect,
            is_shortener: structural::is_shortener(domain),
            recently_registered: reg_info.is_recently_registered,
            has_suspicious_chars: url_structure.has_suspicious_chars,
            has_ip_address: url_structure.has_ip_address,
            has_typosquatting: url_structure.has_typosquatting,
        }
    }

    fn invalid_input_result(raw_url: &str) -> AnalysisResult {
        AnalysisResult {
            url: raw_url.to_string(),
            verdict: Verdict::Malicious,
            confidence: 100,
            explanation: "Invalid URL format".to_string(),
            threats_detected: vec!["Invalid URL".to_string()],
            domain_info: Default::default(),
            redirect_info: Default::default(),
            registration: Default::default(),
            url_structure: Default::default(),
            content_analysis: ContentSignals::default(),
            basic_checks: BasicChecks::default(),
            fingerprint: fingerprint(raw_url),
            timestamp: Utc::now(),
        }
    }

    fn error_result(url: &str, message: &str) -> AnalysisResult {
        AnalysisResult {
            url: url.to_string(),
            verdict: Verdict::Error,
            confidence: 0,
            explanation: format!("Analysis failed: {message}"),
            threats_detected: vec!["Analysis Error".to_string()],
            domain_info: Default::default(),
            redirect_info: Default::default(),
            registration: Default::default(),
            url_structure: Default::default(),
            content_analysis: ContentSignals::default(),
            basic_checks: BasicChecks::default(),
            fingerprint: fingerprint(url),
            timestamp: Utc::now(),
        }
    }

    fn summarize_batch(results: &[AnalysisResult]) -> BatchSummary {
        let successful_analyses = results
            .iter()
            .filter(|r| r.verdict != Verdict::Error)
            .count();

        let mut verdict_distribution: Vec<(String, usize)> = Vec::new();
        for result in results {
            let label = result.verdict.to_string();
            match verdict_distribution.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => verdict_distribution.push((label, 1)),
            }
        }

        let average_confidence = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.confidence as f64).sum::<f64>() / results.len() as f64
        };

        BatchSummary {
            total_urls: results.len(),
            successful_analyses,
            verdict_distribution,
            average_confidence,
        }
    }
}
