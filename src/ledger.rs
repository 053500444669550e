//! Threat ledger and monitoring registry.
//!
//! Both are in-memory, process-lifetime stores shared by every analysis.
//! History lives behind a mutex keyed by URL fingerprint; the aggregate
//! counters are atomics so concurrent analyses never contend on the map for
//! a statistics bump.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::{AnalysisResult, ThreatStatistics, Verdict};

/// Hex SHA-256 of a URL string; the ledger's lookup key.
pub fn fingerprint(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// One historical analysis of a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub timestamp: DateTime<Utc>,
    pub result: AnalysisResult,
}

/// Append-only analysis history plus running verdict counters.
///
/// Repeated analyses of the same URL accumulate under one fingerprint rather
/// than overwriting. Counters increment exactly once per recorded result;
/// unrecognized verdicts bump only the total.
pub struct ThreatLedger {
    history: Mutex<HashMap<String, Vec<LedgerEntry>>>,
    total_analyzed: AtomicU64,
    safe_count: AtomicU64,
    suspicious_count: AtomicU64,
    malicious_count: AtomicU64,
}

impl ThreatLedger {
    pub fn new() -> Self {
        ThreatLedger {
            history: Mutex::new(HashMap::new()),
            total_analyzed: AtomicU64::new(0),
            safe_count: AtomicU64::new(0),
            suspicious_count: AtomicU64::new(0),
            malicious_count: AtomicU64::new(0),
        }
    }

    /// Appends a result to its fingerprint's history and updates the
    /// counters.
    pub fn record_analysis(&self, result: &AnalysisResult) {
        let entry = LedgerEntry {
            timestamp: result.timestamp,
            result: result.clone(),
        };
        {
            let mut history = self.history.lock().expect("ledger lock poisoned");
            history
                .entry(result.fingerprint.clone())
                .or_default()
                .push(entry);
        }

        self.total_analyzed.fetch_add(1, Ordering::SeqCst);
        match result.verdict {
            Verdict::Safe => {
                self.safe_count.fetch_add(1, Ordering::SeqCst);
            }
            Verdict::Suspicious => {
                self.suspicious_count.fetch_add(1, Ordering::SeqCst);
            }
            Verdict::Malicious => {
                self.malicious_count.fetch_add(1, Ordering::SeqCst);
            }
            Verdict::Error => {}
        }
    }

    /// Ordered history for a URL; empty if it was never analyzed.
    pub fn get_history(&self, url: &str) -> Vec<LedgerEntry> {
        let key = fingerprint(url);
        self.history
            .lock()
            .expect("ledger lock poisoned")
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the counters, with percentages derived when anything has
    /// been analyzed.
    pub fn statistics(&self) -> ThreatStatistics {
        let total = self.total_analyzed.load(Ordering::SeqCst);
        let safe = self.safe_count.load(Ordering::SeqCst);
        let suspicious = self.suspicious_count.load(Ordering::SeqCst);
        let malicious = self.malicious_count.load(Ordering::SeqCst);

        let pct = |count: u64| {
            if total > 0 {
                Some((count as f64 / total as f64) * 100.0)
            } else {
                None
            }
        };

        ThreatStatistics {
            total_analyzed: total,
            safe_count: safe,
            suspicious_count: suspicious,
            malicious_count: malicious,
            safe_percentage: pct(safe),
            suspicious_percentage: pct(suspicious),
            malicious_percentage: pct(malicious),
        }
    }
}

impl Default for ThreatLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// A URL flagged for periodic re-checking.
///
/// Scheduling is an external concern; only the registration state is kept
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorEntry {
    pub url: String,
    pub interval_hours: u32,
    pub last_checked: DateTime<Utc>,
    pub status: String,
}

/// Set of URLs registered for monitoring, keyed by URL.
pub struct MonitorRegistry {
    entries: Mutex<HashMap<String, MonitorEntry>>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        MonitorRegistry {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a URL; re-registering replaces the interval.
    pub fn start_monitoring(&self, url: &str, interval_hours: u32) {
        let entry = MonitorEntry {
            url: url.to_string(),
            interval_hours,
            last_checked: Utc::now(),
            status: "monitoring".to_string(),
        };
        self.entries
            .lock()
            .expect("registry lock poisoned")
            .insert(url.to_string(), entry);
    }

    /// Removes a URL; unknown URLs are a no-op.
    pub fn stop_monitoring(&self, url: &str) {
        self.entries
            .lock()
            .expect("registry lock poisoned")
            .remove(url);
    }

    /// URLs currently registered, in no particular order.
    pub fn list_monitored(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

impl Default for MonitorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BasicChecks;

    fn result_with(url: &str, verdict: Verdict) -> AnalysisResult {
        AnalysisResult {
            url: url.to_string(),
            verdict,
            confidence: 80,
            explanation: "test".to_string(),
            threats_detected: Vec::new(),
            domain_info: Default::default(),
            redirect_info: Default::default(),
            registration: Default::default(),
            url_structure: Default::default(),
            content_analysis: Default::default(),
            basic_checks: BasicChecks::default(),
            fingerprint: fingerprint(url),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_fingerprint_stable_and_distinct() {
        assert_eq!(fingerprint("https://a.com"), fingerprint("https://a.com"));
        assert_ne!(fingerprint("https://a.com"), fingerprint("https://b.com"));
    }

    #[test]
    fn test_replay_accumulates_history() {
        let ledger = ThreatLedger::new();
        let url = "https://example.com";
        ledger.record_analysis(&result_with(url, Verdict::Safe));
        ledger.record_analysis(&result_with(url, Verdict::Suspicious));

        let history = ledger.get_history(url);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].result.verdict, Verdict::Safe);
        assert_eq!(history[1].result.verdict, Verdict::Suspicious);
        assert_eq!(ledger.statistics().total_analyzed, 2);
    }

    #[test]
    fn test_history_empty_for_unknown_url() {
        let ledger = ThreatLedger::new();
        assert!(ledger.get_history("https://never-seen.example").is_empty());
    }

    #[test]
    fn test_counters_by_verdict() {
        let ledger = ThreatLedger::new();
        ledger.record_analysis(&result_with("https://a.com", Verdict::Safe));
        ledger.record_analysis(&result_with("https://b.com", Verdict::Malicious));
        ledger.record_analysis(&result_with("https://c.com", Verdict::Malicious));

        let stats = ledger.statistics();
        assert_eq!(stats.total_analyzed, 3);
        assert_eq!(stats.safe_count, 1);
        assert_eq!(stats.suspicious_count, 0);
        assert_eq!(stats.malicious_count, 2);
    }

    #[test]
    fn test_error_verdict_bumps_only_total() {
        let ledger = ThreatLedger::new();
        ledger.record_analysis(&result_with("https://a.com", Verdict::Error));

        let stats = ledger.statistics();
        assert_eq!(stats.total_analyzed, 1);
        assert_eq!(
            stats.safe_count + stats.suspicious_count + stats.malicious_count,
            0
        );
    }

    #[test]
    fn test_statistics_percentages() {
        let ledger = ThreatLedger::new();
        assert_eq!(ledger.statistics().safe_percentage, None);

        ledger.record_analysis(&result_with("https://a.com", Verdict::Safe));
        ledger.record_analysis(&result_with("https://b.com", Verdict::Malicious));
        let stats = ledger.statistics();
        assert_eq!(stats.safe_percentage, Some(50.0));
        assert_eq!(stats.malicious_percentage, Some(50.0));
        assert_eq!(stats.suspicious_percentage, Some(0.0));
    }

    #[test]
    fn test_counter_sum_never_exceeds_total() {
        let ledger = ThreatLedger::new();
        for (i, verdict) in [
            Verdict::Safe,
            Verdict::Error,
            Verdict::Suspicious,
            Verdict::Malicious,
        ]
        .iter()
        .enumerate()
        {
            ledger.record_analysis(&result_with(&format!("https://{i}.com"), *verdict));
            let stats = ledger.statistics();
            assert!(
                stats.safe_count + stats.suspicious_count + stats.malicious_count
                    <= stats.total_analyzed
            );
        }
    }

    #[test]
    fn test_monitor_registry_round_trip() {
        let registry = MonitorRegistry::new();
        registry.start_monitoring("https://watch.example.com", 24);
        registry.start_monitoring("https://other.example.com", 6);
        let mut listed = registry.list_monitored();
        listed.sort();
        assert_eq!(
            listed,
            vec![
                "https://other.example.com".to_string(),
                "https://watch.example.com".to_string()
            ]
        );

        registry.stop_monitoring("https://watch.example.com");
        assert_eq!(
            registry.list_monitored(),
            vec!["https://other.example.com".to_string()]
        );

        // Stopping an unknown URL is a no-op.
        registry.stop_monitoring("https://never-registered.example.com");
        assert_eq!(registry.list_monitored().len(), 1);
    }
}
