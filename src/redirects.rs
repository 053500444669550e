//! HTTP redirect chain resolution.
//!
//! Follows redirect chains manually with HEAD requests against a client that
//! has automatic redirects disabled, so the hop count is observable. Bodies
//! are never downloaded.

use log::{debug, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::SUSPICIOUS_REDIRECT_THRESHOLD;
use crate::error_handling::{Degradation, PipelineStats};

/// Outcome of resolving a URL's redirect chain.
///
/// `final_url` is always set: on any network failure it falls back to the
/// original URL with a zero hop count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedirectInfo {
    pub redirect_count: usize,
    pub final_url: String,
    /// True iff the hop count exceeds the threshold. Exactly at the
    /// threshold is not suspicious.
    pub suspicious_redirect: bool,
}

fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// Resolves the redirect chain for a URL, following up to `max_hops` hops.
///
/// Network failure anywhere in the chain is not escalated: the result reports
/// zero redirects and the original URL. A missing `Location` header on a
/// redirect status ends the chain at the current URL.
pub async fn resolve_redirects(
    client: &reqwest::Client,
    start_url: &str,
    max_hops: usize,
    stats: &PipelineStats,
) -> RedirectInfo {
    let mut current = start_url.to_string();
    let mut hops = 0usize;

    for _ in 0..max_hops {
        let resp = match client.head(&current).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Redirect probe failed for {current}: {e}");
                stats.record(Degradation::RedirectProbeFailed);
                return RedirectInfo {
                    redirect_count: 0,
                    final_url: start_url.to_string(),
                    suspicious_redirect: false,
                };
            }
        };

        let status = resp.status().as_u16();
        if !is_redirect_status(status) {
            break;
        }

        let Some(loc) = resp.headers().get(reqwest::header::LOCATION) else {
            warn!("Redirect status {status} for {current} but no Location header");
            break;
        };
        let loc = loc.to_str().unwrap_or("").to_string();
        let next = match Url::parse(&loc)
            .or_else(|_| Url::parse(&current).and_then(|base| base.join(&loc)))
        {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!("Unparseable Location header '{loc}' from {current}: {e}");
                break;
            }
        };

        debug!("Redirect hop {}: {current} -> {next}", hops + 1);
        current = next;
        hops += 1;
    }

    RedirectInfo {
        redirect_count: hops,
        final_url: current,
        suspicious_redirect: hops > SUSPICIOUS_REDIRECT_THRESHOLD,
    }
}
