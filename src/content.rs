//! Page content inspection.
//!
//! Fetches the page with a short timeout and a browser-like User-Agent, then
//! extracts coarse phishing signals from the parsed HTML. Everything here is
//! best-effort: any fetch or parse problem yields zeroed signals with an
//! error marker rather than a pipeline failure.

use std::sync::LazyLock;

use log::{debug, warn};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// Keywords whose presence in page text suggests pressure tactics.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "urgent",
    "verify",
    "suspended",
    "expired",
    "security",
    "update",
    "confirm",
    "validate",
    "restore",
    "unlock",
    "immediately",
];

static FORM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("static form selector"));
static SCRIPT_SRC_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[src]").expect("static script selector"));
static LINK_HREF_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static anchor selector"));
static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("static meta selector"));
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static title selector"));

/// Signals derived from a best-effort fetch of the page body.
///
/// On fetch failure all counters are zero and `error` is set; the pipeline
/// continues regardless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSignals {
    pub suspicious_keyword_count: usize,
    pub has_login_form: bool,
    pub external_scripts_count: usize,
    pub external_links_count: usize,
    pub suspicious_meta_tags: bool,
    pub content_length: usize,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContentSignals {
    fn failed(message: String) -> Self {
        ContentSignals {
            title: "Error loading content".to_string(),
            error: Some(message),
            ..Default::default()
        }
    }
}

/// Fetches a URL and extracts content signals from its body.
pub async fn inspect_content(client: &reqwest::Client, url: &str) -> ContentSignals {
    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("Content fetch failed for {url}: {e}");
            return ContentSignals::failed(e.to_string());
        }
    };

    let body = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            warn!("Content body read failed for {url}: {e}");
            return ContentSignals::failed(e.to_string());
        }
    };

    let signals = extract_signals(&body);
    debug!(
        "Content signals for {url}: {} keywords, login_form={}, {} scripts, {} links",
        signals.suspicious_keyword_count,
        signals.has_login_form,
        signals.external_scripts_count,
        signals.external_links_count
    );
    signals
}

/// Extracts signals from an HTML body. Pure; separated from the fetch so it
/// is unit-testable without a server.
pub fn extract_signals(body: &str) -> ContentSignals {
    let document = Html::parse_document(body);

    let text_content = document
        .root_element()
        .text()
        .collect::<String>()
        .to_lowercase();

    let suspicious_keyword_count = SUSPICIOUS_KEYWORDS
        .iter()
        .filter(|kw| text_content.contains(*kw))
        .count();

    // Deliberately coarse: substring match over each form's serialized markup.
    let has_login_form = document.select(&FORM_SELECTOR).any(|form| {
        let markup = form.html().to_lowercase();
        markup.contains("password") || markup.contains("login")
    });

    let external_scripts_count = document.select(&SCRIPT_SRC_SELECTOR).count();
    let external_links_count = document.select(&LINK_HREF_SELECTOR).count();

    let suspicious_meta_tags = document.select(&META_SELECTOR).any(|meta| {
        let markup = meta.html().to_lowercase();
        markup.contains("phishing") || markup.contains("scam")
    });

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "No title".to_string());

    ContentSignals {
        suspicious_keyword_count,
        has_login_form,
        external_scripts_count,
        external_links_count,
        suspicious_meta_tags,
        content_length: text_content.len(),
        title,
        error: None,
    }
}
