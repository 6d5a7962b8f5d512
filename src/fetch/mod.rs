//! Content fetching
//!
//! Resolves the markup a pipeline run works on: inline content wins, then a
//! fetch by source URL, then a fixed mock page. Fetching never fails - any
//! problem degrades to the mock page so the run always proceeds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Source label reported when the mock page was used
pub const MOCK_SOURCE: &str = "mock";

/// Source label reported when inline markup was supplied
pub const INLINE_SOURCE: &str = "inline";

const NO_SOURCE_PAGE: &str = "<html><body><h1>No source provided</h1></body></html>";
const FALLBACK_PAGE: &str = "<html><body><h1>Fallback scrape mode</h1></body></html>";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                          AppleWebKit/537.36 (KHTML, like Gecko)";

/// How a page is retrieved
///
/// Browser mode is a placeholder that delegates to the HTTP fetcher; it
/// exists so callers can already select it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeMode {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Browser-driven retrieval (currently delegates to HTTP)
    Browser,
}

impl std::fmt::Display for ScrapeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Browser => write!(f, "browser"),
        }
    }
}

impl std::str::FromStr for ScrapeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "browser" => Ok(Self::Browser),
            _ => Err(format!("Invalid scrape mode: {s}. Use: http, browser")),
        }
    }
}

/// Fetches page markup for the pipeline
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    timeout: Duration,
}

impl Default for ContentFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl ContentFetcher {
    /// Create a fetcher with the given per-request timeout
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Resolve `(source_label, markup)` for a run
    ///
    /// Inline markup short-circuits everything. A blank source yields the
    /// mock no-source page; a failed fetch yields the mock fallback page.
    /// This never errors.
    #[must_use]
    pub fn fetch(&self, source_url: &str, raw_markup: &str, mode: ScrapeMode) -> (String, String) {
        if !raw_markup.trim().is_empty() {
            return (INLINE_SOURCE.to_string(), raw_markup.to_string());
        }

        if mode == ScrapeMode::Browser {
            log::info!("browser mode requested; delegating to HTTP fetcher");
        }

        let url = normalize_url(source_url);
        if url.is_empty() {
            return (MOCK_SOURCE.to_string(), NO_SOURCE_PAGE.to_string());
        }

        match self.get(&url) {
            Ok(markup) => (url, markup),
            Err(err) => {
                log::warn!("fetch failed for {url}: {err:#}");
                (MOCK_SOURCE.to_string(), FALLBACK_PAGE.to_string())
            },
        }
    }

    fn get(&self, url: &str) -> anyhow::Result<String> {
        let http = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let response = http.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }
}

/// Trim the source and default the scheme to https
fn normalize_url(url: &str) -> String {
    let cleaned = url.trim();
    if cleaned.is_empty() {
        return String::new();
    }
    if cleaned.contains("://") {
        cleaned.to_string()
    } else {
        format!("https://{cleaned}")
    }
}
