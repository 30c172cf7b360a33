//! HTTP client profiles for the two kinds of source surfaces.
//!
//! HTML search engines get a browser-shaped client: rotating User-Agent,
//! cookie jar (consent-page redirects), and browser `Accept` headers,
//! because they serve degraded markup or block outright when they detect
//! automation. The JSON APIs (MediaWiki, Reddit, Firebase) get the
//! opposite: a plain, honestly identified client that asks for JSON and
//! carries no cookies. Reddit in particular throttles generic browser
//! agents harder than descriptive ones.

use crate::config::ResearchConfig;
use crate::error::ResearchError;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;

/// Rotated across scraper clients. Current desktop browsers only; engines
/// serve stripped-down markup to anything that looks old.
const BROWSER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:138.0) Gecko/20100101 Firefox/138.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:138.0) Gecko/20100101 Firefox/138.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.4 Safari/605.1.15",
];

/// What API clients identify as.
const API_AGENT: &str = concat!("mash-research/", env!("CARGO_PKG_VERSION"));

/// Build a client for scraping HTML surfaces (DuckDuckGo, Bing, and the
/// outlet RSS endpoints, which sit behind the same bot-filtering CDNs).
///
/// # Errors
///
/// Returns [`ResearchError::Http`] if the client cannot be constructed.
pub fn build_scraper_client(config: &ResearchConfig) -> Result<reqwest::Client, ResearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_browser_agent().to_owned(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ResearchError::Http(format!("failed to build scraper client: {e}")))
}

/// Build a client for the JSON APIs. No cookies, no browser disguise,
/// `Accept: application/json`.
///
/// # Errors
///
/// Returns [`ResearchError::Http`] if the client cannot be constructed.
pub fn build_api_client(config: &ResearchConfig) -> Result<reqwest::Client, ResearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => API_AGENT.to_owned(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| ResearchError::Http(format!("failed to build API client: {e}")))
}

fn random_browser_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    BROWSER_AGENTS
        .choose(&mut rng)
        .copied()
        .unwrap_or(BROWSER_AGENTS[0])
}
