//! DuckDuckGo adapter — most scraper-friendly general search engine.
//!
//! Uses the HTML-only version at `https://html.duckduckgo.com/html/`
//! which requires no JavaScript and is tolerant of automated requests.

use crate::adapter::SourceAdapter;
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::http;
use crate::limiter::RateLimiter;
use crate::ranker;
use crate::types::{ContentRecord, ContentType, Source};
use async_trait::async_trait;
use chrono::Utc;
use scraper::{Html, Selector};
use url::Url;

/// DuckDuckGo HTML search scraper.
///
/// The first-choice general engine for automated research. Uses a POST
/// request to the HTML-only endpoint; result links arrive wrapped in a
/// redirect that must be unwound.
pub struct DuckDuckGoAdapter {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl DuckDuckGoAdapter {
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_scraper_client(config)?,
            limiter: RateLimiter::new(Source::DuckDuckGo.requests_per_minute()),
        })
    }

    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// We parse out the `uddg` query parameter and URL-decode it.
    fn extract_url(href: &str) -> Option<String> {
        // Handle protocol-relative URLs
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

#[async_trait]
impl SourceAdapter for DuckDuckGoAdapter {
    async fn scrape(&self, query: &str, max_results: usize) -> Result<Vec<ContentRecord>> {
        tracing::trace!(query, "DuckDuckGo fetch");
        self.limiter.await_slot().await;

        let response = self
            .client
            .post("https://html.duckduckgo.com/html/")
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| ResearchError::Http(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ResearchError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| ResearchError::Http(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        let records = parse_duckduckgo_html(&html, max_results)?;
        Ok(ranker::rank(
            records,
            &ranker::query_terms(query),
            max_results,
            Utc::now(),
        ))
    }

    fn source(&self) -> Source {
        Source::DuckDuckGo
    }
}

/// Parse DuckDuckGo HTML into content records.
///
/// Extracted as a separate function for testability with mock HTML.
/// Search engines expose no real publication dates, so records are
/// undated.
fn parse_duckduckgo_html(html: &str, max_results: usize) -> Result<Vec<ContentRecord>> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| ResearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| ResearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| ResearchError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut records = Vec::new();

    for element in document.select(&result_sel) {
        let title_el = match element.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let href = match title_el.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        let url = match DuckDuckGoAdapter::extract_url(href) {
            Some(u) => u,
            None => continue,
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        records.push(ContentRecord {
            title,
            url,
            source: Source::DuckDuckGo.name().to_string(),
            published_at: None,
            summary: snippet,
            content_type: ContentType::Article,
            relevance_score: 0.0,
            synthetic: false,
        });

        if records.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = records.len(), "DuckDuckGo results parsed");
    Ok(records)
}
