//! Wikipedia adapter — encyclopedia background via the MediaWiki API.
//!
//! Uses the public search API rather than scraping, so responses are
//! stable JSON. Snippets come back with `<span class="searchmatch">`
//! highlight wrappers and HTML entities that must be scrubbed before
//! ranking.

use crate::adapter::SourceAdapter;
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::http;
use crate::limiter::RateLimiter;
use crate::ranker;
use crate::types::{ContentRecord, ContentType, Source};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

const API_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
    #[serde(default)]
    snippet: String,
    timestamp: Option<String>,
}

/// Wikipedia search API client.
pub struct WikipediaAdapter {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl WikipediaAdapter {
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_api_client(config)?,
            limiter: RateLimiter::new(Source::Wikipedia.requests_per_minute()),
        })
    }
}

#[async_trait]
impl SourceAdapter for WikipediaAdapter {
    async fn scrape(&self, query: &str, max_results: usize) -> Result<Vec<ContentRecord>> {
        tracing::trace!(query, "Wikipedia fetch");
        self.limiter.await_slot().await;

        let limit = max_results.to_string();
        let response = self
            .client
            .get(API_ENDPOINT)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", &limit),
                ("srprop", "snippet|timestamp"),
            ])
            .send()
            .await
            .map_err(|e| ResearchError::Http(format!("Wikipedia request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ResearchError::Http(format!("Wikipedia HTTP error: {e}")))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ResearchError::Parse(format!("Wikipedia response decode failed: {e}")))?;

        let records = records_from_response(body, max_results);
        tracing::debug!(count = records.len(), "Wikipedia results parsed");
        Ok(ranker::rank(
            records,
            &ranker::query_terms(query),
            max_results,
            Utc::now(),
        ))
    }

    fn source(&self) -> Source {
        Source::Wikipedia
    }
}

fn records_from_response(body: SearchResponse, max_results: usize) -> Vec<ContentRecord> {
    let hits = body.query.map(|q| q.search).unwrap_or_default();
    hits.into_iter()
        .take(max_results)
        .filter(|hit| !hit.title.trim().is_empty())
        .map(|hit| {
            let snippet = scrub_snippet(&hit.snippet);
            let published_at = hit
                .timestamp
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.with_timezone(&Utc));
            ContentRecord {
                url: article_url(&hit.title),
                title: hit.title,
                source: Source::Wikipedia.name().to_string(),
                published_at,
                summary: (!snippet.is_empty()).then_some(snippet),
                content_type: ContentType::EncyclopediaEntry,
                relevance_score: 0.0,
                synthetic: false,
            }
        })
        .collect()
}

/// Canonical article URL from a page title.
fn article_url(title: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_"))
}

/// Remove search-highlight spans and decode the entities the API emits.
fn scrub_snippet(raw: &str) -> String {
    let mut text = raw
        .replace(r#"<span class="searchmatch">"#, "")
        .replace("</span>", "");
    for (entity, plain) in [
        ("&quot;", "\""),
        ("&#039;", "'"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&amp;", "&"),
    ] {
        text = text.replace(entity, plain);
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_RESPONSE: &str = r#"{
        "query": {
            "search": [
                {
                    "title": "Mango",
                    "snippet": "A <span class=\"searchmatch\">mango</span> is an edible stone fruit &amp; a drupe.",
                    "timestamp": "2024-06-01T12:30:00Z"
                },
                {
                    "title": "Mango cultivation in India",
                    "snippet": "<span class=\"searchmatch\">Mango</span> cultivation is widespread.",
                    "timestamp": "2024-05-20T08:00:00Z"
                }
            ]
        }
    }"#;

    fn decode(json: &str) -> SearchResponse {
        serde_json::from_str(json).expect("mock should decode")
    }

    #[test]
    fn decodes_and_scrubs_mock_response() {
        let records = records_from_response(decode(MOCK_RESPONSE), 10);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].title, "Mango");
        assert_eq!(records[0].url, "https://en.wikipedia.org/wiki/Mango");
        assert_eq!(
            records[0].summary.as_deref(),
            Some("A mango is an edible stone fruit & a drupe.")
        );
        assert_eq!(records[0].content_type, ContentType::EncyclopediaEntry);
        assert!(records[0].published_at.is_some());

        assert_eq!(
            records[1].url,
            "https://en.wikipedia.org/wiki/Mango_cultivation_in_India"
        );
    }

    #[test]
    fn respects_max_results() {
        let records = records_from_response(decode(MOCK_RESPONSE), 1);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_query_block_yields_empty() {
        let records = records_from_response(decode(r#"{"batchcomplete":""}"#), 10);
        assert!(records.is_empty());
    }

    #[test]
    fn bad_timestamp_leaves_record_undated() {
        let json = r#"{"query":{"search":[{"title":"Mango","snippet":"","timestamp":"whenever"}]}}"#;
        let records = records_from_response(decode(json), 10);
        assert_eq!(records.len(), 1);
        assert!(records[0].published_at.is_none());
        assert!(records[0].summary.is_none());
    }

    #[test]
    fn scrub_removes_highlight_and_entities() {
        let raw = r#"The <span class="searchmatch">mango</span> &quot;king of fruits&quot; &#039;24"#;
        assert_eq!(scrub_snippet(raw), "The mango \"king of fruits\" '24");
    }

    #[test]
    fn article_url_underscores_spaces() {
        assert_eq!(
            article_url("Mango cultivation in India"),
            "https://en.wikipedia.org/wiki/Mango_cultivation_in_India"
        );
    }

    #[test]
    fn adapter_source_is_wikipedia() {
        let adapter = WikipediaAdapter::new(&ResearchConfig::default()).expect("client");
        assert_eq!(adapter.source(), Source::Wikipedia);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WikipediaAdapter>();
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_wikipedia_fetch() {
        let adapter = WikipediaAdapter::new(&ResearchConfig::default()).expect("client");
        let records = adapter.scrape("mango", 5).await.expect("live fetch");
        assert!(!records.is_empty());
        for r in &records {
            assert!(r.url.starts_with("https://en.wikipedia.org/wiki/"));
        }
    }
}
