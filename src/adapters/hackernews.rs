//! Hacker News adapter — tech discussion via the Firebase item API.
//!
//! Two-step fetch: `topstories.json` lists current story IDs, then each
//! story is fetched individually. The API has no search, so stories are
//! filtered client-side by query-term presence in the title.

use crate::adapter::SourceAdapter;
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::http;
use crate::limiter::RateLimiter;
use crate::ranker;
use crate::types::{ContentRecord, ContentType, Source};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Deserialize;

const TOP_STORIES: &str = "https://hacker-news.firebaseio.com/v0/topstories.json";
const ITEM_BASE: &str = "https://hacker-news.firebaseio.com/v0/item";

/// How many top stories to scan for matches. The front pages only.
const SCAN_LIMIT: usize = 25;
/// Concurrent item fetches.
const FETCH_CONCURRENCY: usize = 8;

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: String,
    url: Option<String>,
    time: Option<i64>,
}

/// Hacker News API client.
pub struct HackerNewsAdapter {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl HackerNewsAdapter {
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_api_client(config)?,
            limiter: RateLimiter::new(Source::HackerNews.requests_per_minute()),
        })
    }

    async fn fetch_item(&self, id: u64) -> Result<(u64, Item)> {
        self.limiter.await_slot().await;
        let item = self
            .client
            .get(format!("{ITEM_BASE}/{id}.json"))
            .send()
            .await
            .map_err(|e| ResearchError::Http(format!("Hacker News item {id} failed: {e}")))?
            .json()
            .await
            .map_err(|e| {
                ResearchError::Parse(format!("Hacker News item {id} decode failed: {e}"))
            })?;
        Ok((id, item))
    }
}

#[async_trait]
impl SourceAdapter for HackerNewsAdapter {
    async fn scrape(&self, query: &str, max_results: usize) -> Result<Vec<ContentRecord>> {
        tracing::trace!(query, "Hacker News fetch");
        self.limiter.await_slot().await;

        let ids: Vec<u64> = self
            .client
            .get(TOP_STORIES)
            .send()
            .await
            .map_err(|e| ResearchError::Http(format!("Hacker News request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ResearchError::Http(format!("Hacker News HTTP error: {e}")))?
            .json()
            .await
            .map_err(|e| ResearchError::Parse(format!("Hacker News list decode failed: {e}")))?;

        let terms = ranker::query_terms(query);
        let mut records = Vec::new();

        let mut items = stream::iter(ids.into_iter().take(SCAN_LIMIT))
            .map(|id| self.fetch_item(id))
            .buffer_unordered(FETCH_CONCURRENCY);

        while let Some(fetched) = items.next().await {
            match fetched {
                Ok((id, item)) => {
                    if let Some(record) = record_from_item(id, item, &terms) {
                        records.push(record);
                    }
                }
                // One bad item never sinks the batch.
                Err(e) => tracing::warn!(error = %e, "Hacker News item skipped"),
            }
        }
        drop(items);

        tracing::debug!(count = records.len(), "Hacker News results parsed");
        Ok(ranker::rank(records, &terms, max_results, Utc::now()))
    }

    fn source(&self) -> Source {
        Source::HackerNews
    }
}

/// Keep an item only when its title mentions at least one query term.
/// Stories without an outbound link get their discussion page URL.
fn record_from_item(id: u64, item: Item, terms: &[String]) -> Option<ContentRecord> {
    let title = item.title.trim();
    if title.is_empty() {
        return None;
    }
    let lowered = title.to_lowercase();
    if !terms.is_empty() && !terms.iter().any(|t| lowered.contains(t.as_str())) {
        return None;
    }
    let url = match item.url {
        Some(u) if !u.trim().is_empty() => u,
        _ => format!("https://news.ycombinator.com/item?id={id}"),
    };
    Some(ContentRecord {
        title: title.to_string(),
        url,
        source: Source::HackerNews.name().to_string(),
        published_at: item.time.and_then(|t| DateTime::from_timestamp(t, 0)),
        summary: None,
        content_type: ContentType::ForumPost,
        relevance_score: 0.0,
        synthetic: false,
    })
}
