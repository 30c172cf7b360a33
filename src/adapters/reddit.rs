//! Reddit adapter — discussion threads from the public search listing.
//!
//! The `search.json` endpoint needs no authentication. Each child's
//! `data` block carries the post title, outbound URL, subreddit and a
//! Unix creation time.

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

const SEARCH_ENDPOINT: &str = "https://www.reddit.com/search.json";

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    subreddit: String,
    created_utc: Option<f64>,
    #[serde(default)]
    selftext: String,
}

/// Reddit public search client.
pub struct RedditAdapter {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl RedditAdapter {
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_api_client(config)?,
            limiter: RateLimiter::new(Source::Reddit.requests_per_minute()),
        })
    }
}

#[async_trait]
impl SourceAdapter for RedditAdapter {
    async fn scrape(&self, query: &str, max_results: usize) -> Result<Vec<ContentRecord>> {
        tracing::trace!(query, "Reddit fetch");
        self.limiter.await_slot().await;

        let limit = max_results.to_string();
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query), ("sort", "new"), ("limit", &limit)])
            .send()
            .await
            .map_err(|e| ResearchError::Http(format!("Reddit request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ResearchError::Http(format!("Reddit HTTP error: {e}")))?;

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| ResearchError::Parse(format!("Reddit response decode failed: {e}")))?;

        let records = records_from_listing(listing, max_results);
        tracing::debug!(count = records.len(), "Reddit results parsed");
        Ok(ranker::rank(
            records,
            &ranker::query_terms(query),
            max_results,
            Utc::now(),
        ))
    }

    fn source(&self) -> Source {
        Source::Reddit
    }
}

// Malformed posts are dropped before the limit applies, so they never
// cost a slot that a valid post further down the listing could use.
fn records_from_listing(listing: Listing, max_results: usize) -> Vec<ContentRecord> {
    listing
        .data
        .children
        .into_iter()
        .filter_map(|child| {
            let post = child.data;
            if post.title.trim().is_empty() || post.url.trim().is_empty() {
                return None;
            }
            let published_at = post
                .created_utc
                .and_then(|epoch| DateTime::from_timestamp(epoch as i64, 0));
            let summary = post.selftext.trim();
            let summary = (!summary.is_empty()).then(|| truncate_chars(summary, 280));
            Some(ContentRecord {
                title: post.title,
                url: post.url,
                source: format!("r/{}", post.subreddit),
                published_at,
                summary,
                content_type: ContentType::ForumPost,
                relevance_score: 0.0,
                synthetic: false,
            })
        })
        .take(max_results)
        .collect()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
