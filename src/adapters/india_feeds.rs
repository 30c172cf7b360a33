//! Regional fallback adapter — Indian news outlet RSS feeds.
//!
//! When the primary tier comes back thin, these feeds still give real
//! coverage of India-centric topics. Each outlet publishes standard
//! RSS 2.0 with RFC 2822 `pubDate`s.

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

/// Outlets polled for regional coverage, name first.
const FEEDS: &[(&str, &str)] = &[
    (
        "The Hindu",
        "https://www.thehindu.com/news/national/feeder/default.rss",
    ),
    (
        "Times of India",
        "https://timesofindia.indiatimes.com/rssfeedstopstories.cms",
    ),
    (
        "NDTV",
        "https://feeds.feedburner.com/ndtvnews-top-stories",
    ),
    ("Indian Express", "https://indianexpress.com/feed/"),
];

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    item: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

/// RSS poller over a fixed set of Indian news outlets.
pub struct IndiaFeedsAdapter {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl IndiaFeedsAdapter {
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_scraper_client(config)?,
            limiter: RateLimiter::new(Source::IndiaFeeds.requests_per_minute()),
        })
    }

    async fn fetch_feed(&self, outlet: &str, url: &str) -> Result<Vec<ContentRecord>> {
        self.limiter.await_slot().await;
        let xml = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResearchError::Http(format!("{outlet} feed request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ResearchError::Http(format!("{outlet} feed HTTP error: {e}")))?
            .text()
            .await
            .map_err(|e| ResearchError::Http(format!("{outlet} feed read failed: {e}")))?;
        parse_feed(&xml, outlet)
    }
}

#[async_trait]
impl SourceAdapter for IndiaFeedsAdapter {
    async fn scrape(&self, query: &str, max_results: usize) -> Result<Vec<ContentRecord>> {
        tracing::trace!(query, "India feeds fetch");

        let mut records = Vec::new();
        for (outlet, url) in FEEDS {
            match self.fetch_feed(outlet, url).await {
                Ok(mut items) => records.append(&mut items),
                // A dead outlet must not block the others.
                Err(e) => tracing::warn!(outlet, error = %e, "feed skipped"),
            }
        }

        tracing::debug!(count = records.len(), "India feed items parsed");
        Ok(ranker::rank(
            records,
            &ranker::query_terms(query),
            max_results,
            Utc::now(),
        ))
    }

    fn source(&self) -> Source {
        Source::IndiaFeeds
    }
}

/// Parse one RSS document into records labelled with the outlet name.
/// Items without a title or link are skipped.
fn parse_feed(xml: &str, outlet: &str) -> Result<Vec<ContentRecord>> {
    let rss: Rss = quick_xml::de::from_str(xml)
        .map_err(|e| ResearchError::Parse(format!("{outlet} feed decode failed: {e}")))?;

    let records = rss
        .channel
        .item
        .into_iter()
        .filter_map(|item| {
            let title = item.title.as_deref().unwrap_or("").trim().to_string();
            let link = item.link.as_deref().unwrap_or("").trim().to_string();
            if title.is_empty() || link.is_empty() {
                return None;
            }
            let summary = item
                .description
                .as_deref()
                .map(strip_markup)
                .filter(|s| !s.is_empty());
            Some(ContentRecord {
                title,
                url: link,
                source: outlet.to_string(),
                published_at: item.pub_date.as_deref().and_then(parse_pub_date),
                summary,
                content_type: ContentType::Article,
                relevance_score: 0.0,
                synthetic: false,
            })
        })
        .collect();
    Ok(records)
}

fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Feed descriptions often embed HTML. Drop the tags, keep the text.
fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
