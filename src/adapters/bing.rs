//! Bing adapter — a second general index with date hints.
//!
//! Bing snippets often carry a leading relative age ("3 days ago · ...")
//! which is the only date signal a search engine gives us, so it is
//! parsed into a real timestamp rather than left in the summary text.

use crate::adapter::{split_age_prefix, SourceAdapter};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::http;
use crate::limiter::RateLimiter;
use crate::ranker;
use crate::types::{ContentRecord, ContentType, Source};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

/// Bing HTML search scraper.
pub struct BingAdapter {
    client: reqwest::Client,
    limiter: RateLimiter,
}

impl BingAdapter {
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_scraper_client(config)?,
            limiter: RateLimiter::new(Source::Bing.requests_per_minute()),
        })
    }
}

#[async_trait]
impl SourceAdapter for BingAdapter {
    async fn scrape(&self, query: &str, max_results: usize) -> Result<Vec<ContentRecord>> {
        tracing::trace!(query, "Bing fetch");
        self.limiter.await_slot().await;

        let response = self
            .client
            .get("https://www.bing.com/search")
            .query(&[("q", query), ("setlang", "en")])
            .send()
            .await
            .map_err(|e| ResearchError::Http(format!("Bing request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ResearchError::Http(format!("Bing HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| ResearchError::Http(format!("Bing response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "Bing response received");

        let records = parse_bing_html(&html, max_results, Utc::now())?;
        Ok(ranker::rank(
            records,
            &ranker::query_terms(query),
            max_results,
            Utc::now(),
        ))
    }

    fn source(&self) -> Source {
        Source::Bing
    }
}

/// Parse Bing HTML into content records.
///
/// Extracted as a separate function for testability with mock HTML.
/// Relative ages in snippet prefixes are resolved against `now`.
fn parse_bing_html(
    html: &str,
    max_results: usize,
    now: DateTime<Utc>,
) -> Result<Vec<ContentRecord>> {
    let document = Html::parse_document(html);

    // Bing uses li.b_algo containers for organic search results
    let result_sel = Selector::parse("li.b_algo")
        .map_err(|e| ResearchError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse("h2")
        .map_err(|e| ResearchError::Parse(format!("invalid title selector: {e:?}")))?;
    let link_sel = Selector::parse("a")
        .map_err(|e| ResearchError::Parse(format!("invalid link selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".b_caption p, .b_lineclamp2")
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

        let url = title_el
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|h| h.to_string());

        let url = match url {
            Some(u) if !u.is_empty() => u,
            _ => continue,
        };

        let raw_snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let (published_at, snippet) = split_age_prefix(&raw_snippet, now);

        records.push(ContentRecord {
            title,
            url,
            source: Source::Bing.name().to_string(),
            published_at,
            summary: (!snippet.is_empty()).then_some(snippet),
            content_type: ContentType::Article,
            relevance_score: 0.0,
            synthetic: false,
        });

        if records.len() >= max_results {
            break;
        }
    }

    tracing::debug!(count = records.len(), "Bing results parsed");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const MOCK_BING_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<ol id="b_results">
<li class="b_algo">
  <h2><a href="https://www.thehindu.com/mango-season" h="ID=SERP">Mango Season Opens Early</a></h2>
  <div class="b_caption"><p>2 days ago · Alphonso shipments begin ahead of schedule.</p></div>
</li>
<li class="b_algo">
  <h2><a href="https://agritrade.example.com/report" h="ID=SERP">Annual Mango Trade Report</a></h2>
  <div class="b_caption"><p>A detailed report on mango production and exports.</p></div>
</li>
<li class="b_algo">
  <h2><a href="https://en.wikipedia.org/wiki/Mango" h="ID=SERP">Mango - Wikipedia</a></h2>
  <div class="b_caption"><p>The mango is an edible stone fruit.</p></div>
</li>
</ol>
</body>
</html>"#;

    #[test]
    fn parse_mock_html_returns_records() {
        let records = parse_bing_html(MOCK_BING_HTML, 10, Utc::now()).expect("should parse");
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].title, "Mango Season Opens Early");
        assert_eq!(records[0].url, "https://www.thehindu.com/mango-season");
        assert_eq!(records[0].source, "Bing");
        assert_eq!(records[1].url, "https://agritrade.example.com/report");
        assert!(records[2].url.contains("wikipedia.org"));
    }

    #[test]
    fn age_prefix_becomes_timestamp() {
        let now = Utc::now();
        let records = parse_bing_html(MOCK_BING_HTML, 10, now).expect("should parse");
        let dated = &records[0];
        assert_eq!(dated.published_at, Some(now - Duration::days(2)));
        assert_eq!(
            dated.summary.as_deref(),
            Some("Alphonso shipments begin ahead of schedule.")
        );
    }

    #[test]
    fn plain_snippet_stays_undated() {
        let records = parse_bing_html(MOCK_BING_HTML, 10, Utc::now()).expect("should parse");
        assert!(records[1].published_at.is_none());
        assert!(records[1]
            .summary
            .as_deref()
            .is_some_and(|s| s.contains("detailed report")));
    }

    #[test]
    fn parse_respects_max_results() {
        let records = parse_bing_html(MOCK_BING_HTML, 2, Utc::now()).expect("should parse");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let records = parse_bing_html("<html><body></body></html>", 10, Utc::now());
        assert!(records.expect("should parse").is_empty());
    }

    #[test]
    fn adapter_source_is_bing() {
        let adapter = BingAdapter::new(&ResearchConfig::default()).expect("client");
        assert_eq!(adapter.source(), Source::Bing);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BingAdapter>();
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_bing_fetch() {
        let adapter = BingAdapter::new(&ResearchConfig::default()).expect("client");
        let records = adapter.scrape("rust programming", 5).await;
        let records = records.expect("live fetch should work");
        for r in &records {
            assert!(!r.title.is_empty());
            assert!(!r.url.is_empty());
        }
    }
}
