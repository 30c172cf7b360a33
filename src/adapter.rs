//! The adapter seam between the orchestrator and concrete sources.
//!
//! Each content source implements [`SourceAdapter`]. The orchestrator only
//! ever holds `Arc<dyn SourceAdapter>`, so tests can substitute mock
//! adapters freely.

use crate::error::Result;
use crate::types::{ContentRecord, Source};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// A source of research content.
///
/// Implementations must rate-limit their own HTTP calls, skip individual
/// malformed items rather than failing the batch, and return records
/// already passed through the shared ranking pipeline.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Fetch up to `max_results` records relevant to `query`.
    async fn scrape(&self, query: &str, max_results: usize) -> Result<Vec<ContentRecord>>;

    /// Which source this adapter fronts.
    fn source(&self) -> Source;
}

/// Parse a relative age like `"3 days ago"` or `"2 hours ago"` into an
/// absolute timestamp against `now`.
///
/// Search engines prefix snippets with these instead of exposing real
/// publication dates. Returns `None` for anything that does not look like
/// a relative age.
pub fn parse_relative_age(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let mut words = text.split_whitespace();
    let count: i64 = words.next()?.parse().ok()?;
    let unit = words.next()?;
    if words.next()? != "ago" || words.next().is_some() {
        return None;
    }
    let delta = match unit.trim_end_matches('s') {
        "minute" | "min" => Duration::minutes(count),
        "hour" => Duration::hours(count),
        "day" => Duration::days(count),
        "week" => Duration::weeks(count),
        "month" => Duration::days(count * 30),
        _ => return None,
    };
    Some(now - delta)
}

/// Split a leading relative-age prefix off a snippet, e.g.
/// `"3 days ago · Mango season opens"` becomes the timestamp plus the
/// remaining text. Snippets without the prefix come back unchanged.
pub fn split_age_prefix(snippet: &str, now: DateTime<Utc>) -> (Option<DateTime<Utc>>, String) {
    for sep in [" · ", " - ", " — "] {
        if let Some((prefix, rest)) = snippet.split_once(sep) {
            if let Some(ts) = parse_relative_age(prefix.trim(), now) {
                return (Some(ts), rest.trim().to_string());
            }
        }
    }
    (None, snippet.trim().to_string())
}
