//! Core types for aggregated research content and source identification.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Broad category of a piece of content, by where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// News article or blog post.
    Article,
    /// Discussion thread or link-aggregator submission.
    ForumPost,
    /// Encyclopedia entry.
    EncyclopediaEntry,
}

/// A single piece of content gathered from a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Headline or page title.
    pub title: String,
    /// Canonical URL of the content.
    pub url: String,
    /// Human-readable source label, e.g. `"Wikipedia"` or `"r/worldnews"`.
    pub source: String,
    /// Publication time, when the source exposes one.
    #[serde(rename = "published_date")]
    pub published_at: Option<DateTime<Utc>>,
    /// Short text snippet or summary, when available.
    pub summary: Option<String>,
    /// What kind of content this is.
    pub content_type: ContentType,
    /// Relevance to the research query (higher is better). Assigned by the
    /// ranking pipeline; 0.0 until ranked.
    pub relevance_score: f64,
    /// True when this record was synthesized by a fallback desk rather than
    /// scraped from a real publication. Consumers must be able to tell the
    /// difference.
    pub synthetic: bool,
}

/// Content sources the research engine can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// DuckDuckGo HTML search — most scraper-friendly general engine.
    DuckDuckGo,
    /// Bing HTML search — different index, decent snippets with dates.
    Bing,
    /// Wikipedia search API — background and encyclopedia entries.
    Wikipedia,
    /// Reddit public search listing — discussion threads.
    Reddit,
    /// Hacker News Firebase API — tech-leaning discussion.
    HackerNews,
    /// Indian news outlet RSS feeds — regional coverage fallback.
    IndiaFeeds,
    /// Curated placeholder desk — synthesized last-resort records.
    Curated,
}

/// Dispatch tier of a source. Primary sources run first; fallback sources
/// only run when the primary tier comes back thin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTier {
    Primary,
    Fallback,
}

impl Source {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
            Self::Wikipedia => "Wikipedia",
            Self::Reddit => "Reddit",
            Self::HackerNews => "Hacker News",
            Self::IndiaFeeds => "India Feeds",
            Self::Curated => "Curated",
        }
    }

    /// Which dispatch tier this source belongs to.
    pub fn tier(&self) -> SourceTier {
        match self {
            Self::DuckDuckGo | Self::Bing | Self::Wikipedia | Self::Reddit | Self::HackerNews => {
                SourceTier::Primary
            }
            Self::IndiaFeeds | Self::Curated => SourceTier::Fallback,
        }
    }

    /// Polite request budget for this source, per minute. Search engines
    /// get the tightest budgets; the Firebase API behind Hacker News is
    /// fetched one item per request, so it needs a far larger allowance.
    /// The synthesized desk does no I/O.
    pub fn requests_per_minute(&self) -> u32 {
        match self {
            Self::DuckDuckGo => 20,
            Self::Bing => 15,
            Self::Wikipedia => 30,
            Self::Reddit => 15,
            Self::HackerNews => 120,
            Self::IndiaFeeds => 25,
            Self::Curated => 60,
        }
    }

    /// Returns all available source variants.
    pub fn all() -> &'static [Source] {
        &[
            Self::DuckDuckGo,
            Self::Bing,
            Self::Wikipedia,
            Self::Reddit,
            Self::HackerNews,
            Self::IndiaFeeds,
            Self::Curated,
        ]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The aggregated outcome of researching one topic.
///
/// Always well-formed: a run where every source failed produces a digest
/// with no items and a coverage score of zero, never an error.
#[derive(Debug, Clone, Deserialize)]
pub struct ResearchDigest {
    /// The topic that was researched.
    pub query: String,
    /// Ranked, deduplicated content records, at most `max_results` of them.
    pub items: Vec<ContentRecord>,
    /// Distinct source labels that contributed to `items`, sorted.
    pub sources: Vec<String>,
    /// Titles of the top-ranked items.
    pub key_headlines: Vec<String>,
    /// How well covered the topic is, in `[0.0, 1.0]`. Zero when empty.
    pub coverage_score: f64,
    /// When this digest was assembled.
    #[serde(rename = "research_timestamp")]
    pub generated_at: DateTime<Utc>,
}

impl ResearchDigest {
    /// Number of records in the digest.
    pub fn total_items(&self) -> usize {
        self.items.len()
    }
}

// The downstream page renderer consumes a fixed set of keys, including a
// redundant `total_items` count. Serialized by hand to keep that contract
// without storing the count.
impl Serialize for ResearchDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ResearchDigest", 7)?;
        s.serialize_field("query", &self.query)?;
        s.serialize_field("total_items", &self.total_items())?;
        s.serialize_field("key_headlines", &self.key_headlines)?;
        s.serialize_field("sources", &self.sources)?;
        s.serialize_field("items", &self.items)?;
        s.serialize_field("coverage_score", &self.coverage_score)?;
        s.serialize_field("research_timestamp", &self.generated_at)?;
        s.end()
    }
}
