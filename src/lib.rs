//! # mash-research
//!
//! Zero-configuration, multi-source research aggregation for Mash.
//!
//! This crate gathers topical content from public sources directly — no
//! API keys, no external services, no user setup required. It compiles
//! into the host binary as a library dependency.
//!
//! ## Design
//!
//! - Scrapes DuckDuckGo and Bing, and queries the Wikipedia, Reddit and
//!   Hacker News public APIs
//! - Runs sources through a bounded worker pool against an overall
//!   deadline; whatever finished in time is used
//! - Tiered dispatch: regional RSS feeds and a synthesizing fallback
//!   desk only run when the primary sources come back thin
//! - One shared relevance pipeline: term-overlap scoring with a recency
//!   bonus, title-then-URL dedup, deterministic ordering
//! - Per-source sliding-window rate limits and a failure breaker
//! - In-memory digest cache with configurable TTL
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - No network listeners — this is a library, not a server
//! - Research topics are logged only at trace level
//! - Synthesized fallback records are always flagged as such

pub mod adapter;
pub mod adapters;
pub mod cache;
pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod limiter;
pub mod orchestrator;
pub mod ranker;
pub mod types;

pub use adapter::SourceAdapter;
pub use config::ResearchConfig;
pub use error::{ResearchError, Result};
pub use limiter::RateLimiter;
pub use orchestrator::ResearchEngine;
pub use types::{ContentRecord, ContentType, ResearchDigest, Source, SourceTier};

/// Research a topic across multiple sources with the given configuration.
///
/// Builds a [`ResearchEngine`], fans the topic out to the configured
/// sources, merges and ranks the results, and returns a digest. Callers
/// issuing more than one query should hold on to a [`ResearchEngine`]
/// instead, so rate-limit windows, health tracking and the digest cache
/// carry across calls.
///
/// # Errors
///
/// Returns [`ResearchError::Config`] for an invalid configuration or a
/// blank topic. Source failures never produce an error; a run where
/// everything failed yields an empty digest with zero coverage.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> mash_research::Result<()> {
/// let config = mash_research::ResearchConfig::default();
/// let digest = mash_research::research_topic("mango exports india", &config).await?;
/// for record in &digest.items {
///     println!("{}: {}", record.source, record.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn research_topic(topic: &str, config: &ResearchConfig) -> Result<ResearchDigest> {
    let engine = ResearchEngine::new(config.clone())?;
    engine.research_topic(topic).await
}

/// Research a topic with sensible default configuration.
///
/// Convenience wrapper around [`research_topic`] using
/// [`ResearchConfig::default()`].
///
/// # Errors
///
/// Same as [`research_topic`].
pub async fn research_topic_default(topic: &str) -> Result<ResearchDigest> {
    research_topic(topic, &ResearchConfig::default()).await
}
