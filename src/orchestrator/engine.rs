//! Core research orchestrator: tiered concurrent fan-out, merge, digest.
//!
//! Dispatches the primary-tier adapters through a bounded worker pool
//! against an overall deadline, escalates to the fallback tier when the
//! primary haul is thin, merges everything through the shared ranking
//! pipeline, and assembles the digest. Source failures are recorded in
//! the health breaker and recovered; they never surface to the caller.

use crate::adapter::SourceAdapter;
use crate::cache::{CacheKey, DigestCache};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use crate::health::SourceHealth;
use crate::ranker;
use crate::types::{ContentRecord, ResearchDigest, Source, SourceTier};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::coverage::coverage_score;
use crate::adapters::{
    BingAdapter, CuratedAdapter, DuckDuckGoAdapter, HackerNewsAdapter, IndiaFeedsAdapter,
    RedditAdapter, WikipediaAdapter,
};

/// Multi-source research engine.
///
/// Owns its adapters, digest cache, and source health tracking. Cheap to
/// share behind an [`Arc`]; all methods take `&self`.
pub struct ResearchEngine {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    config: ResearchConfig,
    health: Mutex<SourceHealth>,
    cache: DigestCache,
}

impl ResearchEngine {
    /// Build an engine with one real adapter per configured source.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] for an invalid configuration, or
    /// [`ResearchError::Http`] if an HTTP client cannot be constructed.
    pub fn new(config: ResearchConfig) -> Result<Self> {
        config.validate()?;
        let adapters = config
            .sources
            .iter()
            .map(|source| build_adapter(*source, &config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::assemble(config, adapters))
    }

    /// Build an engine over caller-supplied adapters. This is the seam
    /// integration tests use to research against mock sources.
    pub fn with_adapters(
        config: ResearchConfig,
        adapters: Vec<Arc<dyn SourceAdapter>>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, adapters))
    }

    fn assemble(config: ResearchConfig, adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self {
            cache: DigestCache::new(config.cache_ttl_seconds),
            adapters,
            config,
            health: Mutex::new(SourceHealth::default()),
        }
    }

    /// Research a topic across all configured sources.
    ///
    /// Always produces a digest when the inputs are valid: a run where
    /// every source failed or timed out yields an empty digest with a
    /// coverage score of zero.
    ///
    /// # Errors
    ///
    /// Only [`ResearchError::Config`] for an empty or whitespace topic.
    /// Source failures are recovered, not propagated.
    pub async fn research_topic(&self, topic: &str) -> Result<ResearchDigest> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ResearchError::Config("topic must not be empty".into()));
        }

        let sources: Vec<Source> = self.adapters.iter().map(|a| a.source()).collect();
        let cache_key = CacheKey::new(topic, self.config.max_results, &sources);
        if let Some(hit) = self.cache.get(&cache_key).await {
            tracing::debug!(topic, "digest served from cache");
            return Ok(hit);
        }

        let deadline = Instant::now() + Duration::from_secs(self.config.deadline_seconds);

        let mut pooled = self.run_tier(topic, SourceTier::Primary, deadline).await;
        if pooled.len() < self.config.min_primary_results {
            tracing::debug!(
                count = pooled.len(),
                "primary tier came back thin, escalating to fallback"
            );
            let fallback = self.run_tier(topic, SourceTier::Fallback, deadline).await;
            pooled.extend(fallback);
        }

        let digest = self.assemble_digest(topic, pooled);
        self.cache.insert(cache_key, digest.clone()).await;
        Ok(digest)
    }

    /// Run every healthy adapter of one tier through the worker pool,
    /// racing the overall deadline. Completions after the deadline are
    /// discarded along with unstarted jobs.
    async fn run_tier(
        &self,
        topic: &str,
        tier: SourceTier,
        deadline: Instant,
    ) -> Vec<ContentRecord> {
        let mut jobs = Vec::new();
        {
            let mut health = self.health.lock().await;
            for adapter in &self.adapters {
                let source = adapter.source();
                if source.tier() != tier {
                    continue;
                }
                if health.should_attempt(source) {
                    jobs.push(Arc::clone(adapter));
                } else {
                    tracing::debug!(%source, "source blocked by health breaker");
                }
            }
        }
        if jobs.is_empty() {
            return Vec::new();
        }

        // One adapter may make several HTTP round trips, so its budget is
        // a multiple of the single-request timeout.
        let call_budget = Duration::from_secs(self.config.timeout_seconds.saturating_mul(4));
        let max_results = self.config.max_results;

        let mut outcomes = stream::iter(jobs.into_iter().map(|adapter| {
            let topic = topic.to_string();
            async move {
                let source = adapter.source();
                let outcome = match tokio::time::timeout(
                    call_budget,
                    adapter.scrape(&topic, max_results),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => Err(ResearchError::Timeout(format!(
                        "{source} exceeded {}s budget",
                        call_budget.as_secs()
                    ))),
                };
                (source, outcome)
            }
        }))
        .buffer_unordered(self.config.worker_pool_size);

        let mut records = Vec::new();
        let deadline_sleep = tokio::time::sleep_until(deadline);
        tokio::pin!(deadline_sleep);

        loop {
            tokio::select! {
                outcome = outcomes.next() => match outcome {
                    Some((source, Ok(items))) => {
                        tracing::debug!(%source, count = items.len(), "source returned records");
                        self.health.lock().await.record_success(source);
                        records.extend(items);
                    }
                    Some((source, Err(err))) => {
                        tracing::warn!(%source, error = %err, "source fetch failed");
                        self.health.lock().await.record_failure(source);
                    }
                    None => break,
                },
                _ = &mut deadline_sleep => {
                    tracing::warn!("deadline reached, discarding unfinished sources");
                    break;
                }
            }
        }
        records
    }

    /// Merge pooled records into the final digest.
    fn assemble_digest(&self, topic: &str, pooled: Vec<ContentRecord>) -> ResearchDigest {
        let now = Utc::now();
        let terms = ranker::query_terms(topic);
        let items = ranker::rank(pooled, &terms, self.config.max_results, now);

        let key_headlines: Vec<String> = items
            .iter()
            .take(self.config.key_headline_count)
            .map(|r| r.title.clone())
            .collect();
        let sources: Vec<String> = items
            .iter()
            .map(|r| r.source.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let coverage = coverage_score(
            items.len(),
            sources.len(),
            self.config.target_item_count,
            self.config.target_source_count,
        );

        tracing::debug!(
            topic,
            items = items.len(),
            sources = sources.len(),
            coverage,
            "digest assembled"
        );

        ResearchDigest {
            query: topic.to_string(),
            items,
            sources,
            key_headlines,
            coverage_score: coverage,
            generated_at: now,
        }
    }
}

/// Wire the real adapter for one source.
fn build_adapter(source: Source, config: &ResearchConfig) -> Result<Arc<dyn SourceAdapter>> {
    Ok(match source {
        Source::DuckDuckGo => Arc::new(DuckDuckGoAdapter::new(config)?),
        Source::Bing => Arc::new(BingAdapter::new(config)?),
        Source::Wikipedia => Arc::new(WikipediaAdapter::new(config)?),
        Source::Reddit => Arc::new(RedditAdapter::new(config)?),
        Source::HackerNews => Arc::new(HackerNewsAdapter::new(config)?),
        Source::IndiaFeeds => Arc::new(IndiaFeedsAdapter::new(config)?),
        Source::Curated => Arc::new(CuratedAdapter::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let config = ResearchConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(ResearchEngine::new(config).is_err());
    }

    #[test]
    fn new_builds_all_configured_adapters() {
        let engine = ResearchEngine::new(ResearchConfig::default()).expect("engine");
        assert_eq!(engine.adapters.len(), 7);
    }

    #[test]
    fn build_adapter_covers_every_source() {
        let config = ResearchConfig::default();
        for source in Source::all() {
            let adapter = build_adapter(*source, &config).expect("adapter");
            assert_eq!(adapter.source(), *source);
        }
    }

    #[tokio::test]
    async fn empty_topic_is_config_error() {
        let engine = ResearchEngine::new(ResearchConfig::default()).expect("engine");
        let err = engine.research_topic("   ").await.unwrap_err();
        assert!(matches!(err, ResearchError::Config(_)));
    }

    #[test]
    fn engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResearchEngine>();
    }
}
