//! Research configuration with sensible defaults.
//!
//! [`ResearchConfig`] controls which sources are queried, concurrency,
//! timeouts, caching, and digest shaping. The defaults are tuned for
//! reliable, polite aggregation.

use crate::error::ResearchError;
use crate::types::Source;

/// Configuration for a research operation.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    /// Which sources to query. Primary-tier sources run first; fallback
    /// sources run only when primary results come back thin.
    pub sources: Vec<Source>,
    /// Maximum number of records in the final digest.
    pub max_results: usize,
    /// How many source fetches may run at once.
    pub worker_pool_size: usize,
    /// Per-source HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Overall deadline for one research operation in seconds. Sources that
    /// have not completed by then are discarded, not retried.
    pub deadline_seconds: u64,
    /// Fewer primary-tier records than this triggers the fallback tier.
    pub min_primary_results: usize,
    /// How many top titles to surface as key headlines.
    pub key_headline_count: usize,
    /// Item count at which coverage saturates.
    pub target_item_count: usize,
    /// Distinct source count at which coverage saturates.
    pub target_source_count: usize,
    /// How long to cache digests in seconds. Set to 0 to disable caching.
    pub cache_ttl_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            sources: Source::all().to_vec(),
            max_results: 10,
            worker_pool_size: 4,
            timeout_seconds: 8,
            deadline_seconds: 45,
            min_primary_results: 3,
            key_headline_count: 5,
            target_item_count: 10,
            target_source_count: 4,
            cache_ttl_seconds: 7200,
            user_agent: None,
        }
    }
}

impl ResearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results`, `worker_pool_size`, `key_headline_count`,
    ///   `target_item_count` and `target_source_count` must be greater than 0
    /// - `timeout_seconds` and `deadline_seconds` must be greater than 0
    /// - `sources` must not be empty
    pub fn validate(&self) -> Result<(), ResearchError> {
        if self.max_results == 0 {
            return Err(ResearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.worker_pool_size == 0 {
            return Err(ResearchError::Config(
                "worker_pool_size must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ResearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.deadline_seconds == 0 {
            return Err(ResearchError::Config(
                "deadline_seconds must be greater than 0".into(),
            ));
        }
        if self.sources.is_empty() {
            return Err(ResearchError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        if self.key_headline_count == 0 {
            return Err(ResearchError::Config(
                "key_headline_count must be greater than 0".into(),
            ));
        }
        if self.target_item_count == 0 || self.target_source_count == 0 {
            return Err(ResearchError::Config(
                "coverage targets must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = ResearchConfig::default();
        assert_eq!(config.max_results, 10);
        assert_eq!(config.worker_pool_size, 4);
        assert_eq!(config.timeout_seconds, 8);
        assert_eq!(config.deadline_seconds, 45);
        assert_eq!(config.min_primary_results, 3);
        assert_eq!(config.key_headline_count, 5);
        assert_eq!(config.cache_ttl_seconds, 7200);
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn default_sources_include_all_seven() {
        let config = ResearchConfig::default();
        assert_eq!(config.sources.len(), 7);
        assert!(config.sources.contains(&Source::DuckDuckGo));
        assert!(config.sources.contains(&Source::Wikipedia));
        assert!(config.sources.contains(&Source::Curated));
    }

    #[test]
    fn valid_config_passes_validation() {
        let config = ResearchConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = ResearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn zero_worker_pool_rejected() {
        let config = ResearchConfig {
            worker_pool_size: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("worker_pool_size"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ResearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_deadline_rejected() {
        let config = ResearchConfig {
            deadline_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("deadline_seconds"));
    }

    #[test]
    fn empty_sources_rejected() {
        let config = ResearchConfig {
            sources: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("source"));
    }

    #[test]
    fn zero_coverage_targets_rejected() {
        let config = ResearchConfig {
            target_source_count: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("coverage"));
    }

    #[test]
    fn custom_user_agent() {
        let config = ResearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert_eq!(config.user_agent.as_deref(), Some("CustomBot/1.0"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn single_source_valid() {
        let config = ResearchConfig {
            sources: vec![Source::Wikipedia],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
