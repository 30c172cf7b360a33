//! Per-source failure breaker for adaptive source selection.
//!
//! Tracks success/failure counts per content source and temporarily
//! blocks sources that fail repeatedly. After a cooldown period, a
//! tripped source enters a half-open state where a single probe request
//! determines whether to restore or re-trip the circuit. A blocked
//! primary source returning nothing is what usually pushes an operation
//! into the fallback tier.

use crate::types::Source;
use std::collections::HashMap;
use std::time::Instant;

/// Circuit state for a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Source is healthy — all requests are allowed through.
    Closed,
    /// Source has failed too many times — requests are blocked until cooldown expires.
    Open,
    /// Cooldown has elapsed — one probe request is allowed to test recovery.
    HalfOpen,
}

/// Health tracking data for a single source.
#[derive(Debug, Clone)]
struct SourceState {
    state: CircuitState,
    consecutive_failures: u32,
    last_failure_at: Option<Instant>,
}

impl Default for SourceState {
    fn default() -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            last_failure_at: None,
        }
    }
}

/// Configuration for breaker behaviour.
#[derive(Debug, Clone)]
pub struct HealthConfig {
    /// Number of consecutive failures before tripping the circuit to Open.
    pub failure_threshold: u32,
    /// Seconds to wait in Open state before transitioning to HalfOpen.
    pub cooldown_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            cooldown_secs: 60,
        }
    }
}

/// Per-source breaker owned by one research engine.
///
/// Each source has independent health tracking. When a source
/// accumulates enough consecutive failures, it is temporarily skipped
/// (Open state). After a cooldown period, one probe request is allowed
/// (HalfOpen). Success restores the source; failure re-trips the circuit.
#[derive(Debug)]
pub struct SourceHealth {
    config: HealthConfig,
    sources: HashMap<Source, SourceState>,
}

impl SourceHealth {
    pub fn new(config: HealthConfig) -> Self {
        Self {
            config,
            sources: HashMap::new(),
        }
    }

    /// Record a successful fetch for the given source.
    ///
    /// Resets the consecutive failure count and transitions the source
    /// to [`CircuitState::Closed`] regardless of previous state.
    pub fn record_success(&mut self, source: Source) {
        let state = self.sources.entry(source).or_default();
        state.state = CircuitState::Closed;
        state.consecutive_failures = 0;
    }

    /// Record a failed fetch for the given source.
    ///
    /// Increments the consecutive failure count. If the count reaches
    /// the configured threshold, transitions to [`CircuitState::Open`].
    pub fn record_failure(&mut self, source: Source) {
        let state = self.sources.entry(source).or_default();
        state.consecutive_failures += 1;
        state.last_failure_at = Some(Instant::now());

        if state.consecutive_failures >= self.config.failure_threshold {
            state.state = CircuitState::Open;
        }
    }

    /// Check whether a fetch from the given source should be attempted.
    ///
    /// - [`CircuitState::Closed`]: always returns `true`
    /// - [`CircuitState::Open`]: returns `true` only if the cooldown has
    ///   elapsed (transitions to [`CircuitState::HalfOpen`])
    /// - [`CircuitState::HalfOpen`]: returns `true` (one probe allowed)
    pub fn should_attempt(&mut self, source: Source) -> bool {
        let state = self.sources.entry(source).or_default();

        match state.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let cooldown_elapsed = state
                    .last_failure_at
                    .is_none_or(|t| t.elapsed().as_secs() >= self.config.cooldown_secs);

                if cooldown_elapsed {
                    state.state = CircuitState::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Current circuit state for a specific source.
    pub fn status(&self, source: Source) -> CircuitState {
        self.sources
            .get(&source)
            .map_or(CircuitState::Closed, |s| s.state)
    }
}

impl Default for SourceHealth {
    fn default() -> Self {
        Self::new(HealthConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_health(threshold: u32, cooldown_secs: u64) -> SourceHealth {
        SourceHealth::new(HealthConfig {
            failure_threshold: threshold,
            cooldown_secs,
        })
    }

    #[test]
    fn initial_state_is_closed() {
        let health = make_health(3, 60);
        assert_eq!(health.status(Source::DuckDuckGo), CircuitState::Closed);
        assert_eq!(health.status(Source::Wikipedia), CircuitState::Closed);
    }

    #[test]
    fn stays_closed_below_threshold() {
        let mut health = make_health(3, 60);
        health.record_failure(Source::Reddit);
        health.record_failure(Source::Reddit);
        assert_eq!(health.status(Source::Reddit), CircuitState::Closed);
    }

    #[test]
    fn trips_to_open_at_threshold() {
        let mut health = make_health(3, 60);
        for _ in 0..3 {
            health.record_failure(Source::Bing);
        }
        assert_eq!(health.status(Source::Bing), CircuitState::Open);
    }

    #[test]
    fn open_blocks_attempts() {
        let mut health = make_health(3, 600); // Long cooldown
        for _ in 0..3 {
            health.record_failure(Source::Bing);
        }
        assert!(!health.should_attempt(Source::Bing));
    }

    #[test]
    fn open_transitions_to_half_open_after_cooldown() {
        let mut health = make_health(3, 0); // Zero cooldown = immediate
        for _ in 0..3 {
            health.record_failure(Source::Wikipedia);
        }
        assert_eq!(health.status(Source::Wikipedia), CircuitState::Open);

        assert!(health.should_attempt(Source::Wikipedia));
        assert_eq!(health.status(Source::Wikipedia), CircuitState::HalfOpen);
    }

    #[test]
    fn half_open_success_restores_closed() {
        let mut health = make_health(3, 0);
        for _ in 0..3 {
            health.record_failure(Source::Wikipedia);
        }
        let _ = health.should_attempt(Source::Wikipedia); // → HalfOpen
        health.record_success(Source::Wikipedia);
        assert_eq!(health.status(Source::Wikipedia), CircuitState::Closed);
    }

    #[test]
    fn half_open_failure_retrips() {
        let mut health = make_health(1, 0); // threshold=1 for simplicity
        health.record_failure(Source::Reddit); // → Open
        let _ = health.should_attempt(Source::Reddit); // → HalfOpen
        health.record_failure(Source::Reddit); // → Open again
        assert_eq!(health.status(Source::Reddit), CircuitState::Open);
    }

    #[test]
    fn success_resets_consecutive_failures() {
        let mut health = make_health(3, 60);
        health.record_failure(Source::DuckDuckGo);
        health.record_failure(Source::DuckDuckGo);
        health.record_success(Source::DuckDuckGo);
        // Two more failures stay below threshold after the reset.
        health.record_failure(Source::DuckDuckGo);
        health.record_failure(Source::DuckDuckGo);
        assert_eq!(health.status(Source::DuckDuckGo), CircuitState::Closed);
    }

    #[test]
    fn sources_are_independent() {
        let mut health = make_health(2, 60);
        health.record_failure(Source::Bing);
        health.record_failure(Source::Bing);
        assert_eq!(health.status(Source::Bing), CircuitState::Open);
        assert_eq!(health.status(Source::DuckDuckGo), CircuitState::Closed);
        assert!(health.should_attempt(Source::DuckDuckGo));
    }

    #[test]
    fn alternating_success_failure_never_trips() {
        let mut health = make_health(3, 60);
        for _ in 0..10 {
            health.record_failure(Source::Wikipedia);
            health.record_success(Source::Wikipedia);
        }
        assert_eq!(health.status(Source::Wikipedia), CircuitState::Closed);
    }

    #[test]
    fn default_config_values() {
        let config = HealthConfig::default();
        assert_eq!(config.failure_threshold, 3);
        assert_eq!(config.cooldown_secs, 60);
    }
}
