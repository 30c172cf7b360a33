//! Research orchestrator: tiered fan-out, deadline handling, digests.
//!
//! This module dispatches a topic to the configured source adapters
//! through a bounded worker pool, escalates from primary to fallback
//! sources when results are thin, merges everything through the shared
//! ranking pipeline, and scores topic coverage.

pub mod coverage;
pub mod engine;

pub use engine::ResearchEngine;
