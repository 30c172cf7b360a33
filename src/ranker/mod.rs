//! Shared ranking pipeline: score, filter, deduplicate, order, truncate.
//!
//! Every adapter runs its raw records through [`rank`] before returning
//! them, and the orchestrator runs the merged pool through the same
//! function, so single-source and cross-source results obey identical
//! rules. The pipeline is deterministic for a fixed clock and idempotent.

pub mod dedup;
pub mod relevance;
pub mod url_normalize;

use crate::types::ContentRecord;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

pub use relevance::query_terms;

/// Rank a batch of records against the query terms.
///
/// Stages, in order:
///
/// 1. Score every record ([`relevance::relevance_score`]); drop records
///    matching no query term.
/// 2. Deduplicate by normalised title, keeping the higher-scored copy.
/// 3. Deduplicate by normalised URL, same rule.
/// 4. Sort by score descending, then more recent `published_at` first
///    (undated records last), then source name, then URL.
/// 5. Truncate to `max_results`.
pub fn rank(
    records: Vec<ContentRecord>,
    terms: &[String],
    max_results: usize,
    now: DateTime<Utc>,
) -> Vec<ContentRecord> {
    let scored: Vec<ContentRecord> = records
        .into_iter()
        .filter_map(|mut record| {
            let score = relevance::relevance_score(&record, terms, now);
            if score <= 0.0 {
                return None;
            }
            record.relevance_score = score;
            Some(record)
        })
        .collect();

    let mut deduped = dedup::dedup_by_url(dedup::dedup_by_title(scored));

    deduped.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
            // Option<DateTime> orders None lowest, so this puts the most
            // recent first and undated records last.
            .then_with(|| b.published_at.cmp(&a.published_at))
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.url.cmp(&b.url))
    });
    deduped.truncate(max_results);
    deduped
}
