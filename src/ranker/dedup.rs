//! Content deduplication by normalised title, then by normalised URL.
//!
//! The same story often arrives from several sources with identical
//! headlines but different URLs, so titles are the primary dedup key.
//! A second pass catches the same page reached through different URL
//! spellings. In both passes the highest-scored copy survives.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::types::ContentRecord;

use super::url_normalize::normalize_url;

/// Canonical form of a title for duplicate detection: lowercased,
/// punctuation stripped, whitespace collapsed.
pub fn normalize_title(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop records whose normalised title matches an earlier record,
/// keeping the best copy (see [`outranks`]).
///
/// The output order is **not** guaranteed; callers sort afterwards.
pub fn dedup_by_title(records: Vec<ContentRecord>) -> Vec<ContentRecord> {
    keep_best(records, |r| normalize_title(&r.title))
}

/// Drop records whose normalised URL matches an earlier record,
/// keeping the best copy.
pub fn dedup_by_url(records: Vec<ContentRecord>) -> Vec<ContentRecord> {
    keep_best(records, |r| normalize_url(&r.url))
}

fn keep_best<F>(records: Vec<ContentRecord>, key: F) -> Vec<ContentRecord>
where
    F: Fn(&ContentRecord) -> String,
{
    let mut best: HashMap<String, ContentRecord> = HashMap::new();
    for record in records {
        let k = key(&record);
        match best.get_mut(&k) {
            Some(existing) => {
                if outranks(&record, existing) {
                    *existing = record;
                }
            }
            None => {
                best.insert(k, record);
            }
        }
    }
    best.into_values().collect()
}

/// Whether `candidate` should replace `incumbent` among duplicates:
/// higher relevance score first, then more recent `published_at`, then
/// source name, then URL. The same chain the final sort uses, so the
/// surviving copy does not depend on adapter completion order.
fn outranks(candidate: &ContentRecord, incumbent: &ContentRecord) -> bool {
    candidate
        .relevance_score
        .partial_cmp(&incumbent.relevance_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| candidate.published_at.cmp(&incumbent.published_at))
        .then_with(|| incumbent.source.cmp(&candidate.source))
        .then_with(|| incumbent.url.cmp(&candidate.url))
        == Ordering::Greater
}
