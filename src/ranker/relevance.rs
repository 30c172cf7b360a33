//! Relevance scoring: query-term overlap with a recency bonus.
//!
//! Score formula:
//!
//! ```text
//! score = 0.75 * term_overlap + 0.25 * recency_bonus
//! term_overlap = matched_weight / (2 * term_count)
//! ```
//!
//! where a term found in the title contributes weight 2.0 and a term found
//! only in the summary contributes 1.0. Records matching no query term at
//! all score 0.0 and are dropped by the pipeline.

use crate::types::ContentRecord;
use chrono::{DateTime, Duration, Utc};

/// Filler words ignored when extracting query terms.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "this", "that", "what", "when", "where", "which", "who",
    "how", "are", "was", "has", "have", "will", "about", "into", "over", "latest", "news",
    "today", "recent", "update", "updates",
];

/// Extract the meaningful terms from a research topic.
///
/// Lowercases, splits on non-alphanumeric characters, drops stop words and
/// words of two characters or fewer, and deduplicates while preserving
/// first-seen order.
pub fn query_terms(topic: &str) -> Vec<String> {
    let lowered = topic.to_lowercase();
    let mut terms: Vec<String> = Vec::new();
    for word in lowered.split(|c: char| !c.is_alphanumeric()) {
        if word.len() <= 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        if !terms.iter().any(|t| t == word) {
            terms.push(word.to_string());
        }
    }
    terms
}

/// Score one record against the extracted query terms.
///
/// Returns 0.0 when the record matches none of the terms. An empty term
/// list (a topic made entirely of stop words) scores every record with a
/// neutral overlap of 0.5 so nothing is dropped.
pub fn relevance_score(record: &ContentRecord, terms: &[String], now: DateTime<Utc>) -> f64 {
    let term_overlap = if terms.is_empty() {
        0.5
    } else {
        let title = record.title.to_lowercase();
        let summary = record
            .summary
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        let mut matched = 0.0;
        for term in terms {
            if title.contains(term.as_str()) {
                matched += 2.0;
            } else if summary.contains(term.as_str()) {
                matched += 1.0;
            }
        }
        if matched == 0.0 {
            return 0.0;
        }
        matched / (2.0 * terms.len() as f64)
    };

    0.75 * term_overlap + 0.25 * recency_bonus(record.published_at, now)
}

/// Step-decay freshness bonus. Undated records get a small neutral bonus
/// rather than zero, since many sources simply omit dates.
pub fn recency_bonus(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(ts) = published_at else {
        return 0.25;
    };
    let age = now - ts;
    if age < Duration::hours(24) {
        1.0
    } else if age < Duration::hours(72) {
        0.6
    } else if age < Duration::days(7) {
        0.3
    } else {
        0.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentType;

    fn record(title: &str, summary: Option<&str>, published_at: Option<DateTime<Utc>>) -> ContentRecord {
        ContentRecord {
            title: title.into(),
            url: "https://example.com/a".into(),
            source: "Wikipedia".into(),
            published_at,
            summary: summary.map(String::from),
            content_type: ContentType::Article,
            relevance_score: 0.0,
            synthetic: false,
        }
    }

    #[test]
    fn extracts_lowercase_terms() {
        assert_eq!(query_terms("Mango Exports India"), ["mango", "exports", "india"]);
    }

    #[test]
    fn drops_stop_words_and_short_words() {
        assert_eq!(
            query_terms("the latest news about AI in India"),
            ["india"]
        );
    }

    #[test]
    fn terms_deduplicated_in_order() {
        assert_eq!(query_terms("mango mango farming"), ["mango", "farming"]);
    }

    #[test]
    fn splits_on_punctuation() {
        assert_eq!(query_terms("electric-cars, brazil!"), ["electric", "cars", "brazil"]);
    }

    #[test]
    fn title_match_outweighs_summary_match() {
        let now = Utc::now();
        let terms = query_terms("mango farming");
        let in_title = record("Mango farming booms", None, None);
        let in_summary = record("Agriculture report", Some("mango farming booms"), None);
        assert!(
            relevance_score(&in_title, &terms, now) > relevance_score(&in_summary, &terms, now)
        );
    }

    #[test]
    fn no_term_match_scores_zero() {
        let now = Utc::now();
        let terms = query_terms("electric cars brazil");
        let rec = record("Mango season opens", Some("harvest begins"), None);
        assert_eq!(relevance_score(&rec, &terms, now), 0.0);
    }

    #[test]
    fn matching_case_insensitive() {
        let now = Utc::now();
        let terms = query_terms("mango");
        let rec = record("MANGO Harvest", None, None);
        assert!(relevance_score(&rec, &terms, now) > 0.0);
    }

    #[test]
    fn fresher_record_scores_higher() {
        let now = Utc::now();
        let terms = query_terms("mango");
        let fresh = record("Mango news", None, Some(now - Duration::hours(2)));
        let stale = record("Mango news", None, Some(now - Duration::days(30)));
        assert!(relevance_score(&fresh, &terms, now) > relevance_score(&stale, &terms, now));
    }

    #[test]
    fn recency_bonus_steps() {
        let now = Utc::now();
        assert_eq!(recency_bonus(Some(now - Duration::hours(1)), now), 1.0);
        assert_eq!(recency_bonus(Some(now - Duration::hours(48)), now), 0.6);
        assert_eq!(recency_bonus(Some(now - Duration::days(5)), now), 0.3);
        assert_eq!(recency_bonus(Some(now - Duration::days(60)), now), 0.1);
        assert_eq!(recency_bonus(None, now), 0.25);
    }

    #[test]
    fn undated_record_still_scores() {
        let now = Utc::now();
        let terms = query_terms("mango");
        let rec = record("Mango news", None, None);
        let score = relevance_score(&rec, &terms, now);
        assert!(score > 0.0 && score <= 1.0);
    }

    #[test]
    fn full_title_match_near_one_when_fresh() {
        let now = Utc::now();
        let terms = query_terms("mango exports");
        let rec = record("Mango exports surge", None, Some(now - Duration::hours(1)));
        let score = relevance_score(&rec, &terms, now);
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_terms_score_neutral() {
        let now = Utc::now();
        let rec = record("Anything at all", None, None);
        let score = relevance_score(&rec, &[], now);
        assert!(score > 0.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let now = Utc::now();
        let terms = query_terms("mango exports india");
        let rec = record("Mango exports from India", Some("trade"), Some(now - Duration::hours(3)));
        let a = relevance_score(&rec, &terms, now);
        let b = relevance_score(&rec, &terms, now);
        assert_eq!(a, b);
    }
}
