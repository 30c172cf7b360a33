//! Coverage heuristic for finished digests.
//!
//! A cheap confidence signal for downstream renderers: how much material
//! came back, and from how many distinct places. Not a statistical claim.

/// Score coverage in `[0.0, 1.0]`.
///
/// Item count and distinct source count each contribute half, saturating
/// at their configured targets. An empty digest is always exactly 0.0,
/// and for a fixed non-zero item count the score never decreases as
/// distinct sources are added.
pub fn coverage_score(
    item_count: usize,
    source_count: usize,
    target_items: usize,
    target_sources: usize,
) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    let item_part = (item_count as f64 / target_items.max(1) as f64).min(1.0);
    let source_part = (source_count as f64 / target_sources.max(1) as f64).min(1.0);
    0.5 * item_part + 0.5 * source_part
}
