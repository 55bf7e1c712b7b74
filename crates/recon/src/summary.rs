use crate::model::{ReconSummary, Reconciliation};

/// Per-side counters gathered before matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct SideStats {
    pub records: usize,
    pub key_collisions: usize,
    pub numeric_fallbacks: usize,
}

/// Compute summary statistics from a reconciliation.
pub fn compute_summary(rec: &Reconciliation, left: SideStats, right: SideStats) -> ReconSummary {
    let mut summary = ReconSummary {
        left_records: left.records,
        right_records: right.records,
        identical: rec.identical.len(),
        differing: rec.differing.len(),
        unmatched_left: rec.unmatched_left.len(),
        unmatched_right: rec.unmatched_right.len(),
        left_key_collisions: left.key_collisions,
        right_key_collisions: right.key_collisions,
        left_numeric_fallbacks: left.numeric_fallbacks,
        right_numeric_fallbacks: right.numeric_fallbacks,
        ..ReconSummary::default()
    };

    let kinds = rec
        .identical
        .iter()
        .map(|p| p.matched_by)
        .chain(rec.differing.iter().map(|p| p.matched_by));
    for kind in kinds {
        *summary.matched_by.entry(kind).or_insert(0) += 1;
    }

    for pair in &rec.differing {
        for field in pair.diff.iter() {
            *summary.field_diffs.entry(field).or_insert(0) += 1;
        }
    }

    summary
}
