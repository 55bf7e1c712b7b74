use crate::index::MatchIndex;
use crate::model::{CanonicalRecord, DifferingPair, MatchedPair, Reconciliation};

/// Partition two sides into identical, differing and unmatched records.
///
/// Left records are visited in order; each takes its best right candidate
/// unless an earlier left record already consumed it, in which case the left
/// record is unmatched. Right records never consumed are unmatched, in order.
pub fn reconcile(left: &[CanonicalRecord], right: &[CanonicalRecord]) -> Reconciliation {
    let right_index = MatchIndex::build(right);
    reconcile_with_index(left, right, &right_index)
}

/// As [`reconcile`], against a prebuilt index over `right`.
pub fn reconcile_with_index(
    left: &[CanonicalRecord],
    right: &[CanonicalRecord],
    right_index: &MatchIndex,
) -> Reconciliation {
    let mut right_used = vec![false; right.len()];
    let mut out = Reconciliation::default();

    for left_rec in left {
        let candidate = right_index
            .best_match(left_rec)
            .filter(|(ri, _)| !right_used[*ri]);

        let Some((ri, matched_by)) = candidate else {
            out.unmatched_left.push(left_rec.clone());
            continue;
        };

        right_used[ri] = true;
        let right_rec = &right[ri];
        let diff = left_rec.diff(right_rec);

        if diff.is_empty() {
            out.identical.push(MatchedPair {
                left: left_rec.clone(),
                right: right_rec.clone(),
                matched_by,
            });
        } else {
            out.differing.push(DifferingPair {
                left: left_rec.clone(),
                right: right_rec.clone(),
                matched_by,
                diff,
            });
        }
    }

    out.unmatched_right = right
        .iter()
        .zip(&right_used)
        .filter(|(_, used)| !**used)
        .map(|(r, _)| r.clone())
        .collect();

    out
}
