use crate::error::ReconError;
use crate::index::MatchIndex;
use crate::matcher::reconcile_with_index;
use crate::model::{RawRow, ReconMeta, ReconResult, Side};
use crate::normalize::normalize_rows;
use crate::summary::{compute_summary, SideStats};

/// Names attached to a run. Labels only affect reporting.
#[derive(Debug, Clone)]
pub struct RunLabels {
    pub name: String,
    pub left: String,
    pub right: String,
}

impl Default for RunLabels {
    fn default() -> Self {
        Self {
            name: "comparison".into(),
            left: "Left".into(),
            right: "Right".into(),
        }
    }
}

/// Normalize both sides, reconcile, and summarize.
///
/// Fails only when a row cannot be interpreted; no partial result is
/// produced in that case.
pub fn run(labels: &RunLabels, left_rows: &[RawRow], right_rows: &[RawRow]) -> Result<ReconResult, ReconError> {
    let left = normalize_rows(Side::Left, left_rows)?;
    let right = normalize_rows(Side::Right, right_rows)?;

    let left_index = MatchIndex::build(&left.records);
    let right_index = MatchIndex::build(&right.records);
    log::debug!(
        "indexed {} left key(s), {} right key(s)",
        left_index.key_count(),
        right_index.key_count()
    );

    let left_stats = SideStats {
        records: left.records.len(),
        key_collisions: left_index.collisions(),
        numeric_fallbacks: left.numeric_fallbacks,
    };
    let right_stats = SideStats {
        records: right.records.len(),
        key_collisions: right_index.collisions(),
        numeric_fallbacks: right.numeric_fallbacks,
    };
    for (label, stats) in [(&labels.left, left_stats), (&labels.right, right_stats)] {
        if stats.key_collisions > 0 {
            log::warn!(
                "{label}: {} derived key(s) shared by several records; the first record wins",
                stats.key_collisions
            );
        }
    }

    let reconciliation = reconcile_with_index(&left.records, &right.records, &right_index);
    let summary = compute_summary(&reconciliation, left_stats, right_stats);

    log::info!(
        "{}: {} identical, {} differing, {} unmatched {}, {} unmatched {}",
        labels.name,
        summary.identical,
        summary.differing,
        summary.unmatched_left,
        labels.left,
        summary.unmatched_right,
        labels.right,
    );

    Ok(ReconResult {
        meta: ReconMeta {
            name: labels.name.clone(),
            left_label: labels.left.clone(),
            right_label: labels.right.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        reconciliation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    fn person(id: i64, email: &str, first: &str, last: &str, age: i64, salary: i64, city: &str) -> RawRow {
        RawRow::new()
            .with("id", id)
            .with("email", email)
            .with("first_name", first)
            .with("last_name", last)
            .with("age", age)
            .with("salary", salary)
            .with("city", city)
    }

    #[test]
    fn end_to_end_single_difference() {
        let left = vec![person(1, "a@x.com", "Jo", "Doe", 30, 1000, "NY")];
        let right = vec![person(1, "a@x.com", "Jo", "Doe", 31, 1000, "NY")];
        let result = run(&RunLabels::default(), &left, &right).unwrap();

        let rec = &result.reconciliation;
        assert_eq!(rec.differing.len(), 1);
        assert_eq!(rec.differing[0].diff.iter().collect::<Vec<_>>(), vec![Field::Age]);
        assert!(rec.identical.is_empty());
        assert_eq!(result.summary.differing, 1);
        assert_eq!(result.meta.left_label, "Left");
    }

    #[test]
    fn end_to_end_unmatched_left() {
        let left = vec![person(9, "z@z.com", "Zed", "Zulu", 50, 10, "Oslo")];
        let result = run(&RunLabels::default(), &left, &[]).unwrap();
        let rec = &result.reconciliation;
        assert_eq!(rec.unmatched_left.len(), 1);
        assert!(rec.identical.is_empty());
        assert!(rec.differing.is_empty());
        assert!(rec.unmatched_right.is_empty());
    }

    #[test]
    fn invalid_row_aborts_run() {
        let left = vec![person(1, "a@x.com", "Jo", "Doe", 30, 1000, "NY")];
        let right = vec![RawRow::new().with("City", "NY").with("CITY", "LA")];
        let err = run(&RunLabels::default(), &left, &right).unwrap_err();
        assert!(matches!(err, ReconError::InvalidInput { side: Side::Right, row: 0, .. }));
    }

    #[test]
    fn summary_reports_collisions() {
        let right = vec![
            person(1, "a@x.com", "Jo", "Doe", 30, 1000, "NY"),
            person(2, "b@x.com", "Jo", "Doe", 30, 1000, "NY"),
        ];
        let result = run(&RunLabels::default(), &[], &right).unwrap();
        assert_eq!(result.summary.right_key_collisions, 1);
        assert_eq!(result.summary.left_key_collisions, 0);
        assert_eq!(result.summary.unmatched_right, 2);
    }
}
