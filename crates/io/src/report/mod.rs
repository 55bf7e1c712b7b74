//! Report sinks for a finished reconciliation.
//!
//! All tabular sinks share [`layout`], so the XLSX sheet and the CSV file
//! carry the same rows in the same order:
//!
//! | Block                 | Rows                                            |
//! |-----------------------|-------------------------------------------------|
//! | header                | `Database`, then one column per field           |
//! | differing pairs       | left row, then right row with differing cells   |
//! | unmatched left        | section title, then one row per record          |
//! | unmatched right       | section title, then one row per record          |
//! | identical pairs       | section title, then left row and right row      |
//!
//! Empty blocks are left out entirely.

pub mod csv;
pub mod json;
pub mod style;
pub mod xlsx;

use dbcompare_recon::model::{CanonicalRecord, DiffMask, Field};
use dbcompare_recon::ReconResult;

pub use style::ReportStyle;

pub const LABEL_HEADER: &str = "Database";

#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow<'a> {
    Header,
    Section(String),
    Record {
        label: &'a str,
        record: &'a CanonicalRecord,
        highlight: DiffMask,
    },
}

impl ReportRow<'_> {
    /// Cell texts for this row, one per column.
    pub fn cells(&self) -> Vec<String> {
        match self {
            ReportRow::Header => std::iter::once(LABEL_HEADER.to_string())
                .chain(Field::ALL.iter().map(|f| f.as_str().to_string()))
                .collect(),
            ReportRow::Section(title) => vec![title.clone()],
            ReportRow::Record { label, record, .. } => std::iter::once(label.to_string())
                .chain(Field::ALL.iter().map(|f| record.display_value(*f).to_string()))
                .collect(),
        }
    }
}

pub fn layout(result: &ReconResult) -> Vec<ReportRow<'_>> {
    let left = result.meta.left_label.as_str();
    let right = result.meta.right_label.as_str();
    let rec = &result.reconciliation;

    let mut rows = vec![ReportRow::Header];

    for pair in &rec.differing {
        rows.push(plain(left, &pair.left));
        rows.push(ReportRow::Record { label: right, record: &pair.right, highlight: pair.diff });
    }

    if !rec.unmatched_left.is_empty() {
        rows.push(ReportRow::Section(format!("Unmatched {left} Records")));
        rows.extend(rec.unmatched_left.iter().map(|r| plain(left, r)));
    }
    if !rec.unmatched_right.is_empty() {
        rows.push(ReportRow::Section(format!("Unmatched {right} Records")));
        rows.extend(rec.unmatched_right.iter().map(|r| plain(right, r)));
    }
    if !rec.identical.is_empty() {
        rows.push(ReportRow::Section("Identical Records".to_string()));
        for pair in &rec.identical {
            rows.push(plain(left, &pair.left));
            rows.push(plain(right, &pair.right));
        }
    }

    rows
}

fn plain<'a>(label: &'a str, record: &'a CanonicalRecord) -> ReportRow<'a> {
    ReportRow::Record { label, record, highlight: DiffMask::default() }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use dbcompare_recon::model::RawRow;
    use dbcompare_recon::{run, RunLabels};

    fn person(id: &str, first: &str, last: &str, age: &str, email: &str) -> RawRow {
        RawRow::new()
            .with("ID", id)
            .with("FIRST_NAME", first)
            .with("LAST_NAME", last)
            .with("AGE", age)
            .with("SALARY", "1000")
            .with("EMAIL", email)
            .with("CITY", "NY")
    }

    /// One record of each class: differing (age), identical, unmatched on both sides.
    pub(crate) fn sample_result() -> ReconResult {
        let left = vec![
            person("1", "Jo", "Doe", "30", "jo@x.com"),
            person("2", "Al", "Roe", "40", "al@x.com"),
            person("3", "Li", "Poe", "50", "li@x.com"),
        ];
        let right = vec![
            person("1", "Jo", "Doe", "31", "jo@x.com"),
            person("2", "AL", "Roe", "40", "al@x.com"),
            person("9", "Ny", "Zed", "20", "ny@x.com"),
        ];
        let labels = RunLabels { name: "people".into(), left: "DB1".into(), right: "DB2".into() };
        run(&labels, &left, &right).unwrap()
    }

    #[test]
    fn layout_orders_blocks() {
        let result = sample_result();
        let rows = layout(&result);

        let shape: Vec<String> = rows
            .iter()
            .map(|r| match r {
                ReportRow::Header => "header".to_string(),
                ReportRow::Section(t) => t.clone(),
                ReportRow::Record { label, record, .. } => format!("{label}:{}", record.id.display),
            })
            .collect();

        assert_eq!(
            shape,
            vec![
                "header",
                "DB1:1",
                "DB2:1",
                "Unmatched DB1 Records",
                "DB1:3",
                "Unmatched DB2 Records",
                "DB2:9",
                "Identical Records",
                "DB1:2",
                "DB2:2",
            ]
        );
    }

    #[test]
    fn only_right_row_of_a_pair_is_highlighted() {
        let result = sample_result();
        let rows = layout(&result);
        match (&rows[1], &rows[2]) {
            (ReportRow::Record { highlight: l, .. }, ReportRow::Record { highlight: r, .. }) => {
                assert!(l.is_empty());
                assert_eq!(r.iter().collect::<Vec<_>>(), vec![Field::Age]);
            }
            other => panic!("unexpected rows: {other:?}"),
        }
    }

    #[test]
    fn empty_blocks_are_omitted() {
        let rows_in = vec![person("1", "Jo", "Doe", "30", "jo@x.com")];
        let result = run(&RunLabels::default(), &rows_in, &rows_in).unwrap();
        let rows = layout(&result);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], ReportRow::Section("Identical Records".into()));
    }

    #[test]
    fn identical_pair_keeps_both_spellings() {
        let left = vec![person("2", "Al", "Roe", "40", "al@x.com")];
        let right = vec![person("2", "AL", "ROE", "40", "AL@X.COM")];
        let labels = RunLabels { name: "case".into(), left: "DB1".into(), right: "DB2".into() };
        let result = run(&labels, &left, &right).unwrap();
        let rows = layout(&result);

        let cells: Vec<Vec<String>> = rows.iter().map(|r| r.cells()).collect();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1], vec!["Identical Records"]);
        assert_eq!(cells[2][..3], ["DB1", "2", "Al"]);
        assert_eq!(cells[3][..4], ["DB2", "2", "AL", "ROE"]);
    }

    #[test]
    fn header_cells() {
        assert_eq!(
            ReportRow::Header.cells(),
            vec!["Database", "id", "first_name", "last_name", "age", "salary", "email", "city"]
        );
    }
}
