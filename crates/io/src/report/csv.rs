// CSV report: the shared row layout plus a trailing `diff` column

use std::path::Path;

use super::{layout, ReportRow};
use crate::error::IoError;
use dbcompare_recon::ReconResult;

pub const DIFF_HEADER: &str = "diff";

pub fn export(result: &ReconResult, path: &Path) -> Result<(), IoError> {
    // Section rows are a single cell
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| IoError::Write(format!("{}: {e}", path.display())))?;

    for row in layout(result) {
        let mut record = row.cells();
        match row {
            ReportRow::Header => record.push(DIFF_HEADER.to_string()),
            ReportRow::Record { highlight, .. } => record.push(highlight.to_string()),
            ReportRow::Section(_) => {}
        }
        writer.write_record(&record).map_err(|e| IoError::Write(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| IoError::Write(format!("{}: {e}", path.display())))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_result;
    use dbcompare_recon::model::Field;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_layout_with_diff_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        export(&sample_result(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Database,id,first_name,last_name,age,salary,email,city,diff");
        assert_eq!(lines[1], "DB1,1,Jo,Doe,30,1000,jo@x.com,NY,");
        assert_eq!(lines[2], "DB2,1,Jo,Doe,31,1000,jo@x.com,NY,age");
        assert_eq!(lines[3], "Unmatched DB1 Records");
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[9], "DB2,2,AL,Roe,40,1000,al@x.com,NY,");
    }

    #[test]
    fn records_have_full_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        export(&sample_result(), &path).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .unwrap();
        let widths: Vec<usize> = reader.records().map(|r| r.unwrap().len()).collect();
        assert!(widths.iter().all(|w| *w == 1 || *w == Field::ALL.len() + 2), "{widths:?}");
    }
}
