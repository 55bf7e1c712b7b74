// JSON report: the full result envelope

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use dbcompare_recon::ReconResult;

use crate::error::IoError;

pub fn export(result: &ReconResult, path: &Path) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::Write(format!("{}: {e}", path.display())))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, result).map_err(|e| IoError::Write(e.to_string()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

pub fn to_string(result: &ReconResult) -> Result<String, IoError> {
    serde_json::to_string_pretty(result).map_err(|e| IoError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn json_export_has_envelope() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        export(&sample_result(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["meta"]["name"], "people");
        assert_eq!(parsed["summary"]["differing"], 1);
        assert_eq!(parsed["summary"]["unmatched_left"], 1);
        assert_eq!(parsed["reconciliation"]["differing"][0]["diff"], serde_json::json!(["age"]));
    }
}
