// JSON source: a top-level array of row objects

use std::path::Path;

use dbcompare_recon::model::RawRow;
use dbcompare_recon::normalize::raw_rows_from_json;
use dbcompare_recon::Side;

use crate::error::IoError;

pub fn load(side: Side, path: &Path) -> Result<Vec<RawRow>, IoError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;
    let doc: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| IoError::Parse(format!("{}: {e}", path.display())))?;
    Ok(raw_rows_from_json(side, &doc)?)
}
