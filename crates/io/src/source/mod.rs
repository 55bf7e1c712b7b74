//! Source adapters: turn a configured source into raw rows for one side.

pub mod csv;
pub mod json;
pub mod sqlite;

use std::path::Path;

use dbcompare_recon::model::{Field, RawRow};
use dbcompare_recon::{Side, SourceConfig, SourceKind};

use crate::error::IoError;

/// Load all rows of one side. `path` is the already-resolved location of the
/// source (the config's `path` after expansion).
pub fn load_source(side: Side, config: &SourceConfig, path: &Path) -> Result<Vec<RawRow>, IoError> {
    let rows = match config.kind {
        SourceKind::Csv => {
            let delimiter = config.delimiter.map(|d| d as u8);
            let rows = csv::load(path, delimiter)?;
            apply_column_map(config, rows)
        }
        SourceKind::Json => {
            let rows = json::load(side, path)?;
            apply_column_map(config, rows)
        }
        // Renames are applied in the SELECT list.
        SourceKind::Sqlite => sqlite::load(path, config)?,
    };

    log::debug!("{side}: loaded {} row(s) from {} source {}", rows.len(), config.kind, path.display());
    Ok(rows)
}

/// Rename configured source columns to their logical field names.
///
/// A column that merely shares its name with a remapped field is dropped, so
/// the configured column is the only one feeding that field.
pub fn apply_column_map(config: &SourceConfig, rows: Vec<RawRow>) -> Vec<RawRow> {
    let mapped: Vec<(String, Field)> = Field::ALL
        .into_iter()
        .filter(|f| config.column_for(*f) != f.as_str())
        .map(|f| (config.column_for(f).trim().to_lowercase(), f))
        .collect();

    if mapped.is_empty() {
        return rows;
    }

    if let Some(first) = rows.first() {
        for (column, field) in &mapped {
            let present = first.cells.iter().any(|(c, _)| c.trim().to_lowercase() == *column);
            if !present {
                log::warn!("column '{column}' configured for {field} not found in source");
            }
        }
    }

    rows.into_iter()
        .map(|row| {
            let mut out = RawRow::new();
            for (column, value) in row.cells {
                let folded = column.trim().to_lowercase();
                if let Some((_, field)) = mapped.iter().find(|(c, _)| *c == folded) {
                    out.push(field.as_str(), value);
                } else if Field::from_column(&column).is_some_and(|f| mapped.iter().any(|(_, m)| *m == f)) {
                    continue;
                } else {
                    out.push(&column, value);
                }
            }
            out
        })
        .collect()
}
