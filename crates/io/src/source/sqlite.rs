// SQLite source: read the seven logical columns from one table

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};

use dbcompare_recon::model::{Field, RawRow, RawValue};
use dbcompare_recon::SourceConfig;

use crate::error::IoError;

pub fn load(path: &Path, config: &SourceConfig) -> Result<Vec<RawRow>, IoError> {
    if !path.exists() {
        return Err(IoError::Read(format!("{}: no such database", path.display())));
    }
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    query_rows(&conn, config)
}

/// Build the SELECT for a source: configured columns aliased to field names.
pub fn select_sql(config: &SourceConfig) -> String {
    let columns: Vec<String> = Field::ALL
        .iter()
        .map(|f| format!("{} AS {}", quote_ident(config.column_for(*f)), quote_ident(f.as_str())))
        .collect();

    let table = match config.schema {
        Some(ref schema) => format!("{}.{}", quote_ident(schema), quote_ident(config.table_name())),
        None => quote_ident(config.table_name()),
    };

    // Rows come back in scan order; views have no rowid
    format!("SELECT {} FROM {}", columns.join(", "), table)
}

pub fn query_rows(conn: &Connection, config: &SourceConfig) -> Result<Vec<RawRow>, IoError> {
    let sql = select_sql(config);
    log::debug!("sqlite: {sql}");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            let mut raw = RawRow::new();
            for (i, field) in Field::ALL.iter().enumerate() {
                let value = match row.get_ref(i)? {
                    ValueRef::Null => RawValue::Null,
                    ValueRef::Integer(n) => RawValue::Int(n),
                    ValueRef::Real(x) => RawValue::Float(x),
                    ValueRef::Text(t) | ValueRef::Blob(t) => {
                        RawValue::Text(String::from_utf8_lossy(t).into_owned())
                    }
                };
                raw.push(field.as_str(), value);
            }
            Ok(raw)
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
