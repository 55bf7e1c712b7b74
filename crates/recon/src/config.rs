use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ReconError;
use crate::model::Field;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A comparison job: two sources and where to put the report.
#[derive(Debug, Deserialize)]
pub struct CompareConfig {
    pub name: String,
    pub left: SourceConfig,
    pub right: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Side label used in reports ("DB1", "staging", ...).
    #[serde(default)]
    pub label: Option<String>,
    pub kind: SourceKind,
    /// File or database path. May contain `~` and `$VAR` references.
    pub path: String,
    /// SQLite table to read.
    #[serde(default)]
    pub table: Option<String>,
    /// SQLite schema (attached database name) holding `table`.
    #[serde(default)]
    pub schema: Option<String>,
    /// CSV delimiter. Sniffed from the data when absent.
    #[serde(default)]
    pub delimiter: Option<char>,
    /// Logical field → source column name, for sources that use other names.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Csv,
    Json,
    Sqlite,
}

impl SourceKind {
    /// Infer the source kind from a file extension.
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(SourceKind::Csv),
            "json" => Some(SourceKind::Json),
            "db" | "sqlite" | "sqlite3" => Some(SourceKind::Sqlite),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

pub const DEFAULT_TABLE: &str = "person";

impl SourceConfig {
    pub fn new(kind: SourceKind, path: impl Into<String>) -> Self {
        Self {
            label: None,
            kind,
            path: path.into(),
            table: None,
            schema: None,
            delimiter: None,
            columns: BTreeMap::new(),
        }
    }

    pub fn label_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(default)
    }

    pub fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or(DEFAULT_TABLE)
    }

    /// Source column that feeds `field`.
    pub fn column_for(&self, field: Field) -> &str {
        self.columns
            .iter()
            .find(|(k, _)| Field::from_column(k) == Some(field))
            .map(|(_, v)| v.as_str())
            .unwrap_or(field.as_str())
    }

    fn validate(&self, side: &str) -> Result<(), ReconError> {
        if self.path.trim().is_empty() {
            return Err(ReconError::ConfigValidation(format!("{side}: path is empty")));
        }

        if self.kind == SourceKind::Sqlite {
            check_identifier(side, "table", self.table_name())?;
            if let Some(ref schema) = self.schema {
                check_identifier(side, "schema", schema)?;
            }
        } else if self.table.is_some() || self.schema.is_some() {
            return Err(ReconError::ConfigValidation(format!(
                "{side}: table/schema only apply to sqlite sources, not {}",
                self.kind
            )));
        }

        if let Some(d) = self.delimiter {
            if self.kind != SourceKind::Csv {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: delimiter only applies to csv sources"
                )));
            }
            if !d.is_ascii() {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: delimiter must be a single ASCII character, got {d:?}"
                )));
            }
        }

        let mut targets: Vec<String> = Vec::new();
        for (field_name, column) in &self.columns {
            if Field::from_column(field_name).is_none() {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: unknown field '{field_name}' in columns (expected one of {})",
                    Field::ALL.map(|f| f.as_str()).join(", ")
                )));
            }
            let folded = column.trim().to_lowercase();
            if folded.is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: column for '{field_name}' is empty"
                )));
            }
            if targets.contains(&folded) {
                return Err(ReconError::ConfigValidation(format!(
                    "{side}: column '{column}' is mapped to more than one field"
                )));
            }
            targets.push(folded);
        }

        Ok(())
    }
}

/// Parse an `RRGGBB` color, with or without a leading `#`, to 0xRRGGBB.
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Plain SQL identifier: letters, digits, underscore; not starting with a digit.
fn check_identifier(side: &str, what: &str, name: &str) -> Result<(), ReconError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ReconError::ConfigValidation(format!(
            "{side}: {what} '{name}' is not a plain identifier"
        )))
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub xlsx: Option<String>,
    #[serde(default)]
    pub csv: Option<String>,
    #[serde(default)]
    pub json: Option<String>,
    /// Exit non-zero when anything differs or is unmatched.
    #[serde(default = "default_fail_on_diff")]
    pub fail_on_diff: bool,
    /// Fill for differing cells, `RRGGBB` with optional `#`.
    #[serde(default)]
    pub highlight: Option<String>,
}

fn default_fail_on_diff() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            xlsx: None,
            csv: None,
            json: None,
            fail_on_diff: true,
            highlight: None,
        }
    }
}

impl OutputConfig {
    pub fn has_report(&self) -> bool {
        self.xlsx.is_some() || self.csv.is_some() || self.json.is_some()
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CompareConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: CompareConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn left_label(&self) -> &str {
        self.left.label_or("Left")
    }

    pub fn right_label(&self) -> &str {
        self.right.label_or("Right")
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.name.trim().is_empty() {
            return Err(ReconError::ConfigValidation("name must not be empty".into()));
        }

        self.left.validate("left")?;
        self.right.validate("right")?;

        let (l, r) = (self.left_label(), self.right_label());
        if l.trim().is_empty() || r.trim().is_empty() {
            return Err(ReconError::ConfigValidation("side labels must not be empty".into()));
        }
        if l.eq_ignore_ascii_case(r) {
            return Err(ReconError::ConfigValidation(format!(
                "left and right labels must differ (both are '{l}')"
            )));
        }

        if let Some(ref color) = self.output.highlight {
            if parse_hex_color(color).is_none() {
                return Err(ReconError::ConfigValidation(format!(
                    "output.highlight must be an RRGGBB color, got '{color}'"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
