//! Raw rows → canonical records.
//!
//! Normalization never fails on dirty values: unparseable numbers become `0`
//! and missing columns become empty strings. The only rejected input is a row
//! whose shape is wrong (colliding column names, non-scalar JSON cells).

use crate::error::ReconError;
use crate::model::{CanonicalRecord, Field, Numeric, RawRow, RawValue, Side, Text};

/// Normalized records for one side, plus how many numeric cells fell back to 0.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSide {
    pub records: Vec<CanonicalRecord>,
    pub numeric_fallbacks: usize,
}

/// Normalize every row of one side. Any malformed row aborts the whole side.
pub fn normalize_rows(side: Side, rows: &[RawRow]) -> Result<NormalizedSide, ReconError> {
    let mut out = NormalizedSide {
        records: Vec::with_capacity(rows.len()),
        numeric_fallbacks: 0,
    };

    for (position, row) in rows.iter().enumerate() {
        let (record, fallbacks) = normalize_row(side, position, row)?;
        out.numeric_fallbacks += fallbacks;
        out.records.push(record);
    }

    if out.numeric_fallbacks > 0 {
        log::warn!(
            "{side}: {} numeric value(s) could not be parsed and were treated as 0",
            out.numeric_fallbacks
        );
    }
    log::debug!("{side}: normalized {} record(s)", out.records.len());

    Ok(out)
}

/// Normalize one row. Returns the record and the count of numeric fallbacks.
pub fn normalize_row(
    side: Side,
    position: usize,
    row: &RawRow,
) -> Result<(CanonicalRecord, usize), ReconError> {
    let mut slots: [Option<&RawValue>; 7] = [None; 7];
    let mut seen: Vec<(String, &str)> = Vec::with_capacity(row.cells.len());

    for (column, value) in &row.cells {
        let folded = column.trim().to_lowercase();
        if let Some((_, first)) = seen.iter().find(|(c, _)| *c == folded) {
            return Err(ReconError::invalid_input(
                side,
                position,
                format!("columns '{first}' and '{column}' collide case-insensitively"),
            ));
        }
        seen.push((folded, column.as_str()));

        if let Some(field) = Field::from_column(column) {
            slots[field as usize] = Some(value);
        }
    }

    let text = |field: Field| Text::new(slots[field as usize].map(display_text).unwrap_or_default());

    let mut fallbacks = 0;
    let mut numeric = |field: Field| {
        let (n, fell_back) = slots[field as usize].map(coerce_numeric).unwrap_or_default();
        if fell_back {
            fallbacks += 1;
        }
        n
    };
    let age = numeric(Field::Age);
    let salary = numeric(Field::Salary);

    let record = CanonicalRecord {
        position,
        id: text(Field::Id),
        first_name: text(Field::FirstName),
        last_name: text(Field::LastName),
        age,
        salary,
        email: text(Field::Email),
        city: text(Field::City),
    };

    Ok((record, fallbacks))
}

/// String form of a non-numeric cell.
pub fn display_text(value: &RawValue) -> String {
    match value {
        RawValue::Null => String::new(),
        RawValue::Bool(b) => b.to_string(),
        RawValue::Int(n) => n.to_string(),
        RawValue::Float(x) => float_text(*x).unwrap_or_default(),
        RawValue::Text(s) => s.clone(),
    }
}

/// Lenient numeric coercion. Returns the number and whether a non-empty value
/// had to fall back to 0.
///
/// The string form preserves how the value was written: `30` and `30.0` stay
/// distinct, so they compare unequal.
pub fn coerce_numeric(value: &RawValue) -> (Numeric, bool) {
    match value {
        RawValue::Null => (Numeric::default(), false),
        RawValue::Bool(b) => {
            let n = i64::from(*b);
            (Numeric { value: n as f64, text: n.to_string() }, false)
        }
        RawValue::Int(n) => (Numeric { value: *n as f64, text: n.to_string() }, false),
        RawValue::Float(x) => match float_text(*x) {
            Some(text) => (Numeric { value: *x, text }, false),
            None => (Numeric::default(), true),
        },
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return (Numeric::default(), false);
            }
            if let Ok(n) = s.parse::<i64>() {
                return (Numeric { value: n as f64, text: n.to_string() }, false);
            }
            match s.parse::<f64>().ok().and_then(|x| float_text(x).map(|t| (x, t))) {
                Some((x, text)) => (Numeric { value: x, text }, false),
                None => (Numeric::default(), true),
            }
        }
    }
}

fn float_text(x: f64) -> Option<String> {
    if x.is_finite() {
        Some(format!("{x:?}"))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// JSON rows
// ---------------------------------------------------------------------------

/// Convert a JSON document (array of row objects) into raw rows.
pub fn raw_rows_from_json(side: Side, doc: &serde_json::Value) -> Result<Vec<RawRow>, ReconError> {
    let items = doc.as_array().ok_or_else(|| {
        ReconError::invalid_input(side, 0, format!("expected an array of rows, found {}", json_kind(doc)))
    })?;

    let mut rows = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            ReconError::invalid_input(side, i, format!("row is not an object ({})", json_kind(item)))
        })?;

        let mut row = RawRow::new();
        for (column, value) in obj {
            let raw = match value {
                serde_json::Value::Null => RawValue::Null,
                serde_json::Value::Bool(b) => RawValue::Bool(*b),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => RawValue::Int(i),
                    None => RawValue::Float(n.as_f64().unwrap_or(0.0)),
                },
                serde_json::Value::String(s) => RawValue::Text(s.clone()),
                other => {
                    return Err(ReconError::invalid_input(
                        side,
                        i,
                        format!("column '{column}' holds a non-scalar {}", json_kind(other)),
                    ));
                }
            };
            row.push(column, raw);
        }
        rows.push(row);
    }
    Ok(rows)
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
