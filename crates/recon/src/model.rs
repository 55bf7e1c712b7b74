use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A single scalar cell as delivered by a source adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Int(n)
    }
}

impl From<f64> for RawValue {
    fn from(x: f64) -> Self {
        RawValue::Float(x)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(RawValue::Null)
    }
}

/// One source row: column name → value, in source column order.
/// Column names are matched case-insensitively during normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub cells: Vec<(String, RawValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<RawValue>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: &str, value: impl Into<RawValue>) {
        self.cells.push((column.to_string(), value.into()));
    }
}

/// Which input sequence a row or record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The seven logical columns every record carries, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    FirstName,
    LastName,
    Age,
    Salary,
    Email,
    City,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::FirstName,
        Field::LastName,
        Field::Age,
        Field::Salary,
        Field::Email,
        Field::City,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Age => "age",
            Field::Salary => "salary",
            Field::Email => "email",
            Field::City => "city",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Field::Age | Field::Salary)
    }

    /// Case-insensitive lookup of a logical field by column name.
    pub fn from_column(name: &str) -> Option<Field> {
        let name = name.trim();
        Field::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
    }

    fn bit(&self) -> u8 {
        1 << (*self as u8)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Canonical record
// ---------------------------------------------------------------------------

/// A text field: original-case display form plus the folded form used for
/// keys and equality.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Text {
    pub display: String,
    #[serde(skip)]
    pub folded: String,
}

impl Text {
    pub fn new(display: impl Into<String>) -> Self {
        let display = display.into();
        let folded = display.trim().to_lowercase();
        Self { display, folded }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}

/// A leniently parsed number and the string form it compares by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Numeric {
    pub value: f64,
    pub text: String,
}

impl Default for Numeric {
    fn default() -> Self {
        Self { value: 0.0, text: "0".into() }
    }
}

/// A normalized row. Positions are 0-based within the record's own side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub position: usize,
    pub id: Text,
    pub first_name: Text,
    pub last_name: Text,
    pub age: Numeric,
    pub salary: Numeric,
    pub email: Text,
    pub city: Text,
}

impl CanonicalRecord {
    /// Comparison form of a field. Numeric fields compare by their string form.
    pub fn compare_value(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id.folded,
            Field::FirstName => &self.first_name.folded,
            Field::LastName => &self.last_name.folded,
            Field::Age => &self.age.text,
            Field::Salary => &self.salary.text,
            Field::Email => &self.email.folded,
            Field::City => &self.city.folded,
        }
    }

    /// Original-case form of a field, for reports.
    pub fn display_value(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id.display,
            Field::FirstName => &self.first_name.display,
            Field::LastName => &self.last_name.display,
            Field::Age => &self.age.text,
            Field::Salary => &self.salary.text,
            Field::Email => &self.email.display,
            Field::City => &self.city.display,
        }
    }

    /// Fields whose comparison forms differ between `self` and `other`.
    pub fn diff(&self, other: &CanonicalRecord) -> DiffMask {
        let mut mask = DiffMask::default();
        for field in Field::ALL {
            if self.compare_value(field) != other.compare_value(field) {
                mask.insert(field);
            }
        }
        mask
    }

    pub fn field_equal(&self, other: &CanonicalRecord) -> bool {
        self.diff(other).is_empty()
    }
}

// ---------------------------------------------------------------------------
// Diff mask
// ---------------------------------------------------------------------------

/// Set of differing fields. Iterates in `Field::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiffMask(u8);

impl DiffMask {
    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Field> for DiffMask {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut mask = DiffMask::default();
        for f in iter {
            mask.insert(f);
        }
        mask
    }
}

impl Serialize for DiffMask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for f in self.iter() {
            seq.serialize_element(f.as_str())?;
        }
        seq.end()
    }
}

impl fmt::Display for DiffMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|fld| fld.as_str()).collect();
        f.write_str(&names.join(","))
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Derived key kinds in match precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    Email,
    Name,
    Id,
    Composite,
}

impl KeyKind {
    pub const PRECEDENCE: [KeyKind; 4] =
        [KeyKind::Email, KeyKind::Name, KeyKind::Id, KeyKind::Composite];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Email => "email",
            KeyKind::Name => "name",
            KeyKind::Id => "id",
            KeyKind::Composite => "composite",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Reconciliation output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair {
    pub left: CanonicalRecord,
    pub right: CanonicalRecord,
    pub matched_by: KeyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferingPair {
    pub left: CanonicalRecord,
    pub right: CanonicalRecord,
    pub matched_by: KeyKind,
    pub diff: DiffMask,
}

/// The four-way partition of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reconciliation {
    pub identical: Vec<MatchedPair>,
    pub differing: Vec<DifferingPair>,
    pub unmatched_left: Vec<CanonicalRecord>,
    pub unmatched_right: Vec<CanonicalRecord>,
}

impl Reconciliation {
    /// True when every record found an identical counterpart.
    pub fn is_clean(&self) -> bool {
        self.differing.is_empty() && self.unmatched_left.is_empty() && self.unmatched_right.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summary + envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconSummary {
    pub left_records: usize,
    pub right_records: usize,
    pub identical: usize,
    pub differing: usize,
    pub unmatched_left: usize,
    pub unmatched_right: usize,
    pub matched_by: BTreeMap<KeyKind, usize>,
    pub field_diffs: BTreeMap<Field, usize>,
    pub left_key_collisions: usize,
    pub right_key_collisions: usize,
    pub left_numeric_fallbacks: usize,
    pub right_numeric_fallbacks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub name: String,
    pub left_label: String,
    pub right_label: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub reconciliation: Reconciliation,
}
