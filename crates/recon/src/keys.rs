use crate::model::{CanonicalRecord, KeyKind};

/// A lookup key derived from one record. Kinds never collide with each other:
/// an id of `"x"` and an email of `"x"` produce different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedKey {
    pub kind: KeyKind,
    pub value: String,
    usable: bool,
}

impl DerivedKey {
    /// Whether this key may be used as a match signal.
    ///
    /// An empty email never matches another empty email. Keys whose every
    /// component is empty are treated the same way.
    pub fn is_usable(&self) -> bool {
        self.usable
    }
}

/// The four keys of a record, in match precedence order.
pub fn derive_keys(record: &CanonicalRecord) -> [DerivedKey; 4] {
    KeyKind::PRECEDENCE.map(|kind| derive_key(record, kind))
}

pub fn derive_key(record: &CanonicalRecord, kind: KeyKind) -> DerivedKey {
    // Folded forms are already lowercase.
    let first = record.first_name.folded.as_str();
    let last = record.last_name.folded.as_str();
    let email = record.email.folded.as_str();
    let id = record.id.folded.as_str();

    let (value, usable) = match kind {
        KeyKind::Email => (email.to_string(), !email.is_empty()),
        KeyKind::Name => (format!("{first}_{last}"), !(first.is_empty() && last.is_empty())),
        KeyKind::Id => (id.to_string(), !id.is_empty()),
        KeyKind::Composite => (
            format!("{first}_{last}_{email}_{id}"),
            [first, last, email, id].iter().any(|c| !c.is_empty()),
        ),
    };

    DerivedKey { kind, value, usable }
}
