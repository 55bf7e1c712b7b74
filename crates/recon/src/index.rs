use std::collections::HashMap;

use crate::keys::{derive_key, derive_keys, DerivedKey};
use crate::model::{CanonicalRecord, KeyKind};

/// Derived key → positions of the records sharing it, in insertion order.
///
/// Buckets are only ever read by exact key, never iterated in hash order, so
/// results do not depend on hashing.
#[derive(Debug, Default)]
pub struct MatchIndex {
    buckets: HashMap<DerivedKey, Vec<usize>>,
}

impl MatchIndex {
    /// Index every usable key of every record. Unusable keys (empty email,
    /// all-blank components) get no bucket.
    pub fn build(records: &[CanonicalRecord]) -> Self {
        let mut buckets: HashMap<DerivedKey, Vec<usize>> = HashMap::new();
        for record in records {
            for key in derive_keys(record) {
                if !key.is_usable() {
                    continue;
                }
                let bucket = buckets.entry(key).or_default();
                if bucket.last() != Some(&record.position) {
                    bucket.push(record.position);
                }
            }
        }
        Self { buckets }
    }

    /// All positions filed under `key`, first-inserted first.
    pub fn bucket(&self, key: &DerivedKey) -> &[usize] {
        if !key.is_usable() {
            return &[];
        }
        self.buckets.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The authoritative (first-inserted) position for `key`.
    pub fn first(&self, key: &DerivedKey) -> Option<usize> {
        self.bucket(key).first().copied()
    }

    /// Best candidate for `record`: the first non-empty bucket in key
    /// precedence order, with the kind that produced it.
    pub fn best_match(&self, record: &CanonicalRecord) -> Option<(usize, KeyKind)> {
        KeyKind::PRECEDENCE
            .into_iter()
            .find_map(|kind| self.first(&derive_key(record, kind)).map(|pos| (pos, kind)))
    }

    /// Number of keys shared by more than one record.
    pub fn collisions(&self) -> usize {
        self.buckets.values().filter(|b| b.len() > 1).count()
    }

    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }
}
