//! `dbcompare-recon`: two-sided record reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded rows, returns the four-way
//! partition (identical, differing, unmatched left, unmatched right).
//! No file, database or report dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod keys;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod summary;

pub use config::{CompareConfig, SourceConfig, SourceKind};
pub use engine::{run, RunLabels};
pub use error::ReconError;
pub use matcher::reconcile;
pub use model::{
    CanonicalRecord, DiffMask, Field, KeyKind, RawRow, RawValue, ReconResult, Reconciliation, Side,
};
