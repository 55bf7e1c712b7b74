// Source adapters and report sinks around the reconciliation engine

pub mod error;
pub mod report;
pub mod source;

pub use error::IoError;
