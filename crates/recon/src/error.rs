use std::fmt;

use crate::model::Side;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (duplicate labels, bad table name, etc.).
    ConfigValidation(String),
    /// Caller handed the engine rows it cannot interpret. Aborts the run.
    InvalidInput { side: Side, row: usize, reason: String },
}

impl ReconError {
    pub fn invalid_input(side: Side, row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidInput { side, row, reason: reason.into() }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidInput { side, row, reason } => {
                write!(f, "invalid input: {side} row {}: {reason}", row + 1)
            }
        }
    }
}

impl std::error::Error for ReconError {}
