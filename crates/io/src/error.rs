use std::fmt;

use dbcompare_recon::ReconError;

#[derive(Debug)]
pub enum IoError {
    /// File could not be opened or read.
    Read(String),
    /// Source content is not in the expected shape (bad CSV, bad JSON).
    Parse(String),
    /// SQLite open / query failure.
    Sqlite(String),
    /// Report could not be written.
    Write(String),
    /// Rows were read but the engine rejected them.
    Recon(ReconError),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "read error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Sqlite(msg) => write!(f, "sqlite error: {msg}"),
            Self::Write(msg) => write!(f, "write error: {msg}"),
            Self::Recon(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Recon(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReconError> for IoError {
    fn from(e: ReconError) -> Self {
        Self::Recon(e)
    }
}

impl From<rusqlite::Error> for IoError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Sqlite(e.to_string())
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for IoError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Write(e.to_string())
    }
}
