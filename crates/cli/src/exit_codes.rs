//! CLI Exit Code Registry
//!
//! Single source of truth for `dbcompare` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success: both sides reconciled, or `fail_on_diff = false` |
//! | 1    | Differences found (differing or unmatched records)       |
//! | 2    | Usage error (bad arguments, unknown file type)           |
//! | 3    | Invalid job config                                       |
//! | 4    | A source could not be read                               |
//! | 5    | A source produced rows the engine cannot interpret       |
//! | 6    | A report could not be written                            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above

use dbcompare_io::IoError;

/// Success - command completed, nothing to report.
pub const EXIT_SUCCESS: u8 = 0;

/// Differences found. Like `diff(1)`, exit 1 means "inputs differ."
pub const EXIT_DIFFS: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Job config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Source file or database could not be opened, parsed or queried.
pub const EXIT_SOURCE_READ: u8 = 4;

/// Rows were read but rejected by the engine (e.g. ambiguous columns).
pub const EXIT_INVALID_INPUT: u8 = 5;

/// Report file could not be written.
pub const EXIT_REPORT_WRITE: u8 = 6;

/// Map a source-loading error to its exit code.
pub fn source_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Recon(_) => EXIT_INVALID_INPUT,
        IoError::Write(_) => EXIT_REPORT_WRITE,
        IoError::Read(_) | IoError::Parse(_) | IoError::Sqlite(_) => EXIT_SOURCE_READ,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbcompare_recon::{ReconError, Side};

    #[test]
    fn engine_rejections_are_invalid_input() {
        let err = IoError::Recon(ReconError::invalid_input(Side::Left, 0, "bad"));
        assert_eq!(source_exit_code(&err), EXIT_INVALID_INPUT);
    }

    #[test]
    fn sqlite_failures_are_read_errors() {
        assert_eq!(source_exit_code(&IoError::Sqlite("no such table".into())), EXIT_SOURCE_READ);
    }
}
