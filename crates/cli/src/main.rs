// dbcompare CLI - compare person records held in two databases

mod exit_codes;
mod recon;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use env_logger::Env;

use exit_codes::{EXIT_DIFFS, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "dbcompare")]
#[command(about = "Reconcile person records between two data sources")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a comparison job from a TOML config file
    #[command(after_help = "\
Exit code 1 means records differ or are unmatched (unless fail_on_diff = false).

Examples:
  dbcompare run nightly.compare.toml
  dbcompare run nightly.compare.toml --json
  dbcompare run nightly.compare.toml --output result.json")]
    Run {
        /// Path to the .compare.toml job file
        config: PathBuf,

        /// Print the result as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON result to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare two sources directly, without a job file
    #[command(after_help = "\
Source kind is taken from the extension: .csv/.tsv/.txt, .json, .db/.sqlite/.sqlite3.

Examples:
  dbcompare compare schema1.db schema2.db --xlsx differences.xlsx
  dbcompare compare old.csv new.csv --left-label OLD --right-label NEW --csv diff.csv
  dbcompare compare a.db b.json --left-table PERSON --json")]
    Compare {
        /// Left source
        left: PathBuf,

        /// Right source
        right: PathBuf,

        /// Label for the left side in reports
        #[arg(long, default_value = "Left")]
        left_label: String,

        /// Label for the right side in reports
        #[arg(long, default_value = "Right")]
        right_label: String,

        /// Table to read when the left source is SQLite
        #[arg(long)]
        left_table: Option<String>,

        /// Table to read when the right source is SQLite
        #[arg(long)]
        right_table: Option<String>,

        /// Write the Excel report here
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Write the CSV report here
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Fill color for differing cells (RRGGBB)
        #[arg(long, value_name = "RRGGBB")]
        highlight: Option<String>,

        /// Print the result as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Parse and validate a job file without running it
    #[command(after_help = "\
Examples:
  dbcompare validate nightly.compare.toml")]
    Validate {
        /// Path to the .compare.toml job file
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("DBCOMPARE_COMMIT"), ")",
        "\ntarget:  ", env!("DBCOMPARE_TARGET"),
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run { config, json, output } => recon::cmd_run(config, json, output),
        Commands::Compare {
            left,
            right,
            left_label,
            right_label,
            left_table,
            right_table,
            xlsx,
            csv,
            highlight,
            json,
        } => recon::cmd_compare(recon::CompareArgs {
            left,
            right,
            left_label,
            right_label,
            left_table,
            right_table,
            xlsx,
            csv,
            highlight,
            json,
        }),
        Commands::Validate { config } => recon::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if code == EXIT_DIFFS {
                eprintln!("{}", message);
            } else if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
