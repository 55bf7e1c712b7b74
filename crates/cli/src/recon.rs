//! `dbcompare run` / `compare` / `validate`.

use std::path::{Path, PathBuf};

use dbcompare_io::report::{self, ReportStyle};
use dbcompare_io::source::load_source;
use dbcompare_recon::model::{Field, RawRow};
use dbcompare_recon::{CompareConfig, ReconResult, RunLabels, Side, SourceConfig, SourceKind};

use crate::exit_codes::{
    source_exit_code, EXIT_DIFFS, EXIT_INVALID_CONFIG, EXIT_INVALID_INPUT, EXIT_REPORT_WRITE,
    EXIT_USAGE,
};
use crate::CliError;

/// Arguments of `dbcompare compare`.
pub struct CompareArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    pub left_label: String,
    pub right_label: String,
    pub left_table: Option<String>,
    pub right_table: Option<String>,
    pub xlsx: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub highlight: Option<String>,
    pub json: bool,
}

/// Report destinations, already resolved.
struct Reports {
    xlsx: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
}

// ============================================================================
// run
// ============================================================================

pub fn cmd_run(config_path: PathBuf, json_output: bool, output_file: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(&config_path)?;

    if !config.output.has_report() && !json_output && output_file.is_none() {
        return Err(CliError::new(EXIT_INVALID_CONFIG, format!("job '{}' has no report output", config.name))
            .with_hint("add xlsx, csv or json under [output], or pass --json"));
    }

    // Relative paths are relative to the job file
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let left_path = resolve_path(base_dir, &config.left.path)?;
    let right_path = resolve_path(base_dir, &config.right.path)?;

    let reports = Reports {
        xlsx: config.output.xlsx.as_deref().map(|p| resolve_path(base_dir, p)).transpose()?,
        csv: config.output.csv.as_deref().map(|p| resolve_path(base_dir, p)).transpose()?,
        json: config.output.json.as_deref().map(|p| resolve_path(base_dir, p)).transpose()?,
    };
    let style = report_style(config.output.highlight.as_deref())?;

    let left_rows = load_side(Side::Left, &config.left, &left_path)?;
    let right_rows = load_side(Side::Right, &config.right, &right_path)?;

    let labels = RunLabels {
        name: config.name.clone(),
        left: config.left_label().to_string(),
        right: config.right_label().to_string(),
    };
    let result = reconcile(&labels, &left_rows, &right_rows)?;

    write_reports(&result, &reports, &style)?;
    if let Some(ref path) = output_file {
        write_json(&result, path)?;
    }
    if json_output {
        print_json(&result)?;
    }

    print_summary(&result);
    verdict(&result, config.output.fail_on_diff)
}

// ============================================================================
// compare
// ============================================================================

pub fn cmd_compare(args: CompareArgs) -> Result<(), CliError> {
    let left = source_from_path(&args.left, &args.left_label, args.left_table)?;
    let right = source_from_path(&args.right, &args.right_label, args.right_table)?;

    // Reuse the job-file rules for labels and table names
    let config = CompareConfig {
        name: "compare".to_string(),
        left,
        right,
        output: Default::default(),
    };
    config.validate().map_err(|e| CliError::args(e.to_string()))?;

    let style = report_style(args.highlight.as_deref())?;

    let left_rows = load_side(Side::Left, &config.left, &args.left)?;
    let right_rows = load_side(Side::Right, &config.right, &args.right)?;

    let labels = RunLabels {
        name: format!("{} vs {}", args.left.display(), args.right.display()),
        left: config.left_label().to_string(),
        right: config.right_label().to_string(),
    };
    let result = reconcile(&labels, &left_rows, &right_rows)?;

    let reports = Reports { xlsx: args.xlsx, csv: args.csv, json: None };
    write_reports(&result, &reports, &style)?;
    if args.json {
        print_json(&result)?;
    }

    print_summary(&result);
    verdict(&result, true)
}

fn source_from_path(path: &Path, label: &str, table: Option<String>) -> Result<SourceConfig, CliError> {
    let kind = SourceKind::from_path(path).ok_or_else(|| {
        CliError::args(format!("cannot tell the source type of {}", path.display()))
            .with_hint("use a .csv, .tsv, .json, .db or .sqlite file, or write a job file for `dbcompare run`")
    })?;

    let mut source = SourceConfig::new(kind, path.display().to_string());
    source.label = Some(label.to_string());
    source.table = table;
    Ok(source)
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(&config_path)?;
    eprintln!(
        "valid: '{}' compares {} ({}) with {} ({})",
        config.name,
        config.left_label(),
        config.left.kind,
        config.right_label(),
        config.right.kind,
    );
    if !config.output.has_report() {
        eprintln!("note: no [output] reports configured; `run` will need --json or --output");
    }
    Ok(())
}

// ============================================================================
// Shared steps
// ============================================================================

fn load_config(config_path: &Path) -> Result<CompareConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::new(EXIT_USAGE, format!("cannot read config {}: {e}", config_path.display()))
    })?;
    CompareConfig::from_toml(&config_str).map_err(|e| CliError::new(EXIT_INVALID_CONFIG, e.to_string()))
}

/// Expand `~` and `$VAR`, then anchor relative paths at `base_dir`.
fn resolve_path(base_dir: &Path, raw: &str) -> Result<PathBuf, CliError> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, format!("path '{raw}': {e}")))?;
    let path = PathBuf::from(expanded.into_owned());
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(base_dir.join(path))
    }
}

fn report_style(highlight: Option<&str>) -> Result<ReportStyle, CliError> {
    let mut style = ReportStyle::default();
    if let Some(color) = highlight {
        style.highlight = ReportStyle::parse_color(color)
            .ok_or_else(|| CliError::args(format!("invalid highlight color '{color}'")).with_hint("expected RRGGBB, e.g. FF0000"))?;
    }
    Ok(style)
}

fn load_side(side: Side, source: &SourceConfig, path: &Path) -> Result<Vec<RawRow>, CliError> {
    log::info!("{side}: reading {} source {}", source.kind, path.display());
    load_source(side, source, path).map_err(|e| CliError::new(source_exit_code(&e), format!("{side} source: {e}")))
}

fn reconcile(labels: &RunLabels, left: &[RawRow], right: &[RawRow]) -> Result<ReconResult, CliError> {
    dbcompare_recon::run(labels, left, right).map_err(|e| CliError::new(EXIT_INVALID_INPUT, e.to_string()))
}

fn write_reports(result: &ReconResult, reports: &Reports, style: &ReportStyle) -> Result<(), CliError> {
    let write_err = |e: dbcompare_io::IoError| CliError::new(EXIT_REPORT_WRITE, e.to_string());

    if let Some(ref path) = reports.xlsx {
        report::xlsx::export(result, path, style).map_err(write_err)?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(ref path) = reports.csv {
        report::csv::export(result, path).map_err(write_err)?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(ref path) = reports.json {
        write_json(result, path)?;
    }
    Ok(())
}

fn write_json(result: &ReconResult, path: &Path) -> Result<(), CliError> {
    report::json::export(result, path).map_err(|e| CliError::new(EXIT_REPORT_WRITE, e.to_string()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn print_json(result: &ReconResult) -> Result<(), CliError> {
    let json_str = report::json::to_string(result).map_err(|e| CliError::new(EXIT_REPORT_WRITE, e.to_string()))?;
    println!("{json_str}");
    Ok(())
}

/// Human summary on stderr.
fn print_summary(result: &ReconResult) {
    let s = &result.summary;
    let (left, right) = (&result.meta.left_label, &result.meta.right_label);

    eprintln!(
        "{}: {} {} record(s), {} {} record(s)",
        result.meta.name, s.left_records, left, s.right_records, right,
    );
    eprintln!(
        "  {} identical, {} differing, {} only in {}, {} only in {}",
        s.identical, s.differing, s.unmatched_left, left, s.unmatched_right, right,
    );

    if !s.field_diffs.is_empty() {
        let per_field: Vec<String> = Field::ALL
            .iter()
            .filter_map(|f| s.field_diffs.get(f).map(|n| format!("{f}={n}")))
            .collect();
        eprintln!("  differing fields: {}", per_field.join(", "));
    }
    if s.left_numeric_fallbacks + s.right_numeric_fallbacks > 0 {
        eprintln!(
            "  non-numeric age/salary values read as 0: {} in {}, {} in {}",
            s.left_numeric_fallbacks, left, s.right_numeric_fallbacks, right,
        );
    }
}

fn verdict(result: &ReconResult, fail_on_diff: bool) -> Result<(), CliError> {
    let rec = &result.reconciliation;
    if rec.is_clean() || !fail_on_diff {
        return Ok(());
    }
    Err(CliError::new(
        EXIT_DIFFS,
        format!(
            "{} differing, {} unmatched record(s)",
            rec.differing.len(),
            rec.unmatched_left.len() + rec.unmatched_right.len()
        ),
    ))
}
