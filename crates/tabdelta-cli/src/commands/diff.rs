//! Diff command
//!
//! Usage: tabdelta diff <OLD> <NEW> -k <KEY>... [--config <FILE>]
//!        [--column-order <ORDER>] [--changed-only] [--format <FORMAT>]

use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabdelta_core::diff::{diff_with_options, render_summary, result_digest, DiffResult};
use tabdelta_core::model::{Dataset, KeySpec};
use tabdelta_core::options::{ColumnOrder, DiffOptions};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Baseline dataset (JSON)
    pub old: PathBuf,

    /// Dataset compared against the baseline (JSON)
    pub new: PathBuf,

    /// Key column; repeat for a composite key
    #[arg(short, long = "key", required = true)]
    pub key: Vec<String>,

    /// TOML file with diff options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Column ordering, overrides the config file (lexical or original)
    #[arg(long)]
    pub column_order: Option<ColumnOrder>,

    /// Keep only changed rows in the changed-rows table
    #[arg(long)]
    pub changed_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{"digest": ..., "result": ...}`
    Json,
    /// Markdown report
    Summary,
}

#[derive(Serialize)]
struct DiffReport<'a> {
    digest: String,
    result: &'a DiffResult,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = match &args.config {
        Some(path) => DiffOptions::from_toml_str(&read(path)?)?,
        None => DiffOptions::default(),
    };
    if let Some(order) = args.column_order {
        options = options.with_column_order(order);
    }
    if args.changed_only {
        options = options.with_changed_rows_only(true);
    }

    let key = KeySpec::new(args.key)?;
    let old = load_dataset(&args.old)?;
    let new = load_dataset(&args.new)?;

    tracing::debug!(
        old = %args.old.display(),
        new = %args.new.display(),
        "datasets loaded"
    );

    let result = diff_with_options(&old, &new, &key, &options)?;

    match args.format {
        OutputFormat::Json => {
            let report = DiffReport {
                digest: result_digest(&result)?,
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Summary => print!("{}", render_summary(&result)),
    }

    Ok(())
}

fn read(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e).into())
}

fn load_dataset(path: &Path) -> Result<Dataset, Box<dyn std::error::Error>> {
    let text = read(path)?;
    serde_json::from_str(&text)
        .map_err(|e| format!("invalid dataset {}: {}", path.display(), e).into())
}
