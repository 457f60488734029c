//! Command-line driver for energy-guard.
//!
//! Parses arguments, reads every input file into one batch, validates it
//! and renders the report. The binary only adds logging setup and the exit
//! status on top of [`run`].

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use energy_guard::catalog::{RuleCatalog, DEFAULT_CATALOG};
use energy_guard::core::{ValidationReport, Validator};
use energy_guard::formatters::{
    FormatterConfig, HumanFormatter, JsonFormatter, MarkdownFormatter, ReportFormatter,
};
use energy_guard::ingest::{expand_globs, source_for_path, Batch, InputFormat};
use energy_guard::log_data_op;
use energy_guard::logging::setup::LoggingConfig;
use energy_guard::logging::LogConfig;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

/// Report rendering for stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Console report
    Human,
    /// Structured JSON
    Json,
    /// Markdown summary
    Markdown,
}

/// Validate energy-statistics records before they reach analysis.
#[derive(Debug, Parser)]
#[command(name = "energy-guard", version, about)]
pub struct Cli {
    /// Input files or glob patterns (.jsonl, .ndjson, .json, .csv, .tsv)
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<String>,

    /// JSON rule catalog replacing the built-in region set and year range
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Input format for every file, instead of detecting it from the extension
    #[arg(long, value_name = "FMT", value_parser = parse_input_format)]
    pub format: Option<InputFormat>,

    /// How to render the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    /// Disable colors in the console report
    #[arg(long)]
    pub no_color: bool,

    /// List at most N findings per severity
    #[arg(long, value_name = "N")]
    pub max_findings: Option<usize>,

    /// Check records on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Check duplicates and region coverage across all files together
    /// instead of per file
    #[arg(long)]
    pub merge_batches: bool,

    /// Log level for stderr diagnostics
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: Level,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

fn parse_input_format(value: &str) -> std::result::Result<InputFormat, String> {
    value
        .parse()
        .map_err(|_| format!("unknown input format '{value}' (expected jsonl, csv or tsv)"))
}

impl Cli {
    /// Subscriber settings derived from `--log-level` and `--json-logs`.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::default()
            .with_level(Level::WARN.min(self.log_level))
            .with_guard_level(self.log_level)
            .with_json_format(self.json_logs)
    }

    /// Engine logging preset matching the requested verbosity.
    pub fn log_config(&self) -> LogConfig {
        if self.log_level >= Level::DEBUG {
            LogConfig::verbose()
        } else if self.log_level >= Level::INFO {
            LogConfig::balanced()
        } else {
            LogConfig::production()
        }
    }

    /// Report settings for stdout. Colors need a terminal.
    pub fn formatter_config(&self) -> FormatterConfig {
        self.formatter_config_for(std::io::stdout().is_terminal())
    }

    fn formatter_config_for(&self, stdout_is_terminal: bool) -> FormatterConfig {
        FormatterConfig::default()
            .with_colors(
                stdout_is_terminal && !self.no_color && self.output == OutputFormat::Human,
            )
            .with_max_findings(self.max_findings)
    }
}

/// A finished run: the report and its rendering.
#[derive(Debug)]
pub struct RunOutput {
    pub report: ValidationReport,
    pub rendered: String,
}

impl RunOutput {
    /// Process exit status: 0 on pass, 1 on fail.
    pub fn exit_code(&self) -> i32 {
        self.report.outcome().exit_code()
    }
}

fn load_catalog(cli: &Cli) -> Result<Arc<RuleCatalog>> {
    match &cli.catalog {
        Some(path) => {
            let catalog = RuleCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load rule catalog {}", path.display()))?;
            info!(
                path = %path.display(),
                regions = catalog.valid_region_codes().len(),
                "Loaded rule catalog"
            );
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::clone(&DEFAULT_CATALOG)),
    }
}

fn load_batch(cli: &Cli, log_config: &LogConfig) -> Result<Batch> {
    let paths = expand_globs(&cli.paths).context("Failed to resolve input paths")?;

    let mut batch = Batch::new();
    for path in &paths {
        let source = source_for_path(path, cli.format)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let loaded = source
            .load()
            .with_context(|| format!("Failed to read {}", path.display()))?;
        log_data_op!(
            log_config,
            source = %source.description(),
            entries = loaded.len(),
            malformed = loaded.malformed_count(),
            "Read input file"
        );
        batch.extend(loaded);
    }
    Ok(batch)
}

/// Runs one validation over every input and renders the report.
///
/// Errors are reserved for problems that prevent validation: unreadable
/// files, unknown formats or a bad catalog. Invalid data yields a failing
/// report instead.
pub fn run(cli: &Cli) -> Result<RunOutput> {
    let log_config = cli.log_config();
    let catalog = load_catalog(cli)?;
    let batch = load_batch(cli, &log_config)?;

    let mut validator = Validator::new(cli.paths.join(", "), catalog)
        .with_log_config(log_config)
        .with_merged_sources(cli.merge_batches);
    if cli.parallel {
        validator.validate_batch_parallel(&batch);
    } else {
        validator.validate_batch(&batch);
    }
    let report = validator.finish();

    let config = cli.formatter_config();
    let rendered = match cli.output {
        OutputFormat::Human => HumanFormatter::with_config(config).format(&report),
        OutputFormat::Json => JsonFormatter::with_config(config).format(&report),
        OutputFormat::Markdown => MarkdownFormatter::with_config(config).format(&report),
    }
    .context("Failed to render report")?;

    Ok(RunOutput { report, rendered })
}
