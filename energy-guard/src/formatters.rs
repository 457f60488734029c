//! Report rendering for validation runs.
//!
//! Three formatters are provided: a console report for people, JSON for
//! machines, and Markdown for pasting into tickets or documentation.
//!
//! # Examples
//!
//! ```rust
//! use energy_guard::core::ValidationReport;
//! use energy_guard::formatters::{HumanFormatter, ReportFormatter};
//!
//! let report = ValidationReport::new("empty_run");
//! let output = HumanFormatter::new().format(&report).unwrap();
//! assert!(output.contains("No errors found!"));
//! ```

use crate::core::{Finding, Outcome, ValidationReport};
use crate::prelude::*;
use serde::Serialize;
use std::fmt::Write;

const RULE: &str = "============================================================";

/// Configuration options for rendering a report.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Maximum number of findings listed per severity (`None` for all)
    pub max_findings: Option<usize>,
    /// Whether to use colorized output (human formatter only)
    pub use_colors: bool,
    /// Whether to include the run timestamp
    pub include_timestamps: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            max_findings: None,
            use_colors: false,
            include_timestamps: true,
        }
    }
}

impl FormatterConfig {
    /// Summary-friendly output: no timestamps, short lists.
    pub fn minimal() -> Self {
        Self {
            max_findings: Some(10),
            use_colors: false,
            include_timestamps: false,
        }
    }

    /// Creates a configuration suitable for CI/CD environments.
    pub fn ci() -> Self {
        Self {
            max_findings: Some(50),
            use_colors: false,
            include_timestamps: true,
        }
    }

    /// Sets the maximum number of findings listed per severity.
    pub fn with_max_findings(mut self, max: Option<usize>) -> Self {
        self.max_findings = max;
        self
    }

    /// Sets whether to use colorized output.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Sets whether to include the run timestamp.
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    fn limit<'a>(&self, findings: &'a [&'a Finding]) -> (&'a [&'a Finding], usize) {
        match self.max_findings {
            Some(max) if max < findings.len() => (&findings[..max], findings.len() - max),
            _ => (findings, 0),
        }
    }
}

/// Trait for rendering a validation report.
pub trait ReportFormatter {
    /// Renders a report with the formatter's own configuration.
    fn format(&self, report: &ValidationReport) -> Result<String>;

    /// Renders a report with an explicit configuration.
    fn format_with_config(
        &self,
        report: &ValidationReport,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(report)
    }
}

/// Renders a report for the console with default settings.
pub fn render(report: &ValidationReport) -> Result<String> {
    HumanFormatter::new().format(report)
}

fn fmt_error(e: std::fmt::Error) -> GuardError {
    GuardError::Internal(format!("Failed to render report: {e}"))
}

/// Console report: record count, numbered errors (or an explicit all-clear),
/// numbered warnings when there are any, and a verdict line.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn paint(&self, config: &FormatterConfig, code: &str, text: &str) -> String {
        if config.use_colors {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn write_report(
        &self,
        out: &mut String,
        report: &ValidationReport,
        config: &FormatterConfig,
    ) -> std::fmt::Result {
        writeln!(out, "{RULE}")?;
        writeln!(out, "DATA VALIDATION REPORT")?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Run: {}", report.name)?;
        if config.include_timestamps {
            writeln!(out, "Timestamp: {}", report.timestamp)?;
        }

        writeln!(out)?;
        writeln!(out, "Records checked: {}", report.records_checked)?;

        let errors = report.errors();
        writeln!(out)?;
        if errors.is_empty() {
            writeln!(out, "✅ No errors found!")?;
        } else {
            let title = format!("❌ ERRORS ({}):", errors.len());
            writeln!(out, "{}", self.paint(config, "31", &title))?;
            write_numbered(out, &errors, config)?;
        }

        let warnings = report.warnings();
        if !warnings.is_empty() {
            writeln!(out)?;
            let title = format!("⚠️  WARNINGS ({}):", warnings.len());
            writeln!(out, "{}", self.paint(config, "33", &title))?;
            write_numbered(out, &warnings, config)?;
        }

        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        let verdict = match report.outcome() {
            Outcome::Pass => self.paint(config, "32", "RESULT: ✅ PASSED - Data is AI-ready!"),
            Outcome::Fail => self.paint(config, "31", "RESULT: ❌ FAILED - Data is NOT AI-ready"),
        };
        writeln!(out, "{verdict}")
    }
}

fn write_numbered(
    out: &mut String,
    findings: &[&Finding],
    config: &FormatterConfig,
) -> std::fmt::Result {
    let (shown, hidden) = config.limit(findings);
    for (i, finding) in shown.iter().enumerate() {
        writeln!(out, "   {}. {finding}", i + 1)?;
    }
    if hidden > 0 {
        writeln!(out, "   ... and {hidden} more")?;
    }
    Ok(())
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &ValidationReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &ValidationReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        self.write_report(&mut output, report, config)
            .map_err(fmt_error)?;
        Ok(output)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a str>,
    outcome: Outcome,
    passed: bool,
    records_checked: usize,
    error_count: usize,
    warning_count: usize,
    errors: &'a [&'a Finding],
    warnings: &'a [&'a Finding],
}

/// Formats the report as structured JSON.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: true,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: true,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &ValidationReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let errors = report.errors();
        let warnings = report.warnings();
        let view = JsonReport {
            name: &report.name,
            timestamp: config
                .include_timestamps
                .then_some(report.timestamp.as_str()),
            outcome: report.outcome(),
            passed: report.passed(),
            records_checked: report.records_checked,
            error_count: errors.len(),
            warning_count: warnings.len(),
            errors: config.limit(&errors).0,
            warnings: config.limit(&warnings).0,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&view)
        } else {
            serde_json::to_string(&view)
        };
        rendered.map_err(|e| GuardError::Internal(format!("Failed to serialize report to JSON: {e}")))
    }
}

/// Formats the report as Markdown, headed at level 2 so it nests under a
/// ticket or document title.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    config: FormatterConfig,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn write_report(
        &self,
        out: &mut String,
        report: &ValidationReport,
        config: &FormatterConfig,
    ) -> std::fmt::Result {
        match report.outcome() {
            Outcome::Pass => writeln!(out, "## ✅ Data Validation Report - PASSED")?,
            Outcome::Fail => writeln!(out, "## ❌ Data Validation Report - FAILED")?,
        }
        writeln!(out)?;
        writeln!(out, "**Run:** {}", report.name)?;
        if config.include_timestamps {
            writeln!(out, "**Timestamp:** {}", report.timestamp)?;
        }

        writeln!(out)?;
        writeln!(out, "| Metric | Value |")?;
        writeln!(out, "|--------|-------|")?;
        writeln!(out, "| Records checked | {} |", report.records_checked)?;
        writeln!(out, "| Errors | {} |", report.error_count())?;
        writeln!(out, "| Warnings | {} |", report.warning_count())?;

        for (title, findings) in [("Errors", report.errors()), ("Warnings", report.warnings())] {
            if findings.is_empty() {
                continue;
            }
            writeln!(out)?;
            writeln!(out, "### {title}")?;
            writeln!(out)?;
            let (shown, hidden) = config.limit(&findings);
            for (i, finding) in shown.iter().enumerate() {
                writeln!(out, "{}. `{}` {}", i + 1, finding.location, finding.message)?;
            }
            if hidden > 0 {
                writeln!(out)?;
                writeln!(out, "> **Note:** {hidden} additional findings not shown.")?;
            }
        }
        Ok(())
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &ValidationReport) -> Result<String> {
        self.format_with_config(report, &self.config)
    }

    fn format_with_config(
        &self,
        report: &ValidationReport,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut output = String::new();
        self.write_report(&mut output, report, config)
            .map_err(fmt_error)?;
        Ok(output)
    }
}
