use crate::coordinator::RunSummary;
use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Output formats for the run summary.
#[derive(Debug, Clone)]
pub enum OutputFormat {
    /// A simple, human-readable text format.
    Text,
    /// JSON format, suitable for machine processing.
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Renders a [`RunSummary`] for humans or machines.
pub struct SummaryFormatter {
    format: OutputFormat,
    verbose: bool,
    dry_run: bool,
    tool_name: String,
    tool_version: String,
}

impl SummaryFormatter {
    pub fn new(format: OutputFormat, verbose: bool, dry_run: bool) -> Self {
        Self {
            format,
            verbose,
            dry_run,
            tool_name: "stringle".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Writes the formatted summary to a given writer.
    pub fn write_summary<W: Write>(&self, writer: &mut W, summary: &RunSummary) -> Result<()> {
        let output = match self.format {
            OutputFormat::Text => self.format_text(summary),
            OutputFormat::Json => self.format_json(summary)?,
        };

        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    /// Dry runs report the same numbers with "Would" wording, so a preview
    /// reads unambiguously as a preview.
    fn format_text(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        if self.dry_run {
            output.push_str(&format!(
                "Would process {} files\n",
                summary.files_processed
            ));
            output.push_str(&format!("Would modify {} files\n", summary.files_modified));
            output.push_str(&format!(
                "Would make {} replacements\n",
                summary.total_replacements
            ));
        } else {
            output.push_str(&format!("Processed {} files\n", summary.files_processed));
            output.push_str(&format!("Modified {} files\n", summary.files_modified));
            output.push_str(&format!(
                "Made {} replacements\n",
                summary.total_replacements
            ));
        }

        if self.verbose && !summary.modified_files.is_empty() {
            output.push_str("\nModified files:\n");
            for path in &summary.modified_files {
                output.push_str(&format!("  - {}\n", path.display()));
            }
        }

        if !summary.errors.is_empty() {
            output.push_str("\nErrors:\n");
            for error in &summary.errors {
                output.push_str(&format!("  - {}: {}\n", error.path.display(), error.message));
            }
        }

        output
    }

    fn format_json(&self, summary: &RunSummary) -> Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            tool: ToolInfo<'a>,
            run_time: DateTime<Utc>,
            dry_run: bool,
            #[serde(flatten)]
            summary: &'a RunSummary,
        }

        #[derive(Serialize)]
        struct ToolInfo<'a> {
            name: &'a str,
            version: &'a str,
        }

        let report = JsonReport {
            tool: ToolInfo {
                name: &self.tool_name,
                version: &self.tool_version,
            },
            run_time: Utc::now(),
            dry_run: self.dry_run,
            summary,
        };

        Ok(serde_json::to_string_pretty(&report)?)
    }
}
