//! Files command implementation.
//!
//! This module implements the `files` command, which evaluates glob
//! patterns against the virtual input directory and lists the matches in
//! various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{build_engine, input_relative, shorten_path, GlobalOptions};
use clap::{Args, ValueEnum};
use kiln::{Engine, ProviderFile};
use std::io::Write;

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 3] = ["path", "relative_path", "size"];

/// List input files matching glob patterns.
#[derive(Args)]
pub struct FilesCommand {
    /// Glob patterns; prefix with `!` to exclude
    #[arg(value_name = "PATTERN", required = true, allow_hyphen_values = true)]
    pub patterns: Vec<String>,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "KILN_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Show full paths instead of shortened forms
    #[arg(long)]
    pub show_full_paths: bool,
}

/// Output format for the files command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

/// One matched file, ready for display.
struct Row {
    path: String,
    relative: String,
    size: u64,
}

impl FilesCommand {
    /// Execute the files command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let engine = build_engine(global)?;
        let files = engine.file_system().get_input_files(&self.patterns)?;
        log::debug!("{} file(s) matched", files.len());

        let rows = files
            .iter()
            .map(|file| row(&engine, file))
            .collect::<Result<Vec<_>, _>>()?;

        match self.format {
            OutputFormat::Table => format_as_table(&rows, self.show_full_paths)?,
            OutputFormat::Json => format_as_json(&rows)?,
            OutputFormat::Csv => format_as_delimited(&rows, b',')?,
            OutputFormat::Tsv => format_as_delimited(&rows, b'\t')?,
        }

        if !global.quiet && matches!(self.format, OutputFormat::Table) {
            eprintln!("{} file(s)", rows.len());
        }
        Ok(())
    }
}

fn row(engine: &Engine, file: &ProviderFile) -> Result<Row, CliError> {
    Ok(Row {
        path: file.path().to_string(),
        relative: input_relative(engine, file.path())?.to_string(),
        size: file.length()?,
    })
}

/// Format files as a human-readable table.
fn format_as_table(rows: &[Row], show_full: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for row in rows {
        let path = if show_full {
            row.path.clone()
        } else {
            shorten_path(&row.path)
        };
        writeln!(handle, "{}\t{}\t{}", path, row.relative, row.size)?;
    }

    Ok(())
}

/// Format files as JSON.
fn format_as_json(rows: &[Row]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.path,
                "relative_path": r.relative,
                "size": r.size,
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format files as delimited output (CSV or TSV).
fn format_as_delimited(rows: &[Row], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for row in rows {
        let size = row.size.to_string();
        writer
            .write_record([row.path.as_str(), row.relative.as_str(), size.as_str()])
            .map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(())
}
