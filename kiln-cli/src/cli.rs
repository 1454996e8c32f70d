//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    BuildCommand, CompletionsCommand, CopyCommand, FilesCommand, ResolveCommand,
    ShowConfigCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resolve site inputs and run read, write and copy passes.
#[derive(Parser)]
#[command(name = "kiln")]
#[command(version, about = "Resolve site inputs and build output with kiln", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the site root directory
    #[arg(long, value_name = "PATH", global = true)]
    pub root: Option<PathBuf>,

    /// Directory to start configuration discovery from (defaults to CWD)
    #[arg(long, value_name = "PATH", global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// List input files matching glob patterns
    Files(FilesCommand),

    /// Resolve a relative path against the input or output directory
    Resolve(ResolveCommand),

    /// Read input files and write them to the output directory
    Build(BuildCommand),

    /// Copy input files to the output directory without reading them
    Copy(CopyCommand),

    /// Validate a configuration file or the merged configuration
    Validate(ValidateCommand),

    /// Print the merged configuration as YAML
    ShowConfig(ShowConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
