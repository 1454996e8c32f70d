//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, engine construction and output
//! formatting.

use crate::error::CliError;
use kiln::config::ConfigBuilder;
use kiln::{Config, Engine, FilePath};
use std::env;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the site root directory.
    pub root: Option<PathBuf>,

    /// Directory configuration discovery starts from.
    pub config_dir: Option<PathBuf>,
}

/// The directory configuration files are discovered from and relative
/// paths resolve against: `--config-dir` if given, else the CWD.
pub fn working_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    let dir = match &global.config_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => env::current_dir()?.join(dir),
        None => env::current_dir()?,
    };
    Ok(dir)
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_working_dir(&working_dir(global)?);

    if let Some(root) = &global.root {
        let root = root.to_str().ok_or_else(|| {
            CliError::InvalidArguments(format!("Root path is not UTF-8: {}", root.display()))
        })?;
        builder = builder.with_config(Config {
            root_path: Some(root.to_string()),
            ..Config::default()
        });
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Load configuration and build a local-disk engine from it.
pub fn build_engine(global: &GlobalOptions) -> Result<Engine, CliError> {
    let config = load_configuration(global)?;
    let engine = Engine::from_config(&config, &working_dir(global)?)?;
    log::debug!(
        "Site root {}, output {}",
        engine.file_system().root_path(),
        engine.file_system().output_path()
    );
    Ok(engine)
}

/// Parse a path argument.
pub fn parse_file_path(raw: &str) -> Result<FilePath, CliError> {
    FilePath::new(raw).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// The path of `file` relative to the input path containing it, or its file
/// name when no input path does.
pub fn input_relative(engine: &Engine, file: &FilePath) -> Result<FilePath, CliError> {
    let relative = match engine.file_system().get_containing_input_path(file)? {
        Some(root) => root.relative_file(file)?,
        None => file.file_name_path(),
    };
    Ok(relative)
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &str) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = Path::new(path).strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.to_string()
}
