//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `files`: List input files matching glob patterns
//! - `resolve`: Resolve a path against the input or output directory
//! - `build`: Read input files and write them to the output directory
//! - `copy`: Copy input files to the output directory
//! - `validate`: Validate configuration
//! - `show_config`: Print the merged configuration
//! - `completions`: Generate shell completion scripts

pub mod build;
pub mod completions;
pub mod copy;
pub mod files;
pub mod resolve;
pub mod show_config;
pub mod validate;

pub use build::BuildCommand;
pub use completions::CompletionsCommand;
pub use copy::CopyCommand;
pub use files::FilesCommand;
pub use resolve::ResolveCommand;
pub use show_config::ShowConfigCommand;
pub use validate::ValidateCommand;
