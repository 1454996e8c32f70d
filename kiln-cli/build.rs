//! Build script for kiln-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("kiln")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve site inputs and build output with kiln")
        .long_about(
            "Command-line front end for the kiln engine: resolve paths across input \
             directories, evaluate globs, and read, write or copy files to the output directory",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Override the site root directory")
                .value_name("PATH")
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory to start configuration discovery from")
                .value_name("PATH")
                .global(true),
        )
        .subcommands(vec![
            Command::new("files")
                .about("List input files matching glob patterns")
                .long_about("Evaluate glob patterns against every input path and list the matches"),
            Command::new("resolve")
                .about("Resolve a relative path against the input or output directory")
                .long_about("Show which input path a relative file resolves to"),
            Command::new("build")
                .about("Read input files and write them to the output directory")
                .long_about("Read matching inputs into documents and write them to the output directory"),
            Command::new("copy")
                .about("Copy input files to the output directory without reading them")
                .long_about("Stream matching input files to the same relative path in the output directory"),
            Command::new("validate")
                .about("Validate a configuration file or the merged configuration")
                .long_about("Check a kiln configuration file for errors"),
            Command::new("show-config")
                .about("Print the merged configuration as YAML")
                .long_about("Merge defaults, kiln.yaml, kiln.local.yaml and KILN_* variables and print the result"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("kiln.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
