//! Integration tests for the kiln subcommands against an on-disk site.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

fn blog() -> TestEnv {
    TestEnv::new()
        .with_file("input/index.md", "# Home")
        .with_file("input/posts/first.md", "first")
        .with_file("input/posts/draft.md", "draft")
        .with_file("input/style.css", "site css")
        .with_file("theme/style.css", "theme css")
        .with_file("theme/layout.html", "<html>")
        .with_file("kiln.yaml", "input_paths: [input, theme]\n")
}

// ============================================================================
// files
// ============================================================================

#[test]
fn test_files_json_lists_matches_in_priority_order() {
    let env = blog();
    let stdout = env.stdout(&["files", "--format", "json", "*.css", "*.html"]);
    let entries: Vec<serde_json::Value> = serde_json::from_str(&stdout).unwrap();

    let paths: Vec<&str> = entries.iter().map(|e| e["path"].as_str().unwrap()).collect();
    assert_eq!(
        paths,
        vec![
            env.path("input/style.css").to_str().unwrap(),
            env.path("theme/style.css").to_str().unwrap(),
            env.path("theme/layout.html").to_str().unwrap(),
        ]
    );
    assert_eq!(entries[0]["relative_path"], "style.css");
    assert_eq!(entries[0]["size"], 8);
}

#[test]
fn test_files_exclusion() {
    let env = blog();
    let stdout = env.stdout(&["files", "--format", "csv", "posts/*.md", "!posts/draft.md"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "path,relative_path,size");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with("posts/first.md,posts/first.md,5"));
}

#[test]
fn test_files_table_header() {
    let env = blog();
    env.command()
        .args(["files", "--show-full-paths", "**/*.md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("PATH\tRELATIVE_PATH\tSIZE"))
        .stderr(predicate::str::contains("3 file(s)"));
}

#[test]
fn test_files_invalid_pattern() {
    let env = blog();
    env.command()
        .args(["files", "a[.md"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// resolve
// ============================================================================

#[test]
fn test_resolve_finds_later_input_path() {
    let env = blog();
    let stdout = env.stdout(&["resolve", "layout.html"]);
    assert_eq!(stdout.trim(), env.path("theme/layout.html").to_str().unwrap());
}

#[test]
fn test_resolve_missing_falls_back_to_first_input() {
    let env = blog();
    env.command()
        .args(["resolve", "new/page.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            env.path("input/new/page.md").to_str().unwrap(),
        ))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_resolve_require_fails_for_missing() {
    let env = blog();
    env.command()
        .args(["resolve", "--require", "missing.md"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_resolve_output() {
    let env = blog();
    let stdout = env.stdout(&["resolve", "--output", "posts/first.html"]);
    assert_eq!(stdout.trim(), env.path("output/posts/first.html").to_str().unwrap());
}

#[test]
fn test_resolve_containing_input_path() {
    let env = blog();
    let file = env.path("theme/layout.html");
    let stdout = env.stdout(&["resolve", "--containing", file.to_str().unwrap()]);
    assert_eq!(stdout.trim(), env.path("theme").to_str().unwrap());

    env.command()
        .args(["resolve", "--containing", "/nowhere/x.md"])
        .assert()
        .failure()
        .code(1);
}

// ============================================================================
// build
// ============================================================================

#[test]
fn test_build_writes_inputs_to_output() {
    let env = blog();
    env.command()
        .args(["build", "**/*.md", "layout.html"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote 4 file(s)"));

    assert_eq!(fs::read_to_string(env.path("output/index.md")).unwrap(), "# Home");
    assert_eq!(fs::read_to_string(env.path("output/posts/first.md")).unwrap(), "first");
    assert_eq!(fs::read_to_string(env.path("output/layout.html")).unwrap(), "<html>");
}

#[test]
fn test_build_clean_removes_stale_output() {
    let env = blog().with_file("output/stale.txt", "old");
    env.command().args(["build", "--clean", "index.md"]).assert().success();

    assert!(!env.path("output/stale.txt").exists());
    assert!(env.path("output/index.md").exists());
}

// ============================================================================
// copy
// ============================================================================

#[test]
fn test_copy_dry_run() {
    let env = blog();
    env.command()
        .args(["copy", "--dry-run", "*.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("layout.html ->"))
        .stderr(predicate::str::contains("[DRY RUN] Would copy 1 file(s)"));

    assert!(!env.path("output/layout.html").exists());
}

#[test]
fn test_copy_quiet_prints_count() {
    let env = blog();
    env.command()
        .args(["--quiet", "copy", "*.css", "*.html"])
        .assert()
        .success()
        .stdout("2\n");

    assert_eq!(fs::read_to_string(env.path("output/style.css")).unwrap(), "site css");
    assert_eq!(fs::read_to_string(env.path("output/layout.html")).unwrap(), "<html>");
}

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_show_config_merges_local_file() {
    let env = blog().with_file("kiln.local.yaml", "output_path: preview\n");
    let stdout = env.stdout(&["show-config"]);
    let config: serde_json::Value = serde_yaml::from_str(&stdout).unwrap();
    assert_eq!(config["output_path"], "preview");
    assert_eq!(config["input_paths"][1], "theme");
}

#[test]
fn test_env_override_reaches_engine() {
    let env = blog();
    let stdout = env
        .command()
        .env("KILN_OUTPUT_PATH", "dist")
        .args(["resolve", "--output", "a.html"])
        .output()
        .unwrap()
        .stdout;
    let stdout = String::from_utf8(stdout).unwrap();
    assert_eq!(stdout.trim(), env.path("dist/a.html").to_str().unwrap());
}

#[test]
fn test_root_flag_overrides_config() {
    let env = blog().with_file("other/input/only.md", "x");
    let other = env.path("other");
    env.command()
        .args(["--root", other.to_str().unwrap(), "resolve", "--require", "only.md"])
        .env("KILN_INPUT_PATHS", "input")
        .assert()
        .success();
}

#[test]
fn test_validate_file() {
    let env = blog().with_file("broken.yaml", "input_paths: []\n");
    env.command().args(["validate", "kiln.yaml"]).assert().success();
    env.command()
        .args(["validate", "broken.yaml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("input_paths"));
}

#[test]
fn test_validate_missing_file() {
    let env = blog();
    env.command()
        .args(["validate", "nope.yaml"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_invalid_config_exit_code() {
    let env = TestEnv::new().with_file("kiln.yaml", "bogus_field: 1\n");
    env.command()
        .args(["resolve", "a.md"])
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));
}
