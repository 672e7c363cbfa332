//! Integration tests for the CLI.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(temp: &TempDir, content: &str) -> PathBuf {
    let path = temp.path().join(".pre-commit-config.yaml");
    fs::write(&path, content).unwrap();
    path
}

fn frostline() -> Command {
    Command::new(cargo_bin("frostline"))
}

const FULL: &str = "2f035c421f1746ab2f48758db06fa32b5b9324f2";

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = frostline();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("revision pins"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = frostline();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = frostline();
    cmd.arg("invalid-command");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_check_requires_files() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = frostline();
    cmd.arg("check");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
    Ok(())
}

#[test]
fn cli_check_clean_config_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(
        &temp,
        "repos:\n  - repo: https://github.com/psf/black\n    rev: v24.4.2\n",
    );

    let mut cmd = frostline();
    cmd.arg("check").arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
    Ok(())
}

#[test]
fn cli_check_findings_exit_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(
        &temp,
        "repos:\n  - repo: https://github.com/psf/black\n    rev: main\n",
    );

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "f"]).arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("FIXABLE[f]"))
        .stdout(predicate::str::contains("Unfrozen revision: main"))
        .stdout(predicate::str::contains("Found 1 issue(s)"));
    Ok(())
}

#[test]
fn cli_check_missing_annotation_positions_are_one_based() -> Result<(), Box<dyn std::error::Error>>
{
    let temp = TempDir::new()?;
    let content = format!("repos:\n  - repo: https://github.com/psf/black\n    rev: {FULL}\n");
    let path = write_config(&temp, &content);

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "m"]).arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(":3:10 "));
    Ok(())
}

#[test]
fn cli_check_exclusive_rules_exit_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(&temp, "repos: []\n");

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "fu"]).arg(&path);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Mutually exclusive rules `fu`"));
    Ok(())
}

#[test]
fn cli_check_unknown_rule_code_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(&temp, "repos: []\n");

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "z"]).arg(&path);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown rule code `z`"));
    Ok(())
}

#[test]
fn cli_check_rules_conflicts_with_all_rules() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(&temp, "repos: []\n");

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "f", "--all-rules"]).arg(&path);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
    Ok(())
}

#[test]
fn cli_check_unknown_format_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(&temp, "repos: []\n");

    let mut cmd = frostline();
    cmd.args(["check", "--format", "xml"]).arg(&path);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown format `xml`"));
    Ok(())
}

#[test]
fn cli_check_missing_file_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = frostline();
    cmd.args(["check", "/no/such/config.yaml"]);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to read"));
    Ok(())
}

#[test]
fn cli_check_malformed_yaml_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(&temp, "repos: [\n");

    let mut cmd = frostline();
    cmd.arg("check").arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse"));
    Ok(())
}

#[test]
fn cli_check_excess_fix_rewrites_in_place() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(
        &temp,
        "repos:\n  - repo: https://github.com/psf/black\n    rev: main  # frozen: 24.4.2\n",
    );

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "e", "--fix", "e"]).arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("FIXED[e]"));

    assert_eq!(
        fs::read_to_string(&path)?,
        "repos:\n  - repo: https://github.com/psf/black\n    rev: main\n"
    );
    Ok(())
}

#[test]
fn cli_check_print_leaves_the_file_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let content =
        "repos:\n  - repo: https://github.com/psf/black\n    rev: main  # frozen: 24.4.2\n";
    let path = write_config(&temp, content);

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "e", "--fix", "e", "--print"])
        .arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("    rev: main\n"));

    assert_eq!(fs::read_to_string(&path)?, content);
    Ok(())
}

#[test]
fn cli_check_quiet_suppresses_findings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(
        &temp,
        "repos:\n  - repo: https://github.com/psf/black\n    rev: main\n",
    );

    let mut cmd = frostline();
    cmd.args(["--quiet", "check", "--rules", "f"]).arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_check_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(
        &temp,
        "repos:\n  - repo: https://github.com/psf/black\n    rev: main\n",
    );

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "f", "--format", "json"])
        .arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"rule\": \"force-freeze\""))
        .stdout(predicate::str::contains("\"status\": \"FIXABLE\""));
    Ok(())
}

#[test]
fn cli_check_sarif_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(
        &temp,
        "repos:\n  - repo: https://github.com/psf/black\n    rev: main\n",
    );

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "f", "--format", "sarif"])
        .arg(&path);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"version\": \"2.1.0\""))
        .stdout(predicate::str::contains("\"name\": \"frostline\""));
    Ok(())
}

#[test]
fn cli_check_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = write_config(&temp, "repos: []\n");

    let mut cmd = frostline();
    cmd.args(["--debug", "check"]).arg(&path);
    cmd.assert().success();
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = frostline();
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("frostline"));
    Ok(())
}

// --- End-to-end fixes against a local remote ---

fn git_in(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Bare repo with one commit tagged `v1.0.0`. Returns the bare path and
/// the commit hash.
fn seed_remote(parent: &Path) -> (PathBuf, String) {
    let bare = parent.join("upstream.git");
    let work = parent.join("work");

    git_in(parent, &["init", "--bare", "--initial-branch=main", "upstream.git"]);
    // Allow fetching arbitrary commits, the way hosting providers do
    git_in(&bare, &["config", "uploadpack.allowAnySHA1InWant", "true"]);
    git_in(parent, &["clone", "upstream.git", "work"]);
    git_in(&work, &["config", "user.name", "Test"]);
    git_in(&work, &["config", "user.email", "test@test.com"]);

    fs::write(
        work.join(".pre-commit-hooks.yaml"),
        "- id: sample\n  name: sample\n  entry: sample\n  language: system\n",
    )
    .unwrap();
    git_in(&work, &["add", "."]);
    git_in(&work, &["commit", "-m", "Initial commit"]);
    git_in(&work, &["tag", "v1.0.0"]);
    git_in(&work, &["push", "origin", "HEAD:main", "v1.0.0"]);

    let commit = git_in(&bare, &["rev-parse", "main"]);
    (bare, commit)
}

#[test]
fn cli_check_freeze_fix_pins_a_tag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let (bare, commit) = seed_remote(temp.path());
    let path = write_config(
        &temp,
        &format!("repos:\n  - repo: {}\n    rev: v1.0.0\n", bare.display()),
    );

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "f", "--fix", "f"]).arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("FIXED[f]"));

    assert_eq!(
        fs::read_to_string(&path)?,
        format!(
            "repos:\n  - repo: {}\n    rev: {}  # frozen: v1.0.0\n",
            bare.display(),
            commit
        )
    );
    Ok(())
}

#[test]
fn cli_check_unfreeze_fix_restores_the_tag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let (bare, commit) = seed_remote(temp.path());
    let path = write_config(
        &temp,
        &format!(
            "repos:\n  - repo: {}\n    rev: {}  # frozen: v1.0.0\n",
            bare.display(),
            commit
        ),
    );

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "ue", "--fix", "ue"]).arg(&path);
    cmd.assert().success();

    assert_eq!(
        fs::read_to_string(&path)?,
        format!("repos:\n  - repo: {}\n    rev: v1.0.0\n", bare.display())
    );
    Ok(())
}

#[test]
fn cli_check_stale_annotation_is_rewritten() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let (bare, commit) = seed_remote(temp.path());
    let path = write_config(
        &temp,
        &format!(
            "repos:\n  - repo: {}\n    rev: {}  # frozen: v0.9.0\n",
            bare.display(),
            commit
        ),
    );

    let mut cmd = frostline();
    cmd.args(["check", "--rules", "t", "--fix", "t"]).arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("FIXED[t]"));

    assert_eq!(
        fs::read_to_string(&path)?,
        format!(
            "repos:\n  - repo: {}\n    rev: {}  # frozen: v1.0.0\n",
            bare.display(),
            commit
        )
    );
    Ok(())
}
