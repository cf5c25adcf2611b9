/*!
 * Startup failures of the panelwise binary.
 *
 * A run that cannot start must exit non-zero without creating any project
 * folder.
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use crate::common;

// Run the binary inside `dir` with no credential in the environment
fn run_panelwise(dir: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_panelwise"))
        .args(args)
        .current_dir(dir)
        .env_remove("GOOGLE_API_KEY")
        .output()?;
    Ok(output)
}

fn entry_count(dir: &Path) -> Result<usize> {
    Ok(fs::read_dir(dir)?.count())
}

#[test]
fn test_missingCredential_shouldExitBeforeCreatingProject() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let projects_dir = temp_dir.path().to_string_lossy().to_string();

    let output = run_panelwise(temp_dir.path(), &["chapter_01", "--projects-dir", &projects_dir])?;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("GOOGLE_API_KEY"));
    assert!(!temp_dir.path().join("chapter_01").exists());
    assert_eq!(entry_count(temp_dir.path())?, 0);
    Ok(())
}

#[test]
fn test_blankCredential_shouldExitBeforeCreatingProject() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let projects_dir = temp_dir.path().to_string_lossy().to_string();

    let output = Command::new(env!("CARGO_BIN_EXE_panelwise"))
        .args(["chapter_01", "--projects-dir", &projects_dir])
        .current_dir(temp_dir.path())
        .env("GOOGLE_API_KEY", "   ")
        .output()?;

    assert!(!output.status.success());
    assert!(!temp_dir.path().join("chapter_01").exists());
    Ok(())
}

#[test]
fn test_missingProjectArgument_shouldFailWithUsageError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let output = run_panelwise(temp_dir.path(), &[])?;

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(entry_count(temp_dir.path())?, 0);
    Ok(())
}
