/*!
 * Common test utilities for the panelwise test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use panelwise::ProjectContext;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Resolves a project under `projects_dir` and drops fake page images into it
pub fn create_project(projects_dir: &Path, name: &str, images: &[&str]) -> Result<ProjectContext> {
    let project = ProjectContext::resolve(projects_dir, name)?;
    for image in images {
        fs::write(project.input_dir().join(image), [0x89, b'P', b'N', b'G'])?;
    }
    Ok(project)
}

/// Sorted file names in a directory
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Path of a per-page output file
pub fn page_output(project: &ProjectContext, stem: &str) -> PathBuf {
    project.output_dir().join(format!("{}.txt", stem))
}
