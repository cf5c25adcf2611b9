/*!
 * Project layout resolution.
 *
 * A project is a named folder under the projects root holding the source
 * images, the generated translations and the glossary:
 *
 * ```text
 * <projects_dir>/<name>/input_images/
 * <projects_dir>/<name>/output_translations/
 * <projects_dir>/<name>/glossary.json
 * ```
 */

use anyhow::{anyhow, Result};
use log::info;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

const INPUT_DIR_NAME: &str = "input_images";
const OUTPUT_DIR_NAME: &str = "output_translations";
const GLOSSARY_FILE_NAME: &str = "glossary.json";

/// File name of the combined chapter output
pub const CHAPTER_FILE_NAME: &str = "full_chapter_translation.txt";

/// Extension used for per-page translation files
pub const PAGE_OUTPUT_EXTENSION: &str = "txt";

/// Resolved, immutable locations for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    name: String,
    input_dir: PathBuf,
    output_dir: PathBuf,
    glossary_file: PathBuf,
}

impl ProjectContext {
    /// Derive the project paths and make sure both directories exist.
    ///
    /// Calling this repeatedly for the same project is harmless.
    pub fn resolve<P: AsRef<Path>>(projects_dir: P, name: &str) -> Result<Self> {
        let context = Self::derive(projects_dir, name)?;

        FileManager::ensure_dir(&context.input_dir)?;
        FileManager::ensure_dir(&context.output_dir)?;

        info!("Project '{}' resolved under {:?}", context.name, context.root());
        Ok(context)
    }

    /// Derive the project paths without touching the filesystem
    pub fn derive<P: AsRef<Path>>(projects_dir: P, name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(anyhow!("Project name must not be empty"));
        }

        let root = projects_dir.as_ref().join(name);
        Ok(Self {
            name: name.to_string(),
            input_dir: root.join(INPUT_DIR_NAME),
            output_dir: root.join(OUTPUT_DIR_NAME),
            glossary_file: root.join(GLOSSARY_FILE_NAME),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn glossary_file(&self) -> &Path {
        &self.glossary_file
    }

    /// Per-page output file for a source image
    pub fn page_output_path(&self, image: &Path) -> PathBuf {
        FileManager::generate_output_path(image, &self.output_dir, PAGE_OUTPUT_EXTENSION)
    }

    /// Combined output file for the whole run
    pub fn chapter_output_path(&self) -> PathBuf {
        self.output_dir.join(CHAPTER_FILE_NAME)
    }

    fn root(&self) -> &Path {
        self.input_dir.parent().unwrap_or(&self.input_dir)
    }
}
