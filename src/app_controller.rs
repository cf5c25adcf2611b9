use anyhow::{Context, Result};
use futures::stream::{self, TryStreamExt};
use log::info;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::glossary::{Glossary, GlossaryStore};
use crate::project::ProjectContext;
use crate::providers::Provider;
use crate::translation::{PageTranslator, TermExtractor};

// @module: Application controller for chapter translation

/// Separator appended after each page in the combined chapter file
pub fn page_separator(file_name: &str) -> String {
    format!("\n\n--- نهاية ترجمة صفحة: {} ---\n\n", file_name)
}

/// How a batch run ended
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The input folder held no images; nothing was written
    NoImages,
    /// Every page was translated and the chapter file written
    Completed {
        pages: usize,
        chapter_file: PathBuf,
    },
}

/// State threaded from one page to the next
#[derive(Debug)]
struct ChapterState {
    glossary: Glossary,
    previous_page: Option<String>,
    pages: Vec<String>,
}

impl ChapterState {
    fn new(glossary: Glossary) -> Self {
        Self {
            glossary,
            previous_page: None,
            pages: Vec::new(),
        }
    }

    fn chapter_text(&self) -> String {
        self.pages.join("\n")
    }
}

/// Main application controller: translates every page of one project in order
#[derive(Debug)]
pub struct Controller<'a, P: Provider> {
    // @field: Resolved project paths
    project: &'a ProjectContext,
    // @field: Generation provider shared by both request kinds
    provider: &'a P,
}

impl<'a, P: Provider> Controller<'a, P> {
    pub fn new(project: &'a ProjectContext, provider: &'a P) -> Self {
        Self { project, provider }
    }

    /// Run the whole batch.
    ///
    /// Pages are processed strictly one after another in file name order.
    /// A failed page translation stops the run; per-page files already
    /// written stay on disk and the chapter file is not written.
    pub async fn run(&self) -> Result<BatchOutcome> {
        let store = GlossaryStore::new(self.project.glossary_file());
        let glossary = store.load()?;
        info!(
            "Glossary for project '{}' loaded with {} term(s)",
            self.project.name(),
            glossary.len()
        );

        let images = FileManager::find_images(self.project.input_dir())?;
        if images.is_empty() {
            info!("No images found in {:?}", self.project.input_dir());
            return Ok(BatchOutcome::NoImages);
        }
        info!("Found {} image(s), starting translation with {}", images.len(), self.provider.name());

        let total = images.len();
        let store = &store;
        let state = stream::iter(images.iter().map(Ok::<_, anyhow::Error>))
            .try_fold(ChapterState::new(glossary), move |state, image| {
                self.process_page(state, image, store, total)
            })
            .await?;

        let chapter_file = self.project.chapter_output_path();
        FileManager::write_to_file(&chapter_file, &state.chapter_text())
            .context("Failed to write chapter file")?;
        info!("Combined chapter translation saved to {:?}", chapter_file);
        info!("All {} page(s) translated successfully", state.pages.len());

        Ok(BatchOutcome::Completed {
            pages: state.pages.len(),
            chapter_file,
        })
    }

    async fn process_page(
        &self,
        mut state: ChapterState,
        image: &Path,
        store: &GlossaryStore,
        total: usize,
    ) -> Result<ChapterState> {
        let file_name = image
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        info!("--- Page {}/{}: {} ---", state.pages.len() + 1, total, file_name);

        let translation = PageTranslator::new(self.provider)
            .translate_file(image, &state.glossary, state.previous_page.as_deref())
            .await?;

        let output_path = self.project.page_output_path(image);
        FileManager::write_to_file(&output_path, &translation)?;
        info!("Page translation saved to {:?}", output_path);

        TermExtractor::new(self.provider)
            .extract_and_merge(&translation, &mut state.glossary, store)
            .await?;

        state.pages.push(format!("{}{}", translation, page_separator(&file_name)));
        state.previous_page = Some(translation);
        info!("Page context kept for the next page");

        Ok(state)
    }
}
