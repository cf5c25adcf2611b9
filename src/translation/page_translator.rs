use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::glossary::Glossary;
use crate::providers::{GenerationRequest, PageImage, Provider};
use crate::translation::prompts::PagePromptBuilder;

// @module: Single page translation

/// Translates one page image at a time.
///
/// Failures are not retried or absorbed here; they end the batch.
#[derive(Debug)]
pub struct PageTranslator<'a, P: Provider> {
    provider: &'a P,
}

impl<'a, P: Provider> PageTranslator<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Load an image from disk and translate it.
    pub async fn translate_file(
        &self,
        image_path: &Path,
        glossary: &Glossary,
        previous_page: Option<&str>,
    ) -> Result<String> {
        let image = PageImage::load(image_path)?;
        self.translate(image, glossary, previous_page).await
    }

    /// Translate a loaded page image, returning the model's raw text.
    pub async fn translate(
        &self,
        image: PageImage,
        glossary: &Glossary,
        previous_page: Option<&str>,
    ) -> Result<String> {
        info!("Translating page {} ...", image.file_name);

        let prompt = PagePromptBuilder::new(glossary)
            .with_previous_page(previous_page)
            .build();
        debug!(
            "Page prompt: {} chars, {} glossary terms, context: {}",
            prompt.chars().count(),
            glossary.len(),
            previous_page.is_some()
        );

        let file_name = image.file_name.clone();
        self.provider
            .complete(GenerationRequest::with_image(prompt, image))
            .await
            .with_context(|| format!("Translation of page {} failed ({})", file_name, self.provider.name()))
    }
}
