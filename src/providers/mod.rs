/*!
 * Provider implementations for the generation API.
 *
 * This module contains the seam between the translation pipeline and the
 * external multimodal model:
 * - `gemini`: Google Generative Language API client
 * - `mock`: scripted provider used by the test suite
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProviderError;

/// Common trait for generation providers
///
/// The pipeline only ever issues two request shapes: prompt plus one page
/// image, and prompt alone. Both come back as raw text.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The prompt and optional page image
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The model's raw text or an error
    async fn complete(&self, request: GenerationRequest) -> Result<String, ProviderError>;

    /// Short human-readable provider name for log lines
    fn name(&self) -> &str;
}

/// One request to the generation API
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Prompt text
    pub prompt: String,
    /// Page image attached to the prompt, if any
    pub image: Option<PageImage>,
}

impl GenerationRequest {
    /// Text-only request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    /// Prompt plus one image
    pub fn with_image(prompt: impl Into<String>, image: PageImage) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
        }
    }
}

/// Raw bytes of one page image, ready to attach to a request
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    /// File name, used for log lines and separators
    pub file_name: String,
    /// MIME type derived from the extension
    pub mime_type: String,
    /// Encoded image bytes as stored on disk
    pub data: Vec<u8>,
}

impl PageImage {
    /// Read an image file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read image: {:?}", path))?;

        Ok(Self {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            mime_type: mime_type_for(path).to_string(),
            data,
        })
    }
}

/// MIME type for an image path, judged by extension only.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "application/octet-stream",
    }
}

pub mod gemini;
pub mod mock;
