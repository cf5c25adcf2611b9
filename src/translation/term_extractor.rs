/*!
 * Glossary growth from translated pages.
 *
 * After each page the translated text is sent back to the model, which
 * proposes terms missing from the glossary. Proposals only ever add
 * entries; a term already in the glossary keeps its translation. Nothing
 * that goes wrong with this request stops the batch.
 */

use anyhow::Result;
use log::{debug, info, warn};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::errors::TermParseError;
use crate::glossary::{Glossary, GlossaryStore};
use crate::providers::{GenerationRequest, Provider};
use crate::translation::prompts::term_extraction_prompt;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:json)?").expect("code fence pattern is valid"));

/// Turn the model's reply into candidate terms.
///
/// Code fences are stripped first. Non-string values are skipped.
pub fn parse_term_response(raw: &str) -> Result<Glossary, TermParseError> {
    let cleaned = CODE_FENCE.replace_all(raw.trim(), "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(TermParseError::Empty);
    }

    let value: Value =
        serde_json::from_str(cleaned).map_err(|e| TermParseError::InvalidJson(e.to_string()))?;

    let object = match value {
        Value::Object(object) => object,
        Value::Array(_) => return Err(TermParseError::NotAnObject("an array")),
        Value::String(_) => return Err(TermParseError::NotAnObject("a string")),
        Value::Number(_) => return Err(TermParseError::NotAnObject("a number")),
        Value::Bool(_) => return Err(TermParseError::NotAnObject("a boolean")),
        Value::Null => return Err(TermParseError::NotAnObject("null")),
    };

    let mut candidates = Glossary::new();
    for (term, translation) in &object {
        match translation.as_str() {
            Some(translation) if !term.trim().is_empty() => {
                candidates.insert_if_absent(term, translation);
            }
            _ => debug!("Skipping unusable term proposal {:?}: {}", term, translation),
        }
    }
    Ok(candidates)
}

/// Asks the model for new glossary terms and merges them.
#[derive(Debug)]
pub struct TermExtractor<'a, P: Provider> {
    provider: &'a P,
}

impl<'a, P: Provider> TermExtractor<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Ask the model for candidate terms found in `translated_text`.
    ///
    /// Any failure is logged and reported as no candidates.
    pub async fn propose(&self, translated_text: &str, glossary: &Glossary) -> Glossary {
        let prompt = term_extraction_prompt(glossary, translated_text);

        let raw = match self.provider.complete(GenerationRequest::text(prompt)).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Term extraction request failed, glossary unchanged: {}", e);
                return Glossary::new();
            }
        };

        match parse_term_response(&raw) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Could not parse new terms, glossary unchanged: {}", e);
                Glossary::new()
            }
        }
    }

    /// Propose, merge and persist new terms.
    ///
    /// Returns the number of terms added. The glossary file is rewritten only
    /// when that number is non-zero; a failing write is an error.
    pub async fn extract_and_merge(
        &self,
        translated_text: &str,
        glossary: &mut Glossary,
        store: &GlossaryStore,
    ) -> Result<usize> {
        info!("Looking for new glossary terms...");

        let candidates = self.propose(translated_text, glossary).await;
        let added = glossary.merge_new_terms(&candidates);

        if added > 0 {
            store.save(glossary)?;
            info!("Added {} new term(s) to the glossary ({} total)", added, glossary.len());
        } else {
            info!("No new terms found");
        }

        Ok(added)
    }
}
