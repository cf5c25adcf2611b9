/*!
 * Persistent terminology glossary.
 *
 * The glossary maps a source term (character name, place, technique...) to
 * the translation every page must reuse. It lives in the project folder as a
 * pretty-printed JSON object and grows as new terms are discovered; terms
 * are never removed or overwritten.
 */

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

/// Term → translation mapping, kept in insertion order.
///
/// Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glossary {
    terms: Map<String, Value>,
}

impl Glossary {
    /// Create a new empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check whether a term is already known.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Translation recorded for a term.
    pub fn get(&self, term: &str) -> Option<String> {
        self.terms.get(term).map(value_text)
    }

    /// Add a term unless it is already present.
    ///
    /// Returns `true` when the glossary changed.
    pub fn insert_if_absent(&mut self, term: &str, translation: &str) -> bool {
        if self.terms.contains_key(term) {
            return false;
        }
        self.terms
            .insert(term.to_string(), Value::String(translation.to_string()));
        true
    }

    /// Add every absent term from `candidates`, returning how many were added.
    pub fn merge_new_terms(&mut self, candidates: &Glossary) -> usize {
        let mut added = 0;
        for (term, translation) in candidates.iter() {
            if self.insert_if_absent(term, &translation) {
                added += 1;
            }
        }
        added
    }

    /// Known terms, in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.keys().map(String::as_str)
    }

    /// `(term, translation)` pairs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.terms.iter().map(|(k, v)| (k.as_str(), value_text(v)))
    }

    /// Build a glossary from a parsed JSON object, as found on disk.
    pub fn from_json_object(terms: Map<String, Value>) -> Self {
        Self { terms }
    }

    /// Serialize as 4-space indented JSON with non-ASCII kept literal.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.terms
            .serialize(&mut serializer)
            .context("Failed to serialize glossary")?;
        String::from_utf8(buffer).context("Serialized glossary is not valid UTF-8")
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut glossary = Glossary::new();
        for (term, translation) in iter {
            glossary.insert_if_absent(term, translation);
        }
        glossary
    }
}

// Entries written by hand may hold non-string values; keep them readable.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads and writes the glossary file of one project.
#[derive(Debug, Clone)]
pub struct GlossaryStore {
    path: PathBuf,
}

impl GlossaryStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the glossary.
    ///
    /// A missing file is created holding `{}`. Unreadable or malformed content
    /// yields an empty glossary and the file is left exactly as it was.
    pub fn load(&self) -> Result<Glossary> {
        if !self.path.exists() {
            debug!("No glossary at {:?}, creating an empty one", self.path);
            FileManager::write_to_file(&self.path, "{}")?;
            return Ok(Glossary::new());
        }

        let content = match FileManager::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Glossary unreadable, starting empty: {:#}", e);
                return Ok(Glossary::new());
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(terms)) => Ok(Glossary::from_json_object(terms)),
            Ok(_) => {
                warn!("Glossary {:?} is not a JSON object, starting empty", self.path);
                Ok(Glossary::new())
            }
            Err(e) => {
                warn!("Glossary {:?} is not valid JSON ({}), starting empty", self.path, e);
                Ok(Glossary::new())
            }
        }
    }

    /// Overwrite the glossary file with the full mapping.
    pub fn save(&self, glossary: &Glossary) -> Result<()> {
        let json = glossary.to_pretty_json()?;
        FileManager::write_to_file(&self.path, &json)
            .with_context(|| format!("Failed to save glossary to {:?}", self.path))
    }
}
