/*!
 * Prompt templates for page translation and term discovery.
 *
 * The page prompt asks the model for three lines per speech bubble: the
 * source text, a literal translation and a literary Arabic translation.
 * The term prompt asks for a flat JSON object of terms not yet in the
 * glossary.
 */

use crate::glossary::Glossary;

/// Prefix the model puts in front of text found outside speech bubbles
pub const OUTSIDE_BUBBLE_MARKER: &str = "تنبيه: نص خارج فقاعة";

/// Builder for the per-page translation prompt.
#[derive(Debug, Clone)]
pub struct PagePromptBuilder<'a> {
    glossary: &'a Glossary,
    previous_page: Option<&'a str>,
}

impl<'a> PagePromptBuilder<'a> {
    /// The fixed part of the page prompt.
    pub const RULES: &'static str = r#"## Remaining rules
Do only what is asked below. Add no commentary or explanations, and use no formatting of any kind: no asterisks, no Markdown, no headings.

Extract the Korean or English text of every speech bubble separately. Never merge text from different bubbles, and never split one bubble.

For every bubble write exactly three lines, in this order:
Korean/English: the original text you extracted.
Literal translation: a complete word-for-word Arabic translation.
Literary Arabic translation: a rich, grammatically correct literary Arabic rendering with proper punctuation and the idioms an Arabic reader expects.

When the page holds several bubbles, keep the translations consistent with the scene. Translate speech bubbles only; do not translate sound effects.
If you find text outside the speech bubbles, translate it with the same three lines but start its first line with "{marker}".
Keep the output ordered for right-to-left reading and free of any special markup."#;

    /// Create a new prompt builder.
    pub fn new(glossary: &'a Glossary) -> Self {
        Self {
            glossary,
            previous_page: None,
        }
    }

    /// Set the previous page's full translation as narrative context.
    ///
    /// Empty text is treated as no context.
    pub fn with_previous_page(mut self, previous_page: Option<&'a str>) -> Self {
        self.previous_page = previous_page.filter(|p| !p.is_empty());
        self
    }

    /// Render the full prompt.
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("You are an expert professional manhwa translator. Look at the attached page image and do the following.\n\n");

        prompt.push_str("## Rule one: the glossary below is mandatory\n");
        prompt.push_str("Whenever one of these terms appears on the page, use exactly the translation given here.\n");
        prompt.push_str("--- GLOSSARY START ---\n");
        prompt.push_str(&glossary_lines(self.glossary));
        prompt.push_str("--- GLOSSARY END ---\n\n");

        if let Some(previous) = self.previous_page {
            prompt.push_str("## Rule two: mind the full context\n");
            prompt.push_str("This is the complete translation of the previous page. Use it only to understand the story and translate the current page correctly; do not translate it again.\n");
            prompt.push_str("--- PREVIOUS PAGE CONTEXT START ---\n");
            prompt.push_str(previous);
            if !previous.ends_with('\n') {
                prompt.push('\n');
            }
            prompt.push_str("--- PREVIOUS PAGE CONTEXT END ---\n\n");
        }

        prompt.push_str(&Self::RULES.replace("{marker}", OUTSIDE_BUBBLE_MARKER));
        prompt
    }
}

/// One `- term: translation` line per glossary entry, in glossary order.
pub fn glossary_lines(glossary: &Glossary) -> String {
    glossary
        .iter()
        .map(|(term, translation)| format!("- {}: {}\n", term, translation))
        .collect()
}

/// Build the term-discovery prompt for one translated page.
pub fn term_extraction_prompt(glossary: &Glossary, translated_text: &str) -> String {
    let known_terms = serde_json::to_string(&glossary.terms().collect::<Vec<_>>())
        .unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"You are an assistant specialised in text analysis. Read the text below.
Does it contain any character names, places or important terms that are not already in the known glossary?

Known glossary terms: {known_terms}

Text to analyse:
{translated_text}

Required: if you find new terms, return ONLY a flat JSON object mapping each term to its Arabic translation. If you find nothing, return {{}}.
Example: {{"New Term 1": "Translation 1", "New Term 2": "Translation 2"}}"#
    )
}
