/*!
 * Page translation using a multimodal generation provider.
 *
 * - `prompts`: Prompt templates for page translation and term discovery
 * - `page_translator`: One page image in, raw translated text out
 * - `term_extractor`: New glossary terms from a translated page
 */

// Re-export main types for easier usage
pub use self::page_translator::PageTranslator;
pub use self::prompts::{PagePromptBuilder, OUTSIDE_BUBBLE_MARKER};
pub use self::term_extractor::{parse_term_response, TermExtractor};

// Submodules
pub mod page_translator;
pub mod prompts;
pub mod term_extractor;
