//! Prompt assembly for review generation.
//!
//! The style-reference examples are configuration data, not logic: they are
//! loaded from `style-examples.json` in the data directory at startup, with
//! a compiled-in copy as the fallback, so the corpus can be swapped without
//! touching code.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::generation::profiles::GenerationProfile;

/// Ordered model candidates for the fallback loop. Tried in order until one
/// succeeds; separate identifiers have separate provider quotas.
pub const MODELS_TO_TRY: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-2.5-flash",
];

/// Generic phrases the model is told to avoid. These read as AI filler and
/// sink the authenticity the whole feature exists for.
pub const BANNED_PHRASES: &[&str] = &[
    "seamless",
    "unforgettable",
    "top-notch",
    "hidden gem",
    "exceeded my expectations",
    "highly recommend", // as a closing formula; the model may still recommend
    "second to none",
];

const STYLE_EXAMPLES_FILE: &str = "style-examples.json";
const DEFAULT_STYLE_EXAMPLES: &str = include_str!("../../data/style-examples.json");

/// Authentic-tone reference reviews included in every prompt as a style
/// anchor (never to be copied verbatim).
#[derive(Debug, Clone, Deserialize)]
pub struct StyleCorpus {
    pub examples: Vec<String>,
}

impl StyleCorpus {
    /// Loads the corpus from the data directory, falling back to the
    /// compiled-in default when the file is missing or malformed.
    pub fn load(data_dir: impl AsRef<Path>) -> Self {
        let path = data_dir.as_ref().join(STYLE_EXAMPLES_FILE);
        if let Ok(bytes) = std::fs::read(&path) {
            match serde_json::from_slice::<StyleCorpus>(&bytes) {
                Ok(corpus) if !corpus.examples.is_empty() => return corpus,
                Ok(_) => warn!("{} contained no examples, using built-in corpus", path.display()),
                Err(e) => warn!("Failed to parse {}: {e}, using built-in corpus", path.display()),
            }
        }
        serde_json::from_str(DEFAULT_STYLE_EXAMPLES)
            .expect("built-in style corpus must parse")
    }
}

/// Free-text context about the client, straight from the stored record.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    pub client_name: String,
    pub description: Option<String>,
    pub services: Option<String>,
    pub destination: Option<String>,
}

/// Assembles the full instruction block for one generation call.
pub fn build_prompt(
    ctx: &GenerationContext,
    profile: &GenerationProfile,
    topic_focus: &str,
    opening_hook: &str,
    corpus: &StyleCorpus,
) -> String {
    let mut context = String::new();
    if let Some(description) = non_empty(&ctx.description) {
        context.push_str(&format!("Business description: \"{description}\". "));
    }
    if let Some(services) = non_empty(&ctx.services) {
        context.push_str(&format!("Services: \"{services}\". "));
    }
    if let Some(destination) = non_empty(&ctx.destination) {
        context.push_str(&format!("Locations / destinations: \"{destination}\". "));
    }
    if context.is_empty() {
        context.push_str("(no extra context provided)");
    }

    let examples = corpus
        .examples
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n");

    let banned = BANNED_PHRASES.join("\", \"");

    format!(
        "Task: Write a 5-star Google review for \"{name}\".\n\
         \n\
         Context: {context}\n\
         \n\
         Length: {length}\n\
         Focus: {focus}\n\
         Opening: {hook}\n\
         Naming: {naming}\n\
         \n\
         Style reference (match the voice, do NOT copy any of these):\n\
         {examples}\n\
         \n\
         CRITICAL OUTPUT RULES:\n\
         1. Output ONLY the review text. No preamble like \"Here is a review\". No title line.\n\
         2. No hashtags, no emoji, no quotation marks around the text.\n\
         3. Never use these phrases: \"{banned}\".\n\
         4. Tone: natural, conversational, specific. Mention concrete details, not superlatives.",
        name = ctx.client_name,
        context = context,
        length = profile.length_target,
        focus = topic_focus,
        hook = opening_hook,
        naming = profile.naming.instruction(),
        examples = examples,
        banned = banned,
    )
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
