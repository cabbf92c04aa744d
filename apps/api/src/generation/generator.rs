//! Review Generator — produces one AI-written review for a client, or
//! nothing.
//!
//! Flow: pick profile (weighted random) → pick topic focus + opening hook →
//! build prompt → try each model in order → clean the winning output.
//!
//! The external contract is "a cleaned string or None", never an error:
//! callers treat `None` as "no AI text available" and fall back to the
//! client's stored reviews.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::generation::profiles::{pick_one, pick_profile};
use crate::generation::prompts::{build_prompt, GenerationContext, StyleCorpus, MODELS_TO_TRY};
use crate::provider::{ProviderError, TextProvider};

/// Pause between models after a transient failure, giving the provider a
/// moment before the next quota bucket is hit.
const TRANSIENT_RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct ReviewGenerator {
    /// `None` when no provider credential is configured; `generate` then
    /// short-circuits to `None` without touching the network.
    provider: Option<Arc<dyn TextProvider>>,
    corpus: StyleCorpus,
    retry_delay: Duration,
}

impl ReviewGenerator {
    pub fn new(provider: Option<Arc<dyn TextProvider>>, corpus: StyleCorpus) -> Self {
        Self {
            provider,
            corpus,
            retry_delay: TRANSIENT_RETRY_DELAY,
        }
    }

    #[cfg(test)]
    fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Generates one cleaned review, iterating the model list on transient
    /// or not-found failures. Every call may produce a different string for
    /// identical inputs; variety is the point.
    pub async fn generate(&self, ctx: &GenerationContext) -> Option<String> {
        let provider = match &self.provider {
            Some(p) => p,
            None => {
                debug!("No provider credential configured, skipping generation");
                return None;
            }
        };

        // Draw the stylistic knobs up front; ThreadRng must not live across
        // an await point.
        let prompt = {
            let mut rng = rand::thread_rng();
            let profile = pick_profile(&mut rng);
            let focus = pick_one(&mut rng, profile.topic_foci);
            let hook = pick_one(&mut rng, profile.opening_hooks);
            debug!(
                "Generating review for {} with profile {}",
                ctx.client_name, profile.name
            );
            build_prompt(ctx, profile, focus, hook, &self.corpus)
        };

        for model in MODELS_TO_TRY {
            match provider.generate_text(model, &prompt).await {
                Ok(raw) => {
                    let cleaned = clean_response(&raw);
                    if cleaned.is_empty() {
                        warn!("Model {model} returned only boilerplate, giving up");
                        return None;
                    }
                    info!("Generated review for {} via {model}", ctx.client_name);
                    return Some(cleaned);
                }
                Err(e) if e.is_transient() => {
                    warn!("Model {model} unavailable ({e}), trying next model");
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(ProviderError::NotFound) => {
                    warn!("Model {model} unknown to provider, trying next model");
                }
                Err(e) => {
                    error!("Provider call failed permanently on {model}: {e}");
                    return None;
                }
            }
        }

        error!("All provider models exhausted for {}", ctx.client_name);
        None
    }
}

/// Normalizes raw model output: strips wrapping quotes, "Here is…"-style
/// preambles, leading separator dashes, and accidental title/subject lines.
pub fn clean_response(raw: &str) -> String {
    let mut text = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\u{201C}' || c == '\u{201D}')
        .trim()
        .to_string();

    text = strip_preamble(&text);

    if let Some(rest) = text.strip_prefix("---") {
        text = rest.trim_start().to_string();
    }

    text = strip_title_line(&text);

    text.trim().to_string()
}

/// Removes a leading "Here is a review:" style phrase up to and including
/// its first colon.
fn strip_preamble(text: &str) -> String {
    const PREAMBLES: &[&str] = &["here is", "here's", "sure, here", "okay, here"];
    let lower = text.to_lowercase();
    if PREAMBLES.iter().any(|p| lower.starts_with(p)) {
        if let Some(colon) = text.find(':') {
            return text[colon + 1..].trim_start().to_string();
        }
    }
    text.to_string()
}

/// Drops a first line of the form "Title: …" or "Subject: …"; for a
/// "Review:" prefix with the body on the same line, only the label goes.
fn strip_title_line(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.starts_with("title:") || lower.starts_with("subject:") {
        match text.find('\n') {
            Some(newline) => return text[newline + 1..].trim_start().to_string(),
            None => return String::new(),
        }
    }
    if let Some(rest) = lower
        .starts_with("review:")
        .then(|| text["review:".len()..].trim_start())
    {
        return rest.to_string();
    }
    text.to_string()
}
