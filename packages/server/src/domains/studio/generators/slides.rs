//! Slide deck generation.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use openai_client::StructuredOutput;

use crate::domains::studio::options::SlideDeckOptions;
use crate::kernel::traits::{BaseCompletioner, TokenUsage};
use crate::kernel::GPT_5_NANO;

use super::{context_excerpt, enforce_count, PROMPT_TEXT_BUDGET};

/// One generated slide.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Slide {
    /// Slide title
    pub title: String,
    /// 4-5 bullet points
    pub content: Vec<String>,
    /// Detailed narration for the presenter
    pub speaker_notes: String,
}

/// The canonical slide deck shape returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SlideDeck {
    pub slides: Vec<Slide>,
}

const SYSTEM_PROMPT: &str =
    "You create presentation slide content from study documents. All content must be specific to the provided document.";

fn build_prompt(text: &str, slide_count: u32) -> String {
    format!(
        r#"Based on the following text, create content for EXACTLY {slide_count} presentation slides.
Each slide must have a "title", "content" (a list of 4-5 bullet point strings), and "speaker_notes" (a detailed paragraph).
CRITICAL: All content must be specific to the uploaded document.
TEXT: ---
{excerpt}
---"#,
        excerpt = context_excerpt(text, PROMPT_TEXT_BUDGET),
    )
}

/// Generate a slide deck from document text.
pub async fn generate_slide_deck(
    text: &str,
    options: &SlideDeckOptions,
    ai: &dyn BaseCompletioner,
) -> Result<(SlideDeck, Option<TokenUsage>)> {
    let prompt = build_prompt(text, options.slide_count);
    let completion = ai
        .complete_structured(GPT_5_NANO, SYSTEM_PROMPT, &prompt, SlideDeck::openai_schema())
        .await?;

    let mut deck: SlideDeck = serde_json::from_str(&completion.content)
        .context("slide response did not match the expected shape")?;

    enforce_count(&mut deck.slides, options.slide_count, "slides")?;

    Ok((deck, completion.usage))
}

/// Write the deck as a `.pptx` into `dir`; returns the artifact path.
pub fn write_artifact(deck: &SlideDeck, dir: &Path) -> Result<PathBuf> {
    let slides: Vec<doctools::SlideContent> = deck
        .slides
        .iter()
        .map(|slide| doctools::SlideContent {
            title: slide.title.clone(),
            bullets: slide.content.clone(),
            notes: slide.speaker_notes.clone(),
        })
        .collect();

    let path = dir.join("presentation.pptx");
    doctools::write_pptx(&slides, &path).context("failed to package slide deck")?;
    Ok(path)
}
