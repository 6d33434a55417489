//! Flashcard set generation.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use openai_client::StructuredOutput;

use crate::domains::studio::options::FlashcardOptions;
use crate::kernel::traits::{BaseCompletioner, TokenUsage};
use crate::kernel::GPT_5_NANO;

use super::{context_excerpt, enforce_count, PROMPT_TEXT_BUDGET};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Flashcard {
    pub question: String,
    /// Concise answer
    pub answer: String,
    /// A relevant keyword
    pub topic: String,
    /// easy, medium or hard
    pub difficulty: String,
}

/// The canonical flashcard set shape returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FlashcardSet {
    pub flashcards: Vec<Flashcard>,
}

const SYSTEM_PROMPT: &str =
    "You create study flashcards from documents. Cards must be specific to the provided document.";

fn build_prompt(text: &str, options: &FlashcardOptions) -> String {
    format!(
        r#"Based on the following text, generate EXACTLY {count} flashcards. The card type should be {card_type} and the difficulty should be {difficulty}.
Each card must have a "question", a concise "answer", a "topic" keyword, and a "difficulty" of easy, medium or hard.
TEXT: ---
{excerpt}
---"#,
        count = options.card_count,
        card_type = options.card_type.as_str(),
        difficulty = options.difficulty.as_str(),
        excerpt = context_excerpt(text, PROMPT_TEXT_BUDGET),
    )
}

/// Generate a flashcard set from document text.
pub async fn generate_flashcards(
    text: &str,
    options: &FlashcardOptions,
    ai: &dyn BaseCompletioner,
) -> Result<(FlashcardSet, Option<TokenUsage>)> {
    let prompt = build_prompt(text, options);
    let completion = ai
        .complete_structured(
            GPT_5_NANO,
            SYSTEM_PROMPT,
            &prompt,
            FlashcardSet::openai_schema(),
        )
        .await?;

    let mut set: FlashcardSet = serde_json::from_str(&completion.content)
        .context("flashcard response did not match the expected shape")?;

    enforce_count(&mut set.flashcards, options.card_count, "flashcards")?;

    Ok((set, completion.usage))
}

/// Write the set as pretty-printed JSON into `dir`; returns the artifact path.
pub fn write_artifact(set: &FlashcardSet, dir: &Path) -> Result<PathBuf> {
    let path = dir.join("flashcards.json");
    let json = serde_json::to_vec_pretty(set).context("failed to serialize flashcards")?;
    std::fs::write(&path, json).context("failed to write flashcard artifact")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::studio::options::{CardType, Difficulty};
    use crate::kernel::test_dependencies::MockCompletioner;

    fn card_json(count: usize) -> String {
        let cards: Vec<serde_json::Value> = (1..=count)
            .map(|i| {
                serde_json::json!({
                    "question": format!("Q{}", i),
                    "answer": "A",
                    "topic": "topic",
                    "difficulty": "easy"
                })
            })
            .collect();
        serde_json::json!({ "flashcards": cards }).to_string()
    }

    fn options(count: u32) -> FlashcardOptions {
        FlashcardOptions {
            card_count: count,
            card_type: CardType::Qa,
            difficulty: Difficulty::Mixed,
        }
    }

    #[tokio::test]
    async fn requested_count_is_honored() {
        let ai = MockCompletioner::new().with_response(&card_json(20));
        let (set, _) = generate_flashcards("text", &options(20), &ai).await.unwrap();
        assert_eq!(set.flashcards.len(), 20);
    }

    #[tokio::test]
    async fn under_delivery_fails_the_generation() {
        // 17 cards back for 20 requested: strict policy fails rather than pad
        let ai = MockCompletioner::new().with_response(&card_json(17));
        assert!(generate_flashcards("text", &options(20), &ai).await.is_err());
    }

    #[tokio::test]
    async fn over_delivery_is_truncated() {
        let ai = MockCompletioner::new().with_response(&card_json(25));
        let (set, _) = generate_flashcards("text", &options(20), &ai).await.unwrap();
        assert_eq!(set.flashcards.len(), 20);
    }

    #[tokio::test]
    async fn prompt_mentions_card_type_and_difficulty() {
        let ai = MockCompletioner::new().with_response(&card_json(5));
        let request = FlashcardOptions {
            card_count: 5,
            card_type: CardType::TrueFalse,
            difficulty: Difficulty::Hard,
        };
        generate_flashcards("text", &request, &ai).await.unwrap();

        let prompt = &ai.prompts()[0];
        assert!(prompt.contains("true_false"));
        assert!(prompt.contains("hard"));
    }

    #[test]
    fn artifact_roundtrips_through_json() {
        let set = FlashcardSet {
            flashcards: vec![Flashcard {
                question: "Q".into(),
                answer: "A".into(),
                topic: "t".into(),
                difficulty: "easy".into(),
            }],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&set, dir.path()).unwrap();

        let bytes = std::fs::read(path).unwrap();
        let parsed: FlashcardSet = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.flashcards.len(), 1);
    }
}
