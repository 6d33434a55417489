//! Kind-specific generation routines.
//!
//! Each generator builds a bounded prompt from a truncated prefix of the
//! extracted document text, calls the LLM with a strict JSON schema,
//! parses the payload into its canonical shape, and enforces the count
//! policy: responses longer than requested are truncated to N, responses
//! shorter than requested fail the job. The policy is uniform across
//! kinds.

pub mod flashcards;
pub mod mcqs;
pub mod podcast;
pub mod slides;

use anyhow::{bail, Result};
use openai_client::truncate_to_char_boundary;

/// Character budget for document context in generation prompts.
pub const PROMPT_TEXT_BUDGET: usize = 8_000;

/// Character budget for document context in podcast and chat prompts.
pub const NARRATION_TEXT_BUDGET: usize = 6_000;

/// Clip document text to a prompt budget at a character boundary.
pub fn context_excerpt(text: &str, budget: usize) -> &str {
    truncate_to_char_boundary(text, budget)
}

/// Apply the strict count policy to a generated list.
pub(crate) fn enforce_count<T>(items: &mut Vec<T>, requested: u32, what: &str) -> Result<()> {
    if (items.len() as u32) < requested {
        bail!(
            "model returned {} {} but {} were requested",
            items.len(),
            what,
            requested
        );
    }
    items.truncate(requested as usize);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforce_count_truncates_over_delivery() {
        let mut items = vec![1, 2, 3, 4, 5];
        enforce_count(&mut items, 3, "things").unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn enforce_count_accepts_exact_delivery() {
        let mut items = vec![1, 2, 3];
        enforce_count(&mut items, 3, "things").unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn enforce_count_fails_under_delivery() {
        let mut items = vec![1, 2];
        let err = enforce_count(&mut items, 3, "things").unwrap_err();
        assert!(err.to_string().contains("2 things"));
    }

    #[test]
    fn context_excerpt_respects_budget() {
        let text = "x".repeat(10_000);
        assert_eq!(context_excerpt(&text, PROMPT_TEXT_BUDGET).len(), 8_000);
    }
}
