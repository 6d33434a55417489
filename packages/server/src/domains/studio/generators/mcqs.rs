//! Multiple-choice question set generation.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use openai_client::StructuredOutput;

use crate::domains::studio::options::{McqOptions, QuestionType};
use crate::kernel::traits::{BaseCompletioner, TokenUsage};
use crate::kernel::GPT_5_NANO;

use super::{context_excerpt, enforce_count, PROMPT_TEXT_BUDGET};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McqOption {
    pub option_text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Mcq {
    pub question_text: String,
    /// Exactly four options
    pub options: Vec<McqOption>,
    /// Why the correct option is correct
    pub explanation: String,
    /// easy, medium or hard
    pub difficulty: String,
    /// Bloom's taxonomy level
    pub bloom_level: String,
    pub topic: String,
}

/// The canonical MCQ set shape returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McqSet {
    pub mcqs: Vec<Mcq>,
}

const SYSTEM_PROMPT: &str =
    "You create multiple-choice assessment questions from documents. Questions must be specific to the provided document.";

fn build_prompt(text: &str, options: &McqOptions) -> String {
    format!(
        r#"Based on the following text, generate EXACTLY {count} MCQs. The question type should be {question_type} and the difficulty should be {difficulty}.

Each question must have:
1. "question_text": the question itself.
2. "options": a list of 4 objects, each with "option_text" and "is_correct".
3. "explanation": a brief explanation of why the correct option is correct.
4. "difficulty": one of "easy", "medium", or "hard".
5. "bloom_level": one of "Remember", "Understand", "Apply", "Analyze", "Evaluate", "Create".
6. "topic": a brief topic or concept this question relates to.

TEXT: ---
{excerpt}
---"#,
        count = options.question_count,
        question_type = options.question_type.as_str(),
        difficulty = options.difficulty.as_str(),
        excerpt = context_excerpt(text, PROMPT_TEXT_BUDGET),
    )
}

/// Generate an MCQ set from document text.
pub async fn generate_mcqs(
    text: &str,
    options: &McqOptions,
    ai: &dyn BaseCompletioner,
) -> Result<(McqSet, Option<TokenUsage>)> {
    let prompt = build_prompt(text, options);
    let completion = ai
        .complete_structured(GPT_5_NANO, SYSTEM_PROMPT, &prompt, McqSet::openai_schema())
        .await?;

    let mut set: McqSet = serde_json::from_str(&completion.content)
        .context("mcq response did not match the expected shape")?;

    for mcq in &mut set.mcqs {
        normalize_correctness(mcq, options.question_type);
    }

    enforce_count(&mut set.mcqs, options.question_count, "mcqs")?;

    Ok((set, completion.usage))
}

/// Repair the correctness flags on a question.
///
/// Single-answer question types must have exactly one correct option: the
/// first marked option wins, and when none is marked the first option is
/// promoted. Multiple-answer questions only need at least one correct.
fn normalize_correctness(mcq: &mut Mcq, question_type: QuestionType) {
    if mcq.options.is_empty() {
        return;
    }

    let correct_count = mcq.options.iter().filter(|o| o.is_correct).count();

    match question_type {
        QuestionType::SingleCorrect | QuestionType::TrueFalse => {
            if correct_count == 0 {
                mcq.options[0].is_correct = true;
            } else if correct_count > 1 {
                let mut seen_correct = false;
                for option in &mut mcq.options {
                    if option.is_correct {
                        if seen_correct {
                            option.is_correct = false;
                        }
                        seen_correct = true;
                    }
                }
            }
        }
        QuestionType::MultipleCorrect => {
            if correct_count == 0 {
                mcq.options[0].is_correct = true;
            }
        }
    }
}

/// Write the set as pretty-printed JSON into `dir`; returns the artifact path.
pub fn write_artifact(set: &McqSet, dir: &Path) -> Result<PathBuf> {
    let path = dir.join("mcqs.json");
    let json = serde_json::to_vec_pretty(set).context("failed to serialize mcqs")?;
    std::fs::write(&path, json).context("failed to write mcq artifact")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::studio::options::Difficulty;
    use crate::kernel::test_dependencies::MockCompletioner;

    fn mcq_value(correct_flags: &[bool]) -> serde_json::Value {
        let options: Vec<serde_json::Value> = correct_flags
            .iter()
            .enumerate()
            .map(|(i, correct)| {
                serde_json::json!({ "option_text": format!("option {}", i), "is_correct": correct })
            })
            .collect();
        serde_json::json!({
            "question_text": "Which one?",
            "options": options,
            "explanation": "because",
            "difficulty": "easy",
            "bloom_level": "Remember",
            "topic": "topic"
        })
    }

    fn set_json(count: usize) -> String {
        let mcqs: Vec<serde_json::Value> =
            (0..count).map(|_| mcq_value(&[false, true, false, false])).collect();
        serde_json::json!({ "mcqs": mcqs }).to_string()
    }

    fn options(count: u32, question_type: QuestionType) -> McqOptions {
        McqOptions {
            question_count: count,
            question_type,
            difficulty: Difficulty::Mixed,
        }
    }

    #[tokio::test]
    async fn requested_count_is_honored() {
        let ai = MockCompletioner::new().with_response(&set_json(15));
        let (set, _) = generate_mcqs("text", &options(15, QuestionType::SingleCorrect), &ai)
            .await
            .unwrap();
        assert_eq!(set.mcqs.len(), 15);
    }

    #[tokio::test]
    async fn questions_with_no_correct_option_are_repaired() {
        let json = serde_json::json!({ "mcqs": [mcq_value(&[false, false, false, false])] }).to_string();
        let ai = MockCompletioner::new().with_response(&json);
        let (set, _) = generate_mcqs("text", &options(1, QuestionType::SingleCorrect), &ai)
            .await
            .unwrap();

        let correct: Vec<bool> = set.mcqs[0].options.iter().map(|o| o.is_correct).collect();
        assert_eq!(correct, vec![true, false, false, false]);
    }

    #[tokio::test]
    async fn multiple_correct_flags_collapse_to_first_for_single_correct() {
        let json = serde_json::json!({ "mcqs": [mcq_value(&[false, true, true, true])] }).to_string();
        let ai = MockCompletioner::new().with_response(&json);
        let (set, _) = generate_mcqs("text", &options(1, QuestionType::SingleCorrect), &ai)
            .await
            .unwrap();

        let correct_count = set.mcqs[0].options.iter().filter(|o| o.is_correct).count();
        assert_eq!(correct_count, 1);
        assert!(set.mcqs[0].options[1].is_correct);
    }

    #[tokio::test]
    async fn multiple_correct_type_keeps_all_flags() {
        let json = serde_json::json!({ "mcqs": [mcq_value(&[true, true, false, false])] }).to_string();
        let ai = MockCompletioner::new().with_response(&json);
        let (set, _) = generate_mcqs("text", &options(1, QuestionType::MultipleCorrect), &ai)
            .await
            .unwrap();

        let correct_count = set.mcqs[0].options.iter().filter(|o| o.is_correct).count();
        assert_eq!(correct_count, 2);
    }

    #[tokio::test]
    async fn under_delivery_fails() {
        let ai = MockCompletioner::new().with_response(&set_json(10));
        assert!(generate_mcqs("text", &options(15, QuestionType::SingleCorrect), &ai)
            .await
            .is_err());
    }
}
