//! Generation request options.
//!
//! Kind-specific options arrive as a kind-tagged payload and deserialize
//! into one strongly-typed variant per content kind. Numeric options
//! declare inclusive valid ranges and are rejected when out of range —
//! never clamped. Choice fields are closed enums, so unknown values fail
//! at the deserialization boundary.

use serde::{Deserialize, Serialize};

use super::models::ContentKind;

// =============================================================================
// Generation request (slide decks, flashcards, MCQs)
// =============================================================================

/// A generation request for one of the document-derived kinds.
///
/// Podcasts do not go through this path: script and audio have their own
/// two-stage request types below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "content_kind", rename_all = "snake_case")]
pub enum GenerationRequest {
    SlideDeck(SlideDeckOptions),
    FlashcardSet(FlashcardOptions),
    McqSet(McqOptions),
}

impl GenerationRequest {
    pub fn kind(&self) -> ContentKind {
        match self {
            GenerationRequest::SlideDeck(_) => ContentKind::SlideDeck,
            GenerationRequest::FlashcardSet(_) => ContentKind::FlashcardSet,
            GenerationRequest::McqSet(_) => ContentKind::McqSet,
        }
    }

    /// Range-check every numeric option. Choice fields need no check here;
    /// closed enums already rejected unknown values during deserialization.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            GenerationRequest::SlideDeck(options) => {
                check_range("slide_count", options.slide_count, 3, 20)
            }
            GenerationRequest::FlashcardSet(options) => {
                check_range("card_count", options.card_count, 5, 50)
            }
            GenerationRequest::McqSet(options) => {
                check_range("question_count", options.question_count, 5, 30)
            }
        }
    }
}

fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), String> {
    if value < min || value > max {
        return Err(format!("{} must be between {} and {}, got {}", field, min, max, value));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideDeckOptions {
    #[serde(default = "default_slide_count")]
    pub slide_count: u32,
}

fn default_slide_count() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardOptions {
    #[serde(default = "default_card_count")]
    pub card_count: u32,
    #[serde(default)]
    pub card_type: CardType,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_card_count() -> u32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McqOptions {
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    #[serde(default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_question_count() -> u32 {
    15
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    #[default]
    Qa,
    TrueFalse,
    FillBlank,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Qa => "qa",
            CardType::TrueFalse => "true_false",
            CardType::FillBlank => "fill_blank",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    SingleCorrect,
    MultipleCorrect,
    TrueFalse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SingleCorrect => "single_correct",
            QuestionType::MultipleCorrect => "multiple_correct",
            QuestionType::TrueFalse => "true_false",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Mixed => "mixed",
        }
    }
}

// =============================================================================
// Podcast requests (two-stage: script, then audio)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastScriptRequest {
    #[serde(default)]
    pub podcast_length: PodcastLength,
    #[serde(default)]
    pub content_focus: ContentFocus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastAudioRequest {
    pub script_text: String,
    #[serde(flatten)]
    pub voice: VoiceOptions,
}

/// Voice selection for audio synthesis.
///
/// Unlike generation options these are lenient: values outside the
/// enumerated sets deserialize to `Unknown` and resolve to the default
/// voice instead of being rejected (see [`super::voice`]).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VoiceOptions {
    #[serde(default)]
    pub voice_style: VoiceStyle,
    #[serde(default)]
    pub voice_gender: VoiceGender,
    #[serde(default)]
    pub voice_accent: VoiceAccent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PodcastLength {
    Quick,
    #[default]
    Medium,
    Comprehensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFocus {
    #[default]
    FullDocument,
    KeyConcepts,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceStyle {
    #[default]
    Neutral,
    Enthusiastic,
    Formal,
    Conversational,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceGender {
    Male,
    #[default]
    Female,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceAccent {
    #[default]
    American,
    British,
    Indian,
    Australian,
    Canadian,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_declared_values() {
        let request: GenerationRequest =
            serde_json::from_value(serde_json::json!({ "content_kind": "slide_deck" })).unwrap();
        match request {
            GenerationRequest::SlideDeck(options) => assert_eq!(options.slide_count, 10),
            _ => panic!("wrong variant"),
        }

        let request: GenerationRequest =
            serde_json::from_value(serde_json::json!({ "content_kind": "flashcard_set" })).unwrap();
        match request {
            GenerationRequest::FlashcardSet(options) => {
                assert_eq!(options.card_count, 20);
                assert_eq!(options.card_type, CardType::Qa);
                assert_eq!(options.difficulty, Difficulty::Mixed);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn out_of_range_counts_are_rejected_not_clamped() {
        let request = GenerationRequest::SlideDeck(SlideDeckOptions { slide_count: 21 });
        assert!(request.validate().is_err());

        let request = GenerationRequest::SlideDeck(SlideDeckOptions { slide_count: 2 });
        assert!(request.validate().is_err());

        let request = GenerationRequest::FlashcardSet(FlashcardOptions {
            card_count: 51,
            card_type: CardType::Qa,
            difficulty: Difficulty::Mixed,
        });
        assert!(request.validate().is_err());

        let request = GenerationRequest::McqSet(McqOptions {
            question_count: 4,
            question_type: QuestionType::SingleCorrect,
            difficulty: Difficulty::Easy,
        });
        assert!(request.validate().is_err());
    }

    #[test]
    fn boundary_counts_are_accepted() {
        for slide_count in [3, 20] {
            let request = GenerationRequest::SlideDeck(SlideDeckOptions { slide_count });
            assert!(request.validate().is_ok());
        }
    }

    #[test]
    fn unknown_content_kind_fails_to_deserialize() {
        let result: Result<GenerationRequest, _> =
            serde_json::from_value(serde_json::json!({ "content_kind": "mind_map" }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_difficulty_fails_to_deserialize() {
        let result: Result<GenerationRequest, _> = serde_json::from_value(serde_json::json!({
            "content_kind": "mcq_set",
            "difficulty": "impossible"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_voice_accent_degrades_to_unknown() {
        let options: VoiceOptions = serde_json::from_value(serde_json::json!({
            "voice_accent": "french",
            "voice_gender": "female",
            "voice_style": "neutral"
        }))
        .unwrap();
        assert_eq!(options.voice_accent, VoiceAccent::Unknown);
        assert_eq!(options.voice_gender, VoiceGender::Female);
    }

    #[test]
    fn request_kind_matches_variant() {
        use crate::domains::studio::models::ContentKind;

        let request = GenerationRequest::McqSet(McqOptions {
            question_count: 15,
            question_type: QuestionType::SingleCorrect,
            difficulty: Difficulty::Mixed,
        });
        assert_eq!(request.kind(), ContentKind::McqSet);
    }
}
