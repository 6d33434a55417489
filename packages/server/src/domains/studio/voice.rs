//! Fixed (accent, gender, style) → synthesis voice lookup.
//!
//! Combinations outside the table — including any `Unknown` component —
//! resolve to [`DEFAULT_VOICE`], never an error.

use super::options::{VoiceAccent, VoiceGender, VoiceOptions, VoiceStyle};

/// Fallback voice for unmapped combinations.
pub const DEFAULT_VOICE: &str = "en-US-AriaNeural";

/// Resolve voice options to a synthesis engine voice name.
pub fn resolve_voice(options: &VoiceOptions) -> &'static str {
    use VoiceAccent::*;
    use VoiceGender::*;
    use VoiceStyle::*;

    match (options.voice_accent, options.voice_gender, options.voice_style) {
        // American English
        (American, Female, Neutral) => "en-US-AriaNeural",
        (American, Female, Enthusiastic) => "en-US-JennyNeural",
        (American, Female, Formal) => "en-US-SaraNeural",
        (American, Female, Conversational) => "en-US-AriaNeural",
        (American, Male, Neutral) => "en-US-GuyNeural",
        (American, Male, Enthusiastic) => "en-US-BrianNeural",
        (American, Male, Formal) => "en-US-DavisNeural",
        (American, Male, Conversational) => "en-US-GuyNeural",

        // British English
        (British, Female, Neutral) => "en-GB-SoniaNeural",
        (British, Female, Enthusiastic) => "en-GB-LibbyNeural",
        (British, Female, Formal) => "en-GB-SoniaNeural",
        (British, Female, Conversational) => "en-GB-MaisieNeural",
        (British, Male, Neutral) => "en-GB-RyanNeural",
        (British, Male, Enthusiastic) => "en-GB-ThomasNeural",
        (British, Male, Formal) => "en-GB-RyanNeural",
        (British, Male, Conversational) => "en-GB-AlfieNeural",

        // Indian English
        (Indian, Female, Neutral) => "en-IN-NeerjaNeural",
        (Indian, Female, Enthusiastic) => "en-IN-NeerjaNeural",
        (Indian, Female, Formal) => "en-IN-NeerjaNeural",
        (Indian, Female, Conversational) => "en-IN-NeerjaNeural",
        (Indian, Male, Neutral) => "en-IN-PrabhatNeural",
        (Indian, Male, Enthusiastic) => "en-IN-PrabhatNeural",
        (Indian, Male, Formal) => "en-IN-PrabhatNeural",
        (Indian, Male, Conversational) => "en-IN-PrabhatNeural",

        // Australian English
        (Australian, Female, Neutral) => "en-AU-NatashaNeural",
        (Australian, Female, Enthusiastic) => "en-AU-NatashaNeural",
        (Australian, Female, Formal) => "en-AU-NatashaNeural",
        (Australian, Female, Conversational) => "en-AU-NatashaNeural",
        (Australian, Male, Neutral) => "en-AU-WilliamNeural",
        (Australian, Male, Enthusiastic) => "en-AU-WilliamNeural",
        (Australian, Male, Formal) => "en-AU-WilliamNeural",
        (Australian, Male, Conversational) => "en-AU-WilliamNeural",

        // Canadian English
        (Canadian, Female, Neutral) => "en-CA-ClaraNeural",
        (Canadian, Female, Enthusiastic) => "en-CA-ClaraNeural",
        (Canadian, Female, Formal) => "en-CA-ClaraNeural",
        (Canadian, Female, Conversational) => "en-CA-ClaraNeural",
        (Canadian, Male, Neutral) => "en-CA-LiamNeural",
        (Canadian, Male, Enthusiastic) => "en-CA-LiamNeural",
        (Canadian, Male, Formal) => "en-CA-LiamNeural",
        (Canadian, Male, Conversational) => "en-CA-LiamNeural",

        _ => DEFAULT_VOICE,
    }
}
