//! Heuristic writing checks.
//!
//! These are fixed pattern checks, not real spell-checking, SEO scoring or
//! model-based review. Each function returns human-readable suggestions.

use serde::{Deserialize, Serialize};

use crate::content::metrics::count_words;

/// Provider label reported by [`ai_verify`].
pub const MOCK_PROVIDER: &str = "MOCKED";

const SEO_MIN_TITLE_CHARS: usize = 20;
const SEO_MIN_WORDS: u32 = 300;
const AI_LONG_TEXT_CHARS: usize = 500;

/// Body shared by the spell-check and AI verification endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoSuggestionRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCheckResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSuggestionResponse {
    pub word_count: u32,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiVerificationResponse {
    pub provider: String,
    pub suggestions: Vec<String>,
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn spell_check(text: &str) -> SpellCheckResponse {
    let mut suggestions = Vec::new();

    if text.contains(" teh ") || text.starts_with("teh ") || text.ends_with(" teh") {
        suggestions.push("Replace 'teh' with 'the'.".to_string());
    }
    if text.contains("  ") {
        suggestions.push("Remove double spaces.".to_string());
    }

    let trimmed = text.trim();
    if !trimmed.is_empty() && !trimmed.ends_with(['.', '!', '?']) {
        suggestions.push("Consider ending the paragraph with punctuation.".to_string());
    }

    SpellCheckResponse { suggestions }
}

pub fn seo_suggestions(title: &str, content: &str) -> SeoSuggestionResponse {
    let word_count = count_words(content);
    let mut suggestions = Vec::new();

    // Lengths are counted in UTF-16 code units, as the editor reports them.
    if utf16_len(title) < SEO_MIN_TITLE_CHARS {
        suggestions.push(
            "Use a longer title (20-60 chars) for better discoverability.".to_string(),
        );
    }
    if word_count < SEO_MIN_WORDS {
        suggestions.push(
            "Add more depth; SEO content typically performs better beyond 300 words."
                .to_string(),
        );
    }
    if !content.to_lowercase().contains("introduction") {
        suggestions.push("Consider adding an introduction heading for structure.".to_string());
    }

    SeoSuggestionResponse {
        word_count,
        suggestions,
    }
}

pub fn ai_verify(text: &str) -> AiVerificationResponse {
    let mut suggestions =
        vec!["Tone check: keep sentence length varied for readability.".to_string()];
    if utf16_len(text) > AI_LONG_TEXT_CHARS {
        suggestions.push(
            "Fact-check recommendation: verify all numeric claims with references.".to_string(),
        );
    }
    suggestions.push("Style check: use active voice where possible.".to_string());

    AiVerificationResponse {
        provider: MOCK_PROVIDER.to_string(),
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spell_check_flags_known_issues() {
        let response = spell_check("teh text  with double space");
        assert_eq!(
            response.suggestions,
            vec![
                "Replace 'teh' with 'the'.",
                "Remove double spaces.",
                "Consider ending the paragraph with punctuation.",
            ]
        );
    }

    #[test]
    fn test_spell_check_clean_text() {
        assert!(spell_check("All good here.").suggestions.is_empty());
        assert!(spell_check("").suggestions.is_empty());
        assert!(spell_check("   ").suggestions.is_empty());
    }

    #[test]
    fn test_spell_check_teh_inside_word_ignored() {
        let response = spell_check("Tehran is a city.");
        assert!(response.suggestions.is_empty());
    }

    #[test]
    fn test_seo_reports_word_count_and_hints() {
        let response = seo_suggestions("short", "tiny content");
        assert_eq!(response.word_count, 2);
        assert_eq!(response.suggestions.len(), 3);
    }

    #[test]
    fn test_seo_satisfied() {
        let content = format!("Introduction {}", "word ".repeat(300));
        let response = seo_suggestions("A sufficiently long title", &content);
        assert_eq!(response.word_count, 301);
        assert!(response.suggestions.is_empty());
    }

    #[test]
    fn test_lengths_count_utf16_units() {
        // Ten astral characters are twenty UTF-16 units.
        let emoji_title = "\u{1F600}".repeat(10);
        let response = seo_suggestions(&emoji_title, "");
        assert!(!response.suggestions.iter().any(|s| s.contains("longer title")));

        let nineteen = "t".repeat(19);
        let response = seo_suggestions(&nineteen, "");
        assert!(response.suggestions[0].contains("longer title"));

        // 251 astral characters exceed 500 units.
        let long = "\u{1F4DA}".repeat(251);
        assert_eq!(ai_verify(&long).suggestions.len(), 3);
        let short = "\u{1F4DA}".repeat(250);
        assert_eq!(ai_verify(&short).suggestions.len(), 2);
    }

    #[test]
    fn test_ai_verify_long_text_adds_fact_check() {
        assert_eq!(ai_verify("short").suggestions.len(), 2);
        let long = "x".repeat(501);
        let response = ai_verify(&long);
        assert_eq!(response.provider, "MOCKED");
        assert_eq!(response.suggestions.len(), 3);
        assert!(response.suggestions[1].starts_with("Fact-check"));
    }
}
