use axum::Json;

use crate::api::extract::AppJson;
use crate::content::writing_tools::{
    ai_verify, seo_suggestions, spell_check, AiVerificationResponse, SeoSuggestionRequest,
    SeoSuggestionResponse, SpellCheckResponse, TextPayload,
};

/// `POST /api/v1/writing-tools/spell-check`
pub async fn spell_check_handler(
    AppJson(payload): AppJson<TextPayload>,
) -> Json<SpellCheckResponse> {
    Json(spell_check(payload.text.as_deref().unwrap_or_default()))
}

/// `POST /api/v1/writing-tools/seo-suggestions`
pub async fn seo_suggestions_handler(
    AppJson(request): AppJson<SeoSuggestionRequest>,
) -> Json<SeoSuggestionResponse> {
    Json(seo_suggestions(
        request.title.as_deref().unwrap_or_default(),
        request.content.as_deref().unwrap_or_default(),
    ))
}

/// `POST /api/v1/writing-tools/ai-verify`
pub async fn ai_verify_handler(
    AppJson(payload): AppJson<TextPayload>,
) -> Json<AiVerificationResponse> {
    Json(ai_verify(payload.text.as_deref().unwrap_or_default()))
}
