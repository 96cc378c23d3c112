use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::state::AppState;

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Documents and versions
        .route(
            "/documents",
            get(api::documents::list_documents_handler)
                .post(api::documents::create_document_handler),
        )
        .route(
            "/documents/{id}",
            get(api::documents::get_document_handler)
                .put(api::documents::update_document_handler)
                .delete(api::documents::delete_document_handler),
        )
        .route(
            "/documents/{id}/snapshots",
            post(api::documents::create_snapshot_handler),
        )
        .route(
            "/documents/{id}/versions",
            get(api::documents::list_versions_handler),
        )
        .route("/documents/{id}/export", get(api::export::export_handler))
        // Structure
        .route(
            "/documents/{id}/chapters",
            get(api::chapters::list_chapters_handler).post(api::chapters::create_chapter_handler),
        )
        .route(
            "/documents/{id}/chapters/reorder",
            patch(api::chapters::reorder_chapters_handler),
        )
        .route(
            "/chapters/{id}/sections",
            get(api::chapters::list_sections_handler).post(api::chapters::create_section_handler),
        )
        // Media
        .route(
            "/documents/{id}/media",
            get(api::media::list_media_handler).post(api::media::create_media_handler),
        )
        .route(
            "/documents/{id}/media/upload",
            post(api::media::upload_media_handler),
        )
        .route("/media/{file_name}", get(api::media::serve_media_handler))
        // Snippets
        .route(
            "/snippets",
            get(api::snippets::list_snippets_handler).post(api::snippets::create_snippet_handler),
        )
        .route(
            "/snippets/{snippet_id}/drop-in/{document_id}",
            post(api::snippets::drop_in_handler),
        )
        // Publishing and blog
        .route("/publishing/medium", post(api::publishing::medium_handler))
        .route("/publishing/kdp", post(api::publishing::kdp_handler))
        .route("/publishing/write-it", post(api::publishing::write_it_handler))
        .route("/blog/posts", get(api::blog::list_posts_handler))
        .route("/blog/posts/{slug}", get(api::blog::get_post_handler))
        // Writing tools
        .route(
            "/writing-tools/spell-check",
            post(api::writing_tools::spell_check_handler),
        )
        .route(
            "/writing-tools/seo-suggestions",
            post(api::writing_tools::seo_suggestions_handler),
        )
        .route(
            "/writing-tools/ai-verify",
            post(api::writing_tools::ai_verify_handler),
        )
        .route("/health", get(health_handler))
}

/// Assemble the HTTP application: every route under `/api/v1`, request
/// tracing and permissive CORS for the browser editor.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
