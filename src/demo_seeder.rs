use crate::db::models::{Chapter, DocumentRequest, DocumentType, Section, Snippet};
use crate::db::repository::DocumentFilter;
use crate::error::AppError;
use crate::service::documents;
use crate::state::AppState;

/// Owner of the seeded sample content.
pub const DEMO_USER_ID: i64 = 1;

const DEMO_CHAPTERS: [(&str, &[(&str, &str)]); 3] = [
    (
        "The Empty Page",
        &[
            ("Morning", "The cursor blinked at her like it knew something she did not."),
            ("Coffee", "Two cups in, the first sentence finally arrived."),
        ],
    ),
    (
        "Drafts",
        &[("Outline", "Three acts, a twist in the middle, and an ending she kept rewriting.")],
    ),
    ("Revision", &[]),
];

/// Insert a sample book for the demo user unless they already own documents.
pub async fn seed_demo_data(state: &AppState) -> Result<(), AppError> {
    let existing = state
        .document_repo
        .list_by_user(DEMO_USER_ID, &DocumentFilter::All)
        .await?;
    if !existing.is_empty() {
        tracing::info!(
            user_id = DEMO_USER_ID,
            documents = existing.len(),
            "Demo user already has documents, skipping seeding"
        );
        return Ok(());
    }

    tracing::info!("Starting demo data seeding...");

    let book = documents::create_document(
        state.document_repo.as_ref(),
        DocumentRequest {
            title: "The Long Draft".to_string(),
            doc_type: DocumentType::Book,
            content: Some(
                "A novel about a writer who cannot stop revising. \
                 Every chapter gets rewritten at least twice."
                    .to_string(),
            ),
            user_id: DEMO_USER_ID,
            tags: Some("fiction, demo".to_string()),
            category: Some("Novel".to_string()),
        },
    )
    .await?;

    for (position, (title, sections)) in DEMO_CHAPTERS.iter().enumerate() {
        let chapter = state
            .chapter_repo
            .insert(Chapter {
                id: 0,
                document_id: book.id,
                title: title.to_string(),
                position: position as i32,
            })
            .await?;

        for (section_position, (section_title, content)) in sections.iter().enumerate() {
            state
                .section_repo
                .insert(Section {
                    id: 0,
                    chapter_id: chapter.id,
                    title: section_title.to_string(),
                    content: Some(content.to_string()),
                    position: section_position as i32,
                })
                .await?;
        }
    }

    state
        .snippet_repo
        .insert(Snippet {
            id: 0,
            user_id: DEMO_USER_ID,
            title: "Signature closing".to_string(),
            content: "Thanks for reading. More soon.".to_string(),
        })
        .await?;

    tracing::info!(document_id = book.id, "Demo data seeding completed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_skipped_when_user_has_documents() {
        let state = AppState::in_memory();

        seed_demo_data(&state).await.unwrap();
        seed_demo_data(&state).await.unwrap();

        let docs = state
            .document_repo
            .list_by_user(DEMO_USER_ID, &DocumentFilter::All)
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].doc_type, DocumentType::Book);
        assert!(docs[0].word_count > 0);

        let chapters = state.chapter_repo.list_by_document(docs[0].id).await.unwrap();
        let titles: Vec<&str> = chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["The Empty Page", "Drafts", "Revision"]);

        let sections = state.section_repo.list_by_chapter(chapters[0].id).await.unwrap();
        assert_eq!(sections.len(), 2);

        let snippets = state.snippet_repo.list_by_user(DEMO_USER_ID).await.unwrap();
        assert_eq!(snippets.len(), 1);
    }
}
