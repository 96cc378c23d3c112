use std::sync::LazyLock;

use regex::Regex;

static NON_ALNUM_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[^a-z0-9]+").expect("static pattern is valid")
});

/// Lowercase `title` and collapse every run of characters outside `[a-z0-9]`
/// into a single hyphen. Leading and trailing hyphens are kept.
///
/// Used as the file stem for exports (e.g. `"My Book!"` → `my-book-`).
pub fn file_stem(title: &str) -> String {
    NON_ALNUM_RUN
        .replace_all(&title.to_lowercase(), "-")
        .into_owned()
}

/// Build the public blog slug for a document.
///
/// The title is reduced like [`file_stem`], stripped of edge hyphens,
/// replaced by `post` when nothing is left, and suffixed with the document id
/// so that equal titles never collide.
pub fn blog_slug(title: &str, document_id: i64) -> String {
    let stem = file_stem(title);
    let base = stem.trim_matches('-');
    let base = if base.is_empty() { "post" } else { base };
    format!("{base}-{document_id}")
}
