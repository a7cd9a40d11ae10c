//! Display-title truncation.
//!
//! # Responsibilities
//! - Bound a title to a maximum number of characters for display
//! - Batch variant that drops titles which normalize to nothing
//!
//! # Design Decisions
//! - Never fails: malformed input degrades to an empty string
//! - Length is counted in Unicode scalar values, not bytes and not
//!   grapheme clusters. A cut may land inside a multi-scalar cluster
//!   (e.g. an emoji with a skin-tone modifier).
//! - The cut is not re-trimmed: a cut right after a space keeps it, so
//!   truncating the result again may drop that space
//! - Pure functions; safe to call from any thread without coordination

pub mod input;

pub use input::{TitleBatch, TitleInput};

/// Default maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 20;

/// Trim `title` and cut it to at most `max_length` characters.
///
/// Absent or non-text input yields an empty string.
///
/// ```
/// use note_studio::title::{truncate_title, TitleInput};
///
/// assert_eq!(truncate_title("  hello  ", 20), "hello");
/// assert_eq!(truncate_title(TitleInput::Absent, 20), "");
/// assert_eq!(truncate_title("abcdef", 3), "abc");
/// ```
pub fn truncate_title(title: impl Into<TitleInput>, max_length: usize) -> String {
    let title = title.into();
    let normalized = title.normalized();
    if normalized.is_empty() {
        return String::new();
    }

    match normalized.char_indices().nth(max_length) {
        Some((cut, _)) => normalized[..cut].to_string(),
        None => normalized.to_string(),
    }
}

/// Truncate every title in `titles`, dropping the ones that end up empty.
///
/// Order and duplicates are preserved. A non-sequence batch yields an empty
/// vector.
pub fn truncate_titles(titles: impl Into<TitleBatch>, max_length: usize) -> Vec<String> {
    match titles.into() {
        TitleBatch::Sequence(items) => items
            .into_iter()
            .map(|item| truncate_title(item, max_length))
            .filter(|t| !t.is_empty())
            .collect(),
        TitleBatch::Other => Vec::new(),
    }
}

/// [`truncate_title`] with [`MAX_TITLE_LENGTH`].
pub fn truncate(title: impl Into<TitleInput>) -> String {
    truncate_title(title, MAX_TITLE_LENGTH)
}

/// [`truncate_titles`] with [`MAX_TITLE_LENGTH`].
pub fn truncate_many(titles: impl Into<TitleBatch>) -> Vec<String> {
    truncate_titles(titles, MAX_TITLE_LENGTH)
}
