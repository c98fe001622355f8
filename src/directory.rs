use anyhow::Result;

use crate::models::ChatDirectory;

/// Client-side state of the chat listing.
///
/// The listing is the source of truth: every successful fetch replaces the
/// snapshot wholesale, a failed fetch replaces it with the error placeholder.
/// Nothing is ever merged, so the view can never be stale by field, only
/// stale as a whole, until the next re-list.
#[derive(Clone, Debug, PartialEq)]
pub enum DirectoryView {
    Loading,
    Loaded(ChatDirectory),
    Unavailable,
}

impl Default for DirectoryView {
    fn default() -> Self {
        DirectoryView::Loading
    }
}

impl DirectoryView {
    pub fn from_list(result: Result<ChatDirectory>) -> Self {
        match result {
            Ok(directory) => DirectoryView::Loaded(directory),
            Err(_) => DirectoryView::Unavailable,
        }
    }
}

/// Rename guard: a chat title must contain something visible. `None` means
/// the rename request must not be issued at all.
pub fn validate_title(input: &str) -> Option<String> {
    let title = input.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
