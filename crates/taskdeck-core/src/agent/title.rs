//! Conversation title derivation.
//!
//! `derive_title` names a conversation after its first user message,
//! truncated so transcript listings stay scannable.

/// Maximum number of characters kept before the ellipsis.
const MAX_TITLE_CHARS: usize = 50;

/// Derive a conversation title from the first user message.
///
/// Messages longer than 50 characters are cut at 50 characters (character
/// boundaries, not bytes) with `"..."` appended; shorter messages are used
/// verbatim.
pub fn derive_title(first_user_message: &str) -> String {
    if first_user_message.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = first_user_message.chars().take(MAX_TITLE_CHARS).collect();
        format!("{truncated}...")
    } else {
        first_user_message.to_string()
    }
}
