//! Blob key layout.

use uuid::Uuid;

/// Longest file-name suffix kept in a key.
const MAX_NAME_LEN: usize = 100;

/// Build a fresh blob key for a file uploaded by `owner_id`.
///
/// Keys look like `{owner}/{uuid}-{name}`; the random component makes
/// every upload land at a distinct key even when display names repeat.
pub fn blob_key(owner_id: Uuid, file_name: &str) -> String {
    format!("{owner_id}/{}-{}", Uuid::now_v7(), sanitize(file_name))
}

/// Reduce a display name to a path-safe key segment.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "blob".to_string()
    } else {
        cleaned.to_string()
    }
}
