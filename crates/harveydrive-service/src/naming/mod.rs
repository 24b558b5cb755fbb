//! Sibling name uniqueness.
//!
//! Two policies apply, depending on the entity:
//!
//! - **reject** ([`ensure_name_available`]): folders. A name already used
//!   by a sibling fails with a conflict carrying the attempted name.
//! - **suffix** ([`unique_file_name`], [`unique_name`]): files and
//!   datarooms. A used name gets the first free ` (n)` suffix.
//!
//! Comparisons are exact: no case folding, no trimming. Callers trim and
//! validate with [`normalize_name`] first.

pub mod suffix;

use std::future::Future;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use harveydrive_core::error::{AppError, ErrorKind};
use harveydrive_core::result::AppResult;
use harveydrive_database::repositories::FolderRepository;
use harveydrive_entity::folder::FolderScope;

pub use suffix::{split_file_name, unique_file_name, unique_name};

/// Longest accepted name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Lookup of folder siblings by exact name.
#[async_trait]
pub trait SiblingLookup: Send + Sync {
    /// IDs of folders in `scope` whose name equals `name` exactly.
    async fn sibling_ids_named(&self, scope: &FolderScope, name: &str) -> AppResult<Vec<Uuid>>;
}

#[async_trait]
impl SiblingLookup for FolderRepository {
    async fn sibling_ids_named(&self, scope: &FolderScope, name: &str) -> AppResult<Vec<Uuid>> {
        self.find_ids_named(scope, name).await
    }
}

/// Fail with a name conflict if a sibling other than `exclude_id` is
/// already called `name`.
pub async fn ensure_name_available<L>(
    lookup: &L,
    scope: &FolderScope,
    name: &str,
    exclude_id: Option<Uuid>,
) -> AppResult<()>
where
    L: SiblingLookup + ?Sized,
{
    let clash = lookup
        .sibling_ids_named(scope, name)
        .await?
        .into_iter()
        .any(|id| Some(id) != exclude_id);
    if clash {
        return Err(AppError::name_conflict(name));
    }
    Ok(())
}

/// Run a resolve-then-write step, repeating it once if the write lost a
/// race for the resolved name.
///
/// The unique index rejects the second of two concurrent writers with a
/// conflict; re-running the step re-reads sibling names and picks the next
/// free suffix.
pub async fn retry_on_conflict<T, F, Fut>(mut step: F) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    match step().await {
        Err(err) if err.kind == ErrorKind::Conflict => {
            debug!(attempted = ?err.attempted_name(), "Name taken concurrently; resolving again");
            step().await
        }
        other => other,
    }
}

/// Trim a user-supplied name and check that it is usable.
pub fn normalize_name(raw: &str, what: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!("{what} name cannot be empty")));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "{what} name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(AppError::validation(format!(
            "{what} name cannot contain '/', '\\' or NUL characters"
        )));
    }
    Ok(name.to_string())
}
