//! Repository implementations for all HarveyDrive entities.

pub mod dataroom;
pub mod file;
pub mod folder;
pub mod profile;
pub mod share;

pub use dataroom::DataroomRepository;
pub use file::FileRepository;
pub use folder::FolderRepository;
pub use profile::ProfileRepository;
pub use share::ShareRepository;

/// Whether `err` is a violation of the named unique constraint.
pub(crate) fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
