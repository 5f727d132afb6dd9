//! Error types for tracker-store

use crate::collection::Collection;

/// Result type for tracker-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tracker-store operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote read/write failure, passed through unchanged
    #[error(transparent)]
    Remote(#[from] tracker_remote::Error),

    /// An edit named a record that is not in the loaded collection
    #[error("No record with id '{id}' in {collection}")]
    RecordNotFound { collection: Collection, id: String },
}

impl Error {
    /// The underlying remote error, if this is one.
    pub fn as_remote(&self) -> Option<&tracker_remote::Error> {
        match self {
            Error::Remote(e) => Some(e),
            Error::RecordNotFound { .. } => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.as_remote().is_some_and(tracker_remote::Error::is_conflict)
    }
}
