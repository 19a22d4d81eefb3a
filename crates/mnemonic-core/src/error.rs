use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::bookmark::BookmarkId;
use crate::tags::TagDecodeError;

/// Result type for bookmark store operations.
pub type Result<T> = std::result::Result<T, BookmarkError>;

/// The key a failed lookup or mutation searched by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(BookmarkId),
    Url(String),
    Ids(Vec<BookmarkId>),
}

impl Lookup {
    /// Name of the searched field.
    pub fn field(&self) -> &'static str {
        match self {
            Lookup::Id(_) | Lookup::Ids(_) => "id",
            Lookup::Url(_) => "url",
        }
    }
}

impl Display for Lookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "id = {id}"),
            Lookup::Url(url) => write!(f, "url = {url}"),
            Lookup::Ids(ids) => write!(f, "id in {ids:?}"),
        }
    }
}

/// Errors a [`BookmarkStore`](crate::BookmarkStore) reports to its callers.
///
/// Callers branch on the variant only. The contents of
/// [`BookmarkError::Storage`] are for logging.
#[derive(Debug, Clone, Error)]
pub enum BookmarkError {
    #[error("no bookmark found where {0}")]
    NotFound(Lookup),
    #[error("a bookmark with URL {url} already exists: {source}")]
    UrlExists {
        url: String,
        #[source]
        source: StorageError,
    },
    #[error("storage error: {0}")]
    Storage(
        #[from]
        #[source]
        StorageError,
    ),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl From<TagDecodeError> for StorageError {
    fn from(error: TagDecodeError) -> Self {
        StorageError::InvalidData(error.to_string())
    }
}
