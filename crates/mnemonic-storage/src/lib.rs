//! SQLite persistence for Mnemonic bookmarks.

mod error;
pub mod sqlite;

pub use mnemonic_core::{
    Bookmark, BookmarkError, BookmarkId, BookmarkPatch, BookmarkStore, Lookup, NewBookmark, Page,
    StorageError, Tags,
};
pub use sqlite::SqliteBookmarkStore;
