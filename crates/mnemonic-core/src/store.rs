use async_trait::async_trait;

use crate::bookmark::{Bookmark, BookmarkId, BookmarkPatch, NewBookmark};
use crate::error::Result;
use crate::page::Page;

/// Persistence contract for bookmarks.
///
/// Implementations own all SQL and enforce the domain invariants. URL
/// uniqueness is global: an archived bookmark still holds its URL.
#[async_trait]
pub trait BookmarkStore: Send + Sync + 'static {
    /// Creates the schema if it is missing. Safe to call on every start.
    async fn init(&self) -> Result<()>;

    /// Inserts a new, unarchived bookmark.
    /// Returns `Err(UrlExists)` if another bookmark already has the URL.
    async fn create(&self, bookmark: NewBookmark) -> Result<Bookmark>;

    /// Applies the set fields of `patch` and refreshes `updated_at`.
    ///
    /// An empty patch succeeds without touching storage. Setting `archived`
    /// to `true` stamps `archived_at` with the current time even if the
    /// bookmark was already archived; use [`archive`](Self::archive) to keep
    /// the first archive time.
    async fn update(&self, patch: BookmarkPatch) -> Result<()>;

    /// Fetches a bookmark by id, archived or not.
    async fn get(&self, id: BookmarkId) -> Result<Bookmark>;

    /// Fetches a bookmark by URL, archived or not.
    async fn get_by_url(&self, url: &str) -> Result<Bookmark>;

    /// Lists unarchived bookmarks. `page` is 1-indexed; `0` reads as `1`.
    async fn get_page(&self, page: u64, page_size: u64) -> Result<Page<Bookmark>>;

    /// Permanently removes a bookmark.
    async fn delete(&self, id: BookmarkId) -> Result<()>;

    /// Archives every listed bookmark. Fails only if none of them exist.
    ///
    /// Bookmarks that are already archived keep their `archived_at`.
    async fn archive(&self, ids: &[BookmarkId]) -> Result<()>;

    /// Restores every listed bookmark. Fails only if none of them exist.
    async fn restore(&self, ids: &[BookmarkId]) -> Result<()>;
}
