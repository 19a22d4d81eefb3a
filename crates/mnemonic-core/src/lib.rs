//! Core types and traits for the Mnemonic bookmark service.
//!
//! This crate holds the bookmark model, the error taxonomy and the
//! [`BookmarkStore`] contract shared by the storage backend and the
//! HTTP gateway.

pub mod bookmark;
pub mod error;
pub mod page;
pub mod store;
pub mod tags;

pub use bookmark::{Bookmark, BookmarkId, BookmarkPatch, FieldUpdate, NewBookmark};
pub use error::{BookmarkError, Lookup, Result, StorageError};
pub use page::{Page, PageRequest};
pub use store::BookmarkStore;
pub use tags::{TagDecodeError, Tags};
