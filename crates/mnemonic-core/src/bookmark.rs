use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::tags::Tags;

/// Storage-assigned bookmark identifier. Never reused.
pub type BookmarkId = i64;

/// A saved URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: BookmarkId,
    pub title: String,
    pub url: String,
    pub tags: Tags,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Set while the bookmark is archived.
    pub archived_at: Option<Timestamp>,
}

impl Bookmark {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Parameters for creating a bookmark.
#[derive(Debug, Clone, TypedBuilder)]
pub struct NewBookmark {
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into))]
    pub url: String,
    #[builder(default, setter(into))]
    pub tags: Tags,
}

/// A single field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the stored value as it is.
    #[default]
    Unchanged,
    /// Overwrite the stored value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Unchanged => None,
        }
    }

    pub fn into_set(self) -> Option<T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Unchanged => None,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldUpdate::Unchanged, FieldUpdate::Set)
    }
}

/// A partial update of one bookmark.
///
/// Only fields set to [`FieldUpdate::Set`] are written. `archived` toggles
/// the archive timestamp rather than carrying one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub id: BookmarkId,
    pub title: FieldUpdate<String>,
    pub url: FieldUpdate<String>,
    pub archived: FieldUpdate<bool>,
    pub tags: FieldUpdate<Tags>,
}

impl BookmarkPatch {
    /// An empty patch for the given bookmark.
    pub fn new(id: BookmarkId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = FieldUpdate::Set(title.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = FieldUpdate::Set(url.into());
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = FieldUpdate::Set(archived);
        self
    }

    pub fn tags(mut self, tags: impl Into<Tags>) -> Self {
        self.tags = FieldUpdate::Set(tags.into());
        self
    }

    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        !(self.title.is_set() || self.url.is_set() || self.archived.is_set() || self.tags.is_set())
    }
}
