use mnemonic_core::{BookmarkId, BookmarkPatch, FieldUpdate, NewBookmark, Tags};
use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: u64 = 25;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateBookmarkRequest {
    pub fn into_new_bookmark(self) -> Result<NewBookmark, AppError> {
        let title = validate_title(&self.title)?;
        validate_url(&self.url)?;

        Ok(NewBookmark::builder()
            .title(title)
            .url(self.url)
            .tags(clean_tags(self.tags))
            .build())
    }
}

/// Partial update body. Absent keys leave the stored value alone.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookmarkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub archived: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl UpdateBookmarkRequest {
    pub fn into_patch(self, id: BookmarkId) -> Result<BookmarkPatch, AppError> {
        let title = self
            .title
            .as_deref()
            .map(validate_title)
            .transpose()?
            .map(str::to_string);
        if let Some(url) = &self.url {
            validate_url(url)?;
        }

        Ok(BookmarkPatch {
            id,
            title: FieldUpdate::from(title),
            url: FieldUpdate::from(self.url),
            archived: FieldUpdate::from(self.archived),
            tags: FieldUpdate::from(self.tags.map(clean_tags)),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub page_size: u64,
}

impl PageQuery {
    /// Returns `(page, page_size)` with listing defaults and limits applied.
    pub fn normalized(&self) -> (u64, u64) {
        let page = self.page.max(1);
        let page_size = match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        };
        (page, page_size)
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub url: String,
}

fn validate_title(title: &str) -> Result<&str, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("title cannot be empty".to_string()));
    }
    Ok(title)
}

/// Requires an http(s) scheme and a non-empty host.
fn validate_url(url: &str) -> Result<(), AppError> {
    let invalid = || {
        AppError::BadRequest(format!("url must have a valid scheme and host: {url}"))
    };

    let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
    if host(rest).is_empty() {
        return Err(invalid());
    }

    let scheme = scheme.to_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(AppError::BadRequest(format!(
            "url scheme must be http or https: {scheme}"
        )));
    }

    Ok(())
}

/// Host part of everything after `scheme://`, without userinfo or port.
fn host(rest: &str) -> &str {
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let authority = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host_port)| host_port);

    match authority.strip_prefix('[') {
        Some(bracketed) => bracketed.split(']').next().unwrap_or_default(),
        None => authority.split(':').next().unwrap_or_default(),
    }
}

fn clean_tags(tags: Vec<String>) -> Tags {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
