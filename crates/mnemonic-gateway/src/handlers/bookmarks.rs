use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mnemonic_core::{Bookmark, BookmarkId, Page};
use tracing::info;

use crate::error::Result;
use crate::extract::{JsonBody, Path, Query};
use crate::model::{CreateBookmarkRequest, LookupQuery, PageQuery, UpdateBookmarkRequest};
use crate::state::AppState;

pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Bookmark>>> {
    let (page, page_size) = query.normalized();
    let bookmarks = state.store().get_page(page, page_size).await?;
    Ok(Json(bookmarks))
}

pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<Bookmark>)> {
    let bookmark = state.store().create(request.into_new_bookmark()?).await?;
    info!(id = bookmark.id, url = %bookmark.url, "bookmark created");
    Ok((StatusCode::CREATED, Json(bookmark)))
}

pub async fn get_bookmark_handler(
    Path(id): Path<BookmarkId>,
    State(state): State<AppState>,
) -> Result<Json<Bookmark>> {
    Ok(Json(state.store().get(id).await?))
}

pub async fn lookup_bookmark_handler(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Bookmark>> {
    Ok(Json(state.store().get_by_url(&query.url).await?))
}

pub async fn update_bookmark_handler(
    Path(id): Path<BookmarkId>,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UpdateBookmarkRequest>,
) -> Result<StatusCode> {
    state.store().update(request.into_patch(id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_bookmark_handler(
    Path(id): Path<BookmarkId>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.store().delete(id).await?;
    info!(id, "bookmark deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn archive_bookmark_handler(
    Path(id): Path<BookmarkId>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.store().archive(&[id]).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_bookmark_handler(
    Path(id): Path<BookmarkId>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.store().restore(&[id]).await?;
    Ok(StatusCode::NO_CONTENT)
}
