use std::str::FromStr;

use async_trait::async_trait;
use jiff::Timestamp;
use mnemonic_core::{
    Bookmark, BookmarkError, BookmarkId, BookmarkPatch, BookmarkStore, FieldUpdate, Lookup,
    NewBookmark, Page, PageRequest, Result, StorageError, Tags,
};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{QueryBuilder, Row, Sqlite};
use tracing::debug;

use crate::error::{is_url_violation, map_sqlx_error};

/// Schema applied by [`BookmarkStore::init`].
pub const SCHEMA: &str = include_str!("../ddl/sqlite/bookmarks.sql");

/// SQLite implementation of the bookmark store.
///
/// Timestamps are stored as unix milliseconds. Listings read from the
/// `active_bookmarks` view, lookups by key from `all_bookmarks`. URL
/// uniqueness is left entirely to the `UNIQUE` constraint on
/// `bookmarks.url`, so archived rows keep their URL reserved.
#[derive(Debug, Clone)]
pub struct SqliteBookmarkStore {
    pool: SqlitePool,
}

impl SqliteBookmarkStore {
    /// Creates a store from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool on `database_url`, creating the database file if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// The pool is pinned to a single connection that never expires, since
    /// every SQLite in-memory connection sees its own database.
    pub async fn connect_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn set_archived(&self, ids: &[BookmarkId], archived: bool) -> Result<()> {
        if ids.is_empty() {
            return Err(BookmarkError::NotFound(Lookup::Ids(Vec::new())));
        }

        let now = now_millis();
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE bookmarks SET ");
        if archived {
            query
                .push("archived_at = COALESCE(archived_at, ")
                .push_bind(now)
                .push("), ");
        } else {
            query.push("archived_at = NULL, ");
        }
        query.push("updated_at = ").push_bind(now).push(" WHERE id IN (");

        let mut list = query.separated(", ");
        for id in ids {
            list.push_bind(*id);
        }
        list.push_unseparated(")");

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(BookmarkError::NotFound(Lookup::Ids(ids.to_vec())));
        }

        debug!(
            ?ids,
            archived,
            affected = result.rows_affected(),
            "changed bookmark archive state"
        );
        Ok(())
    }
}

fn now_millis() -> i64 {
    Timestamp::now().as_millisecond()
}

fn parse_timestamp(column: &str, millis: i64) -> std::result::Result<Timestamp, StorageError> {
    Timestamp::from_millisecond(millis).map_err(|e| {
        StorageError::InvalidData(format!("invalid {column} timestamp '{millis}': {e}"))
    })
}

/// SQLite integers are signed; anything past `i64::MAX` is clamped.
fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn bookmark_from_row(row: &SqliteRow) -> std::result::Result<Bookmark, StorageError> {
    let tags: Option<String> = row.try_get("tags").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(map_sqlx_error)?;
    let archived_at: Option<i64> = row.try_get("archived_at").map_err(map_sqlx_error)?;

    Ok(Bookmark {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        url: row.try_get("url").map_err(map_sqlx_error)?,
        tags: Tags::decode(tags.as_deref())?,
        created_at: parse_timestamp("created_at", created_at)?,
        updated_at: parse_timestamp("updated_at", updated_at)?,
        archived_at: archived_at
            .map(|value| parse_timestamp("archived_at", value))
            .transpose()?,
    })
}

#[async_trait]
impl BookmarkStore for SqliteBookmarkStore {
    async fn init(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn create(&self, bookmark: NewBookmark) -> Result<Bookmark> {
        let NewBookmark { title, url, tags } = bookmark;
        let now = now_millis();

        let result = sqlx::query(
            r#"
            INSERT INTO bookmarks (title, url, tags, created_at, updated_at, archived_at)
            VALUES (?, ?, ?, ?, ?, NULL)
            RETURNING id, title, url, tags, created_at, updated_at, archived_at
            "#,
        )
        .bind(title)
        .bind(url.as_str())
        .bind(tags.encode())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => {
                let created = bookmark_from_row(&row)?;
                debug!(id = created.id, url = %created.url, "created bookmark");
                Ok(created)
            }
            Err(err) if is_url_violation(&err) => Err(BookmarkError::UrlExists {
                url,
                source: map_sqlx_error(err),
            }),
            Err(err) => Err(map_sqlx_error(err).into()),
        }
    }

    async fn update(&self, patch: BookmarkPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let BookmarkPatch {
            id,
            title,
            url,
            archived,
            tags,
        } = patch;
        let now = now_millis();

        let mut query = QueryBuilder::<Sqlite>::new("UPDATE bookmarks SET ");
        let mut assignments = query.separated(", ");
        if let FieldUpdate::Set(title) = title {
            assignments.push("title = ").push_bind_unseparated(title);
        }
        if let FieldUpdate::Set(url) = &url {
            assignments.push("url = ").push_bind_unseparated(url.clone());
        }
        if let FieldUpdate::Set(archived) = archived {
            assignments
                .push("archived_at = ")
                .push_bind_unseparated(archived.then_some(now));
        }
        if let FieldUpdate::Set(tags) = tags {
            assignments
                .push("tags = ")
                .push_bind_unseparated(tags.encode());
        }
        assignments.push("updated_at = ").push_bind_unseparated(now);
        query.push(" WHERE id = ").push_bind(id);

        let result = query.build().execute(&self.pool).await;

        let affected = match result {
            Ok(result) => result.rows_affected(),
            Err(err) if is_url_violation(&err) => {
                return Err(BookmarkError::UrlExists {
                    url: url.into_set().unwrap_or_default(),
                    source: map_sqlx_error(err),
                });
            }
            Err(err) => return Err(map_sqlx_error(err).into()),
        };

        if affected == 0 {
            return Err(BookmarkError::NotFound(Lookup::Id(id)));
        }

        debug!(id, "updated bookmark");
        Ok(())
    }

    async fn get(&self, id: BookmarkId) -> Result<Bookmark> {
        let row = sqlx::query(
            r#"
            SELECT id, title, url, tags, created_at, updated_at, archived_at
            FROM all_bookmarks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Err(BookmarkError::NotFound(Lookup::Id(id)));
        };

        Ok(bookmark_from_row(&row)?)
    }

    async fn get_by_url(&self, url: &str) -> Result<Bookmark> {
        let row = sqlx::query(
            r#"
            SELECT id, title, url, tags, created_at, updated_at, archived_at
            FROM all_bookmarks
            WHERE url = ?
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Err(BookmarkError::NotFound(Lookup::Url(url.to_string())));
        };

        Ok(bookmark_from_row(&row)?)
    }

    async fn get_page(&self, page: u64, page_size: u64) -> Result<Page<Bookmark>> {
        let request = PageRequest::new(page, page_size);

        let rows = sqlx::query(
            r#"
            SELECT id, title, url, tags, created_at, updated_at, archived_at
            FROM active_bookmarks
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(to_sql_int(request.page_size()))
        .bind(to_sql_int(request.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let items = rows
            .iter()
            .map(bookmark_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM active_bookmarks")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(Page::new(
            items,
            request,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn delete(&self, id: BookmarkId) -> Result<()> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(BookmarkError::NotFound(Lookup::Id(id)));
        }

        debug!(id, "deleted bookmark");
        Ok(())
    }

    async fn archive(&self, ids: &[BookmarkId]) -> Result<()> {
        self.set_archived(ids, true).await
    }

    async fn restore(&self, ids: &[BookmarkId]) -> Result<()> {
        self.set_archived(ids, false).await
    }
}
