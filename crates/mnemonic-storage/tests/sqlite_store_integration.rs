use std::time::Duration;

use mnemonic_storage::{
    BookmarkError, BookmarkPatch, BookmarkStore, Lookup, NewBookmark, SqliteBookmarkStore, Tags,
};

struct Fixture {
    store: SqliteBookmarkStore,
}

impl Fixture {
    async fn start() -> Self {
        let store = SqliteBookmarkStore::connect_in_memory()
            .await
            .expect("open sqlite");
        store.init().await.expect("create schema");
        Self { store }
    }
}

/// Lets the millisecond clock move past the previous write.
async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

fn bookmark(title: &str, url: &str, tags: &[&str]) -> NewBookmark {
    NewBookmark::builder()
        .title(title)
        .url(url)
        .tags(tags.iter().copied().collect::<Tags>())
        .build()
}

#[tokio::test]
async fn init_is_idempotent() {
    let fixture = Fixture::start().await;

    fixture.store.init().await.unwrap();
    fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();
    fixture.store.init().await.unwrap();

    let page = fixture.store.get_page(1, 10).await.unwrap();
    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("Rust", "https://rust-lang.org", &["lang", "rust"]))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.title, "Rust");
    assert_eq!(created.url, "https://rust-lang.org");
    assert_eq!(created.tags.to_vec(), vec!["lang", "rust"]);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.archived_at, None);

    let fetched = fixture.store.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_conflicts_on_duplicate_url() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .create(bookmark("One", "https://x.test/a", &[]))
        .await
        .unwrap();

    let err = fixture
        .store
        .create(bookmark("Two", "https://x.test/a", &[]))
        .await
        .unwrap_err();

    match err {
        BookmarkError::UrlExists { url, .. } => assert_eq!(url, "https://x.test/a"),
        other => panic!("expected UrlExists, got {other:?}"),
    }
}

#[tokio::test]
async fn archived_bookmark_still_holds_its_url() {
    let fixture = Fixture::start().await;

    let first = fixture
        .store
        .create(bookmark("One", "https://x.test/a", &[]))
        .await
        .unwrap();
    fixture.store.archive(&[first.id]).await.unwrap();

    let err = fixture
        .store
        .create(bookmark("Two", "https://x.test/a", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, BookmarkError::UrlExists { .. }));
}

#[tokio::test]
async fn missing_lookups_name_their_field() {
    let fixture = Fixture::start().await;

    let err = fixture.store.get(42).await.unwrap_err();
    assert!(matches!(err, BookmarkError::NotFound(Lookup::Id(42))));

    let err = fixture
        .store
        .get_by_url("https://nowhere.test")
        .await
        .unwrap_err();
    match err {
        BookmarkError::NotFound(lookup) => {
            assert_eq!(lookup.field(), "url");
            assert_eq!(lookup, Lookup::Url("https://nowhere.test".into()));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn get_by_url_finds_bookmark() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &["t"]))
        .await
        .unwrap();

    let found = fixture.store.get_by_url("https://x.test/a").await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn tags_only_patch_leaves_other_fields() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &["old"]))
        .await
        .unwrap();
    tick().await;

    fixture
        .store
        .update(BookmarkPatch::new(created.id).tags(vec!["new".to_string()]))
        .await
        .unwrap();

    let updated = fixture.store.get(created.id).await.unwrap();
    assert_eq!(updated.tags.to_vec(), vec!["new"]);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.url, created.url);
    assert_eq!(updated.archived_at, None);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn patch_can_clear_tags() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &["a", "b"]))
        .await
        .unwrap();

    fixture
        .store
        .update(BookmarkPatch::new(created.id).tags(Tags::new()))
        .await
        .unwrap();

    let updated = fixture.store.get(created.id).await.unwrap();
    assert!(updated.tags.is_empty());
}

#[tokio::test]
async fn patch_rewrites_title_and_url() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();

    fixture
        .store
        .update(
            BookmarkPatch::new(created.id)
                .title("Renamed")
                .url("https://x.test/renamed"),
        )
        .await
        .unwrap();

    let updated = fixture
        .store
        .get_by_url("https://x.test/renamed")
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Renamed");
    assert!(fixture.store.get_by_url("https://x.test/a").await.is_err());
}

#[tokio::test]
async fn empty_patch_is_a_no_op() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();

    fixture
        .store
        .update(BookmarkPatch::new(created.id))
        .await
        .unwrap();

    let unchanged = fixture.store.get(created.id).await.unwrap();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn patch_on_missing_id_fails_without_writing() {
    let fixture = Fixture::start().await;

    let err = fixture
        .store
        .update(BookmarkPatch::new(99).title("Ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookmarkError::NotFound(Lookup::Id(99))));

    let page = fixture.store.get_page(1, 10).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn patch_url_collision_is_url_exists() {
    let fixture = Fixture::start().await;

    fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();
    let b = fixture
        .store
        .create(bookmark("B", "https://x.test/b", &[]))
        .await
        .unwrap();

    let err = fixture
        .store
        .update(BookmarkPatch::new(b.id).url("https://x.test/a"))
        .await
        .unwrap_err();
    match err {
        BookmarkError::UrlExists { url, .. } => assert_eq!(url, "https://x.test/a"),
        other => panic!("expected UrlExists, got {other:?}"),
    }

    let unchanged = fixture.store.get(b.id).await.unwrap();
    assert_eq!(unchanged.url, "https://x.test/b");
}

#[tokio::test]
async fn archive_and_restore_through_patch() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();

    fixture
        .store
        .update(BookmarkPatch::new(created.id).archived(true))
        .await
        .unwrap();
    let archived = fixture.store.get(created.id).await.unwrap();
    assert!(archived.archived_at.is_some());
    assert!(fixture.store.get_page(1, 10).await.unwrap().items.is_empty());

    fixture
        .store
        .update(BookmarkPatch::new(created.id).archived(false))
        .await
        .unwrap();
    let restored = fixture.store.get(created.id).await.unwrap();
    assert_eq!(restored.archived_at, None);
    assert_eq!(fixture.store.get_page(1, 10).await.unwrap().items.len(), 1);
}

#[tokio::test]
async fn batch_archive_succeeds_if_any_id_matches() {
    let fixture = Fixture::start().await;

    let a = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();

    fixture.store.archive(&[a.id, 1000]).await.unwrap();
    let first_archive = fixture.store.get(a.id).await.unwrap().archived_at;
    assert!(first_archive.is_some());

    // Re-archiving keeps the original archive time.
    tick().await;
    fixture.store.archive(&[a.id]).await.unwrap();
    assert_eq!(
        fixture.store.get(a.id).await.unwrap().archived_at,
        first_archive
    );

    fixture.store.restore(&[a.id]).await.unwrap();
    assert_eq!(fixture.store.get(a.id).await.unwrap().archived_at, None);
}

#[tokio::test]
async fn archive_and_restore_refresh_updated_at() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();

    tick().await;
    fixture.store.archive(&[created.id]).await.unwrap();
    let archived = fixture.store.get(created.id).await.unwrap();
    assert!(archived.updated_at > created.updated_at);

    tick().await;
    fixture.store.restore(&[created.id]).await.unwrap();
    let restored = fixture.store.get(created.id).await.unwrap();
    assert!(restored.updated_at > archived.updated_at);

    tick().await;
    fixture
        .store
        .update(BookmarkPatch::new(created.id).archived(true))
        .await
        .unwrap();
    let patched = fixture.store.get(created.id).await.unwrap();
    assert!(patched.updated_at > restored.updated_at);
    assert_eq!(patched.created_at, created.created_at);
}

#[tokio::test]
async fn patch_rearchive_moves_archive_time() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();

    fixture
        .store
        .update(BookmarkPatch::new(created.id).archived(true))
        .await
        .unwrap();
    let first = fixture.store.get(created.id).await.unwrap().archived_at;

    tick().await;
    fixture
        .store
        .update(BookmarkPatch::new(created.id).archived(true))
        .await
        .unwrap();
    let second = fixture.store.get(created.id).await.unwrap().archived_at;

    assert!(second > first);
}

#[tokio::test]
async fn batch_archive_of_unknown_ids_is_not_found() {
    let fixture = Fixture::start().await;

    let err = fixture.store.archive(&[7, 8]).await.unwrap_err();
    match err {
        BookmarkError::NotFound(lookup) => {
            assert_eq!(lookup, Lookup::Ids(vec![7, 8]));
            assert_eq!(lookup.to_string(), "id in [7, 8]");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    let err = fixture.store.restore(&[]).await.unwrap_err();
    assert!(matches!(err, BookmarkError::NotFound(Lookup::Ids(ids)) if ids.is_empty()));
}

#[tokio::test]
async fn delete_removes_row_permanently() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();

    fixture.store.delete(created.id).await.unwrap();

    let err = fixture.store.get(created.id).await.unwrap_err();
    assert!(matches!(err, BookmarkError::NotFound(Lookup::Id(_))));

    let err = fixture.store.delete(created.id).await.unwrap_err();
    assert!(matches!(err, BookmarkError::NotFound(Lookup::Id(id)) if id == created.id));
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let fixture = Fixture::start().await;

    let first = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();
    fixture.store.delete(first.id).await.unwrap();

    let second = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn page_count_uses_floor_division() {
    let fixture = Fixture::start().await;

    for i in 0..25 {
        fixture
            .store
            .create(bookmark(&format!("B{i}"), &format!("https://x.test/{i}"), &[]))
            .await
            .unwrap();
    }

    let first = fixture.store.get_page(1, 10).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.page, 1);
    assert_eq!(first.page_size, 10);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items[0].title, "B0");

    let third = fixture.store.get_page(3, 10).await.unwrap();
    assert_eq!(third.items.len(), 5);
    assert_eq!(third.items[0].title, "B20");
}

#[tokio::test]
async fn page_zero_reads_as_first_page() {
    let fixture = Fixture::start().await;

    for i in 0..3 {
        fixture
            .store
            .create(bookmark(&format!("B{i}"), &format!("https://x.test/{i}"), &[]))
            .await
            .unwrap();
    }

    let page = fixture.store.get_page(0, 2).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "B0");
}

#[tokio::test]
async fn empty_store_reports_one_page() {
    let fixture = Fixture::start().await;

    let page = fixture.store.get_page(1, 25).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn archived_bookmark_is_hidden_then_deleted() {
    let fixture = Fixture::start().await;

    let a = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();
    let b = fixture
        .store
        .create(bookmark("B", "https://x.test/b", &[]))
        .await
        .unwrap();

    fixture
        .store
        .update(BookmarkPatch::new(a.id).archived(true))
        .await
        .unwrap();

    let page = fixture.store.get_page(1, 25).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, b.id);

    let archived = fixture.store.get(a.id).await.unwrap();
    assert!(archived.is_archived());

    fixture.store.delete(a.id).await.unwrap();
    let err = fixture.store.get(a.id).await.unwrap_err();
    assert!(matches!(err, BookmarkError::NotFound(_)));
}

#[tokio::test]
async fn null_tags_column_reads_as_empty() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &["x"]))
        .await
        .unwrap();

    sqlx::query("UPDATE bookmarks SET tags = NULL WHERE id = ?")
        .bind(created.id)
        .execute(fixture.store.pool())
        .await
        .unwrap();

    let fetched = fixture.store.get(created.id).await.unwrap();
    assert!(fetched.tags.is_empty());
}

#[tokio::test]
async fn corrupt_tags_surface_as_storage_error() {
    let fixture = Fixture::start().await;

    let created = fixture
        .store
        .create(bookmark("A", "https://x.test/a", &[]))
        .await
        .unwrap();

    sqlx::query("UPDATE bookmarks SET tags = 'not json' WHERE id = ?")
        .bind(created.id)
        .execute(fixture.store.pool())
        .await
        .unwrap();

    let err = fixture.store.get(created.id).await.unwrap_err();
    assert!(matches!(err, BookmarkError::Storage(_)));
}
