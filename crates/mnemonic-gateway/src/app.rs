use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    archive_bookmark_handler, create_bookmark_handler, delete_bookmark_handler,
    get_bookmark_handler, health_handler, list_bookmarks_handler, lookup_bookmark_handler,
    not_found_handler, restore_bookmark_handler, update_bookmark_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route(
                "/api/bookmarks",
                get(list_bookmarks_handler).post(create_bookmark_handler),
            )
            .route("/api/bookmarks/lookup", get(lookup_bookmark_handler))
            .route(
                "/api/bookmarks/{id}",
                get(get_bookmark_handler)
                    .patch(update_bookmark_handler)
                    .delete(delete_bookmark_handler),
            )
            .route("/api/bookmarks/{id}/archive", post(archive_bookmark_handler))
            .route("/api/bookmarks/{id}/restore", post(restore_bookmark_handler))
            .fallback(not_found_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
