mod bookmarks;
mod health;

pub use bookmarks::{
    archive_bookmark_handler, create_bookmark_handler, delete_bookmark_handler,
    get_bookmark_handler, list_bookmarks_handler, lookup_bookmark_handler,
    restore_bookmark_handler, update_bookmark_handler,
};
pub use health::{health_handler, not_found_handler};
