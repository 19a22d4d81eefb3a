mod bookmark;
mod error;
mod health;

pub use bookmark::{CreateBookmarkRequest, LookupQuery, PageQuery, UpdateBookmarkRequest};
pub use error::ErrorResponse;
pub use health::HealthResponse;
