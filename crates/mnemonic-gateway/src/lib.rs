//! HTTP gateway for the Mnemonic bookmark service.
//!
//! Exposes a JSON API over any [`BookmarkStore`](mnemonic_core::BookmarkStore)
//! and holds the configuration used by the `mnemonicd` binary.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use config::{Config, ConfigError, ServerConfig};
pub use state::AppState;
