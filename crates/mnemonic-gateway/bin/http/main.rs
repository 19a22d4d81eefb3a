mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mnemonic_core::BookmarkStore;
use mnemonic_gateway::{App, AppState, Config};
use mnemonic_storage::SqliteBookmarkStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{LogFormat, CLI};

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CLI::parse();
    init_tracing(cli.log_format);

    let config = Config::load(cli.config_home()?, cli.data_home()?, cli.listen_addr)?;

    info!(
        config_home = %config.config_home.display(),
        database = %config.database_path().display(),
        log_format = %cli.log_format,
        "starting mnemonic server"
    );

    tokio::fs::create_dir_all(&config.data_home)
        .await
        .with_context(|| format!("could not create {}", config.data_home.display()))?;

    let store = SqliteBookmarkStore::connect(&config.database_url())
        .await
        .context("could not open bookmark database")?;
    store
        .init()
        .await
        .context("failed to initialize bookmarks schema")?;

    let app = App::router(AppState::new(Arc::new(store)));

    let listener = TcpListener::bind(config.server.address())
        .await
        .with_context(|| format!("could not bind {}:{}", config.server.host, config.server.port))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Text => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
