use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

pub const CONFIG_HOME_ENV: &str = "MNEMONIC_CONFIG_HOME";
pub const DATA_HOME_ENV: &str = "MNEMONIC_DATA_HOME";
pub const LISTEN_ADDR_ENV: &str = "MNEMONIC_LISTEN_ADDR";
pub const LOG_FORMAT_ENV: &str = "MNEMONIC_LOG_FORMAT";

/// Directory created under the platform config and data directories.
const APP_DIR: &str = "mnemonic";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mnemonicd")]
pub struct CLI {
    /// Directory holding `config.json`.
    #[arg(long, env = CONFIG_HOME_ENV)]
    pub config_home: Option<PathBuf>,

    /// Directory holding the bookmark database.
    #[arg(long, env = DATA_HOME_ENV)]
    pub data_home: Option<PathBuf>,

    /// Overrides the host and port from `config.json`.
    #[arg(long, env = LISTEN_ADDR_ENV)]
    pub listen_addr: Option<SocketAddr>,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,
}

impl CLI {
    pub fn config_home(&self) -> anyhow::Result<PathBuf> {
        self.config_home
            .clone()
            .or_else(|| dirs_next::config_dir().map(|dir| dir.join(APP_DIR)))
            .with_context(|| format!("no config directory found, set {CONFIG_HOME_ENV}"))
    }

    pub fn data_home(&self) -> anyhow::Result<PathBuf> {
        self.data_home
            .clone()
            .or_else(|| dirs_next::data_dir().map(|dir| dir.join(APP_DIR)))
            .with_context(|| format!("no data directory found, set {DATA_HOME_ENV}"))
    }
}
