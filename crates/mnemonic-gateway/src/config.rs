use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use typed_builder::TypedBuilder;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 9753;
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DATABASE_FILE_NAME: &str = "mnemonic.sqlite";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Address in a form accepted by `TcpListener::bind`.
    pub fn address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

/// Contents of the optional `config.json`. Absent keys take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub server: ServerConfig,
}

impl UserConfig {
    /// Reads `config.json` from `config_home`, falling back to defaults
    /// when the file does not exist.
    pub fn load(config_home: &Path) -> Result<Self, ConfigError> {
        let path = config_home.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Fully resolved process configuration.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Config {
    pub config_home: PathBuf,
    pub data_home: PathBuf,
    #[builder(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Resolves configuration from the given directories, applying
    /// `listen_addr` over whatever the config file says.
    pub fn load(
        config_home: PathBuf,
        data_home: PathBuf,
        listen_addr: Option<SocketAddr>,
    ) -> Result<Self, ConfigError> {
        let mut server = UserConfig::load(&config_home)?.server;
        if let Some(addr) = listen_addr {
            server.host = addr.ip().to_string();
            server.port = addr.port();
        }

        Ok(Self::builder()
            .config_home(config_home)
            .data_home(data_home)
            .server(server)
            .build())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_home.join(DATABASE_FILE_NAME)
    }

    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database_path().display())
    }
}
