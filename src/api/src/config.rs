//! Configuration for the WNBA API.

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Store file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_plays_path")]
    pub plays_path: String,
    #[serde(default = "default_schedule_path")]
    pub schedule_path: String,
}

fn default_plays_path() -> String {
    "wnba_pbp.db".to_string()
}

fn default_schedule_path() -> String {
    "wnba_schedule.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            plays_path: default_plays_path(),
            schedule_path: default_schedule_path(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from config file and environment
    pub fn load() -> anyhow::Result<Self> {
        Self::build(
            config::File::with_name("config").required(false),
            std::env::var("PORT").ok(),
        )
    }

    fn build<S>(file: S, port: Option<String>) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(file)
            // WNBA_SERVER__PORT, WNBA_STORAGE__PLAYS_PATH, ...
            .add_source(
                config::Environment::with_prefix("WNBA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Bare PORT wins over everything but CLI flags
            .set_override_option("server.port", port)?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
