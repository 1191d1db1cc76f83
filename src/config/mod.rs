use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub mod duration_serde;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub web: WebConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Leaderboard cache and ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// How long a cached snapshot stays fresh before a read rebuilds it
    #[serde(default = "default_cache_ttl", with = "duration_serde::duration")]
    pub cache_ttl: Duration,
    /// Number of ranked entries served per snapshot
    #[serde(default = "default_top_entries")]
    pub top_entries: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cache_ttl() -> Duration {
    Duration::from_secs(30)
}

fn default_top_entries() -> u64 {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            web: WebConfig::default(),
            leaderboard: LeaderboardConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/leaderboard.db".to_string(),
            max_connections: Some(10),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            cache_ttl: default_cache_ttl(),
            top_entries: default_top_entries(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from_file(&config_file)
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_leaderboard_config() {
        let config = LeaderboardConfig::default();

        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.top_entries, 20);
    }

    #[test]
    fn test_cache_ttl_parses_humantime_strings() {
        let config: Config = toml::from_str(
            r#"
            [database]
            url = "sqlite::memory:"

            [web]

            [leaderboard]
            cache_ttl = "45s"
            top_entries = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.leaderboard.cache_ttl, Duration::from_secs(45));
        assert_eq!(config.leaderboard.top_entries, 10);
    }

    #[test]
    fn test_missing_leaderboard_section_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [database]
            url = "sqlite::memory:"

            [web]
            host = "127.0.0.1"
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.web.port, 9000);
        assert_eq!(config.leaderboard.cache_ttl, Duration::from_secs(30));
    }
}
