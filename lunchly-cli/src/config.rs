//! Configuration for the lunchly CLI
//!
//! Settings come from `~/.lunchly/config.toml` (or `$LUNCHLY_CONFIG`),
//! and a missing file means defaults. Command-line flags and environment
//! variables override the file.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use lunchly_server::db::pool::DEFAULT_MAX_CONNECTIONS;

/// Default database when nothing is configured
pub const DEFAULT_DATABASE_URL: &str = "sqlite://lunchly.db";

/// Centralized configuration for lunchly
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LunchlyConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl LunchlyConfig {
    /// Load config from the config path, falling back to defaults if the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;

        Self::from_toml_str(&content)
            .context(format!("Failed to parse config file {:?} (invalid TOML)", config_path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get config file path: `$LUNCHLY_CONFIG` or ~/.lunchly/config.toml
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("LUNCHLY_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lunchly/config.toml")
    }

    /// Override the database URL when one was given on the command line
    /// or through `DATABASE_URL`.
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.database.url = url;
        }
        self
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
}

pub fn run_config(args: ConfigArgs, config: &LunchlyConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", LunchlyConfig::config_path().display());
        }
        ConfigCommands::Show => {
            let toml_str =
                toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
            println!("{}", toml_str);
        }
    }
    Ok(())
}
