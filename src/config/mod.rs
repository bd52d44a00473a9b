use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::core::patterns::HOST;

fn default_host() -> String {
    HOST.to_string()
}

fn default_max_matches() -> u8 {
    5
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Lyrics site host
    #[serde(default = "default_host")]
    pub host: String,

    /// Default maximum number of search matches (1-30)
    #[serde(default = "default_max_matches")]
    pub max_matches: u8,

    /// Default blank-line insertion interval (0 disables division)
    #[serde(default)]
    pub division_interval: usize,

    /// Strip instructional annotations by default
    #[serde(default)]
    pub clean: bool,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            max_matches: default_max_matches(),
            division_interval: 0,
            clean: false,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Pick up a .env file when present (development convenience)
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let config_file = match config_path {
            Some(path) => PathBuf::from(path),
            None => Self::default_config_path()?,
        };

        if config_file.exists() {
            let content = fs::read_to_string(&config_file)?;
            config = toml::from_str(&content)?;
        }

        config.load_from_env();

        // The site caps search pages at 30 posts per request.
        config.max_matches = config.max_matches.clamp(1, 30);

        // Save a starter config on first run
        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent)?;
            }
            config.save(&config_file)?;
        }

        Ok(config)
    }

    /// Environment variables take priority over the config file.
    fn load_from_env(&mut self) {
        if let Ok(host) = env::var("LWLYRIC_HOST") {
            self.host = host;
        }

        if let Ok(matches) = env::var("LWLYRIC_MAX_MATCHES") {
            match matches.parse::<u8>() {
                Ok(value) => self.max_matches = value,
                Err(_) => warn!("Ignoring non-numeric LWLYRIC_MAX_MATCHES: {matches}"),
            }
        }

        if let Ok(interval) = env::var("LWLYRIC_DIVISION_INTERVAL") {
            match interval.parse::<usize>() {
                Ok(value) => self.division_interval = value,
                Err(_) => warn!("Ignoring non-numeric LWLYRIC_DIVISION_INTERVAL: {interval}"),
            }
        }

        if let Ok(clean) = env::var("LWLYRIC_CLEAN") {
            if let Ok(value) = clean.parse::<bool>() {
                self.clean = value;
            }
        }

        if let Ok(timeout) = env::var("LWLYRIC_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.timeout_seconds = value;
            }
        }
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "lwlyric", "lwlyric-cli")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    fn save(&self, path: &PathBuf) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
