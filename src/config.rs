use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

const APP_DIR: &str = "cocktail-loader";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// First letters searched, in order.
    #[serde(default = "default_letters")]
    pub letters: String,

    #[serde(default = "default_log_file")]
    pub log_file: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_db_path() -> String {
    data_dir().join("cocktails.db").to_string_lossy().to_string()
}

fn default_api_url() -> String {
    "https://www.thecocktaildb.com/api/json/v1/1/search.php".to_string()
}

fn default_letters() -> String {
    ('a'..='z').collect()
}

fn default_log_file() -> Option<String> {
    Some(data_dir().join("cocktails_logs.txt").to_string_lossy().to_string())
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            api_url: default_api_url(),
            letters: default_letters(),
            log_file: default_log_file(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(AppError::Config("api_url must not be empty".to_string()));
        }
        if self.letters.is_empty() {
            return Err(AppError::Config("letters must not be empty".to_string()));
        }
        if let Some(bad) = self.letters.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(AppError::Config(format!(
                "letters may only contain a-z, found {:?}",
                bad
            )));
        }
        Ok(())
    }

    /// Letters to search, lower-cased and de-duplicated in first-seen order.
    pub fn search_letters(&self) -> Vec<char> {
        let mut letters = Vec::new();
        for c in self.letters.chars().map(|c| c.to_ascii_lowercase()) {
            if !letters.contains(&c) {
                letters.push(c);
            }
        }
        letters
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}
