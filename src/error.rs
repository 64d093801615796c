use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cocktail API error: {0}")]
    Api(String),

    #[error("Malformed drink record [{drink}]: {reason}")]
    MalformedRecord { drink: String, reason: String },

    #[error("No {0} value to resolve")]
    MissingDimension(&'static str),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn malformed(drink: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            drink: drink.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
