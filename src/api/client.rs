use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::RawDrink;

/// Anything that can return the drinks whose name starts with a letter.
#[allow(async_fn_in_trait)]
pub trait DrinkSource {
    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<RawDrink>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    drinks: Option<serde_json::Value>,
}

pub struct CocktailClient {
    client: Client,
    base_url: String,
}

impl CocktailClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("cocktail-loader/1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    async fn fetch(&self, letter: char) -> Result<Vec<RawDrink>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("f", letter.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!("HTTP {}", response.status())));
        }

        let body: SearchResponse = response.json().await?;
        parse_drinks(body)
    }
}

impl DrinkSource for CocktailClient {
    async fn search_by_first_letter(&self, letter: char) -> Result<Vec<RawDrink>> {
        self.fetch(letter).await.inspect_err(|e| {
            tracing::error!(
                "Error: [{}] while making a call to [{}?f={}]",
                e,
                self.base_url,
                letter
            );
        })
    }
}

/// A null or missing `drinks` key means nothing matched.
fn parse_drinks(body: SearchResponse) -> Result<Vec<RawDrink>> {
    match body.drinks {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(list @ serde_json::Value::Array(_)) => Ok(serde_json::from_value(list)?),
        Some(other) => Err(anyhow::anyhow!("Unexpected drinks payload: {}", other).into()),
    }
}
