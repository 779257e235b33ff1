use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::models::DictionaryEntry;
use super::DictionaryLookup;

pub const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Word not found in dictionary: {0}")]
    NotFound(String),
    #[error("Dictionary error: {status}")]
    Server { status: u16 },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Client for the free dictionary API
pub struct DictionaryClient {
    client: Client,
    base_url: String,
}

impl DictionaryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DictionaryError> {
        // Normalize URL - ensure no trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DictionaryError::InvalidUrl(
                "URL must start with http:// or https://".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self { client, base_url })
    }
}

fn entry_url(base_url: &str, word: &str) -> String {
    format!("{}/{}", base_url, urlencoding::encode(word))
}

#[async_trait]
impl DictionaryLookup for DictionaryClient {
    async fn lookup(&self, word: &str) -> Result<DictionaryEntry, DictionaryError> {
        let url = entry_url(&self.base_url, word);
        log::debug!("Dictionary lookup: {}", url);

        let response = self.client.get(&url).send().await?;
        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(DictionaryError::NotFound(word.to_string())),
            status => {
                return Err(DictionaryError::Server {
                    status: status.as_u16(),
                })
            }
        }

        let entries: Vec<DictionaryEntry> = response.json().await?;
        entries
            .into_iter()
            .next()
            .ok_or_else(|| DictionaryError::NotFound(word.to_string()))
    }
}
