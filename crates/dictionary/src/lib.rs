use std::time::Duration;

use oxford_api::retrieve_entry;

mod entry;
mod oxford_api;

pub use entry::DictionaryEntry;

/// Oxford Dictionaries sandbox endpoint. The sandbox carries a reduced
/// word list but answers with the same response shape as the full API.
pub const DEFAULT_BASE_URL: &str = "https://od-api-sandbox.oxforddictionaries.com/api/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Application credentials issued by the dictionary service, sent as the
/// `app_id` and `app_key` headers on every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to reach the dictionary service: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("failed to decode the dictionary response: {0}")]
    Deserialize(#[source] reqwest::Error),
    #[error("the dictionary service answered with status {0}")]
    Status(u16),
    #[error("the word is not in the dictionary")]
    NotFound,
}

pub struct Dictionary {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl Dictionary {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    /// Look up `word` and return the first entry the service knows for it.
    pub async fn get_definition(&self, word: &str) -> Result<DictionaryEntry, DictionaryError> {
        retrieve_entry(&self.client, &self.base_url, &self.credentials, word).await
    }
}
