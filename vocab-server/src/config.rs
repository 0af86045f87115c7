use std::env;

use dictionary::Credentials;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4000";
const DEFAULT_DATABASE_URL: &str = "sqlite://words.db";

/// Runtime configuration, read once from the environment at startup.
///
/// The dictionary credentials are deliberately optional here: the server
/// still answers reads without them, and the coordinator reports the
/// missing configuration on the first attempted lookup instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub provider_base_url: Option<String>,
    pub credentials: Option<Credentials>,
}

impl Config {
    pub fn from_env() -> Self {
        let credentials = match (env::var("OXFORD_APP_ID"), env::var("OXFORD_APP_KEY")) {
            (Ok(app_id), Ok(app_key)) if !app_id.is_empty() && !app_key.is_empty() => {
                Some(Credentials { app_id, app_key })
            }
            _ => {
                warn!("OXFORD_APP_ID/OXFORD_APP_KEY are not set, word lookups will fail");
                None
            }
        };
        Self {
            bind_addr: env::var("VOCAB_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            database_url: env::var("VOCAB_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            provider_base_url: env::var("OXFORD_BASE_URL").ok(),
            credentials,
        }
    }
}
