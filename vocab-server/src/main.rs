use std::sync::Arc;

use dictionary::Dictionary;
use tokio::net::TcpListener;

use vocab_server::config::Config;
use vocab_server::coordinator::{Coordinator, LookupProvider};
use vocab_server::server::build_router;
use vocab_server::storage::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vocab_server=debug".into()),
        )
        .init();

    let config = Config::from_env();

    let store = SqliteStore::initialize(&config.database_url).await?;
    tracing::info!(url = %config.database_url, "word store ready");

    let provider = config.credentials.clone().map(|credentials| {
        let dictionary = match &config.provider_base_url {
            Some(base_url) => Dictionary::with_base_url(credentials, base_url.as_str()),
            None => Dictionary::new(credentials),
        };
        Arc::new(dictionary) as Arc<dyn LookupProvider>
    });

    let coordinator = Arc::new(Coordinator::new(Arc::new(store), provider));
    let app = build_router(coordinator);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("vocab-server listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
