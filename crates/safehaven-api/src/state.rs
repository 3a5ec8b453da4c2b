//! Application state wiring the store and chat session together.
//!
//! The core types are generic over their collaborators; AppState pins them
//! to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use safehaven_core::chat::{ChatSessionManager, SessionSettings};
use safehaven_core::store::{StoreFacade, StoreOptions};
use safehaven_infra::config::{load_config, resolve_data_dir};
use safehaven_infra::llm::GeminiConnector;
use safehaven_infra::remote::HttpRemoteClient;
use safehaven_infra::secret::EnvCredential;
use safehaven_infra::sqlite::pool::database_url;
use safehaven_infra::sqlite::{DatabasePool, SqliteLocalCache};
use safehaven_types::config::HavenConfig;

pub type ConcreteStore = StoreFacade<HttpRemoteClient, SqliteLocalCache>;

pub type ConcreteChat = ChatSessionManager<GeminiConnector, EnvCredential>;

/// Shared application state used by every command.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConcreteStore>,
    pub config: HavenConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Load config, open the local cache and build the store.
    ///
    /// `api_url` overrides the configured backend base URL.
    pub async fn init(api_url: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = load_config(&data_dir).await;
        if let Some(url) = api_url {
            config.api_base_url = url;
        }

        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        let cache = SqliteLocalCache::new(db_pool.clone());
        let remote = HttpRemoteClient::new(
            &config.api_base_url,
            Duration::from_millis(config.remote_timeout_ms),
        )?;
        let store = StoreFacade::new(remote, cache, StoreOptions::from(&config));

        tracing::debug!(
            data_dir = %data_dir.display(),
            api = %config.api_base_url,
            "Application state initialized"
        );

        Ok(Self {
            store: Arc::new(store),
            config,
            data_dir,
            db_pool,
        })
    }

    /// A fresh chat session. Connects lazily on the first turn.
    pub fn chat_session(&self) -> anyhow::Result<ConcreteChat> {
        let connector = match &self.config.chat.base_url {
            Some(url) => GeminiConnector::with_base_url(url)?,
            None => GeminiConnector::new()?,
        };
        Ok(ChatSessionManager::new(
            connector,
            EnvCredential::new(&self.config.chat.api_key_env),
            SessionSettings::from(&self.config.chat),
        ))
    }
}
