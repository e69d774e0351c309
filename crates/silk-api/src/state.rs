//! Application state wiring services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the REST API. Services are generic over store traits in silk-core;
//! AppState pins them to the SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use silk_core::chat::service::ConversationService;
use silk_infra::gateway::{GatewayClient, GatewayConfig};
use silk_infra::sqlite::conversation::SqliteConversationStore;
use silk_infra::sqlite::pool::DatabasePool;
use silk_infra::sqlite::profile::SqliteProfileStore;

/// Concrete conversation service pinned to the SQLite store.
pub type ConcreteConversationService = ConversationService<SqliteConversationStore>;

/// Shared application state for CLI commands and REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub conversations: Arc<ConcreteConversationService>,
    pub profiles: Arc<SqliteProfileStore>,
    /// Absent when the gateway credential is not configured; the chat
    /// relay then refuses requests with a configuration error.
    pub gateway: Option<Arc<GatewayClient>>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        Self::init_at(data_dir).await
    }

    /// Initialize against an explicit data directory (used by tests).
    pub async fn init_at(data_dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("silk.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        // Fail fast on a missing credential, but keep serving the rest of
        // the API: only the relay endpoint depends on the gateway.
        let gateway = match GatewayConfig::from_env() {
            Ok(config) => Some(Arc::new(GatewayClient::new(config))),
            Err(err) => {
                tracing::error!(error = %err, "gateway credential not configured; chat relay disabled");
                None
            }
        };

        let conversations =
            ConversationService::new(SqliteConversationStore::new(db_pool.clone()));
        let profiles = SqliteProfileStore::new(db_pool.clone());

        Ok(Self {
            conversations: Arc::new(conversations),
            profiles: Arc::new(profiles),
            gateway,
            data_dir,
            db_pool,
        })
    }
}

/// Resolve the data directory: `SILK_DATA_DIR` env var or `~/.silk`.
fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SILK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".silk")
}
