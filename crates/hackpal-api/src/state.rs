//! Application state wiring all services together.
//!
//! Services are generic over repository, inference, and hasher traits;
//! AppState pins them to the SQLite repositories, the Argon2 hasher, and a
//! type-erased inference client.

use std::path::Path;
use std::sync::Arc;

use hackpal_core::chat::service::ConversationService;
use hackpal_core::inference::box_client::BoxInferenceClient;
use hackpal_core::service::account::AccountService;
use hackpal_infra::config::database_url;
use hackpal_infra::crypto::password::Argon2CredentialHasher;
use hackpal_infra::inference::http::HttpInferenceClient;
use hackpal_infra::sqlite::message::SqliteMessageRepository;
use hackpal_infra::sqlite::pool::DatabasePool;
use hackpal_infra::sqlite::session::SqliteSessionRepository;
use hackpal_infra::sqlite::user::SqliteUserRepository;
use hackpal_types::config::ServerConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteConversationService = ConversationService<
    SqliteUserRepository,
    SqliteSessionRepository,
    SqliteMessageRepository,
    BoxInferenceClient,
>;

pub type ConcreteAccountService = AccountService<SqliteUserRepository, Argon2CredentialHasher>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub conversations: Arc<ConcreteConversationService>,
    pub accounts: Arc<ConcreteAccountService>,
    pub config: Arc<ServerConfig>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Open the database and connect the HTTP inference client from `config`.
    pub async fn init(config: ServerConfig, data_dir: &Path) -> anyhow::Result<Self> {
        let db_url = database_url(&config, data_dir).await?;
        let db_pool = DatabasePool::new(&db_url).await?;

        let inference =
            HttpInferenceClient::new(config.inference_url.clone(), config.inference_timeout_secs)?;
        tracing::info!(
            url = %inference.url(),
            timeout_secs = config.inference_timeout_secs,
            "Inference collaborator configured"
        );

        Ok(Self::from_parts(
            db_pool,
            BoxInferenceClient::new(inference),
            config,
        ))
    }

    /// Wire services from an open pool and any inference client.
    pub fn from_parts(
        db_pool: DatabasePool,
        inference: BoxInferenceClient,
        config: ServerConfig,
    ) -> Self {
        let users = SqliteUserRepository::new(db_pool.clone());

        let conversations = ConversationService::new(
            users.clone(),
            SqliteSessionRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
            inference,
        );
        let accounts = AccountService::new(users, Argon2CredentialHasher::new());

        Self {
            conversations: Arc::new(conversations),
            accounts: Arc::new(accounts),
            config: Arc::new(config),
            db_pool,
        }
    }
}
