//! Selects the repository implementations for a storage backend.

use crate::memory::{InMemoryBookRepository, InMemoryPersonRepository, InMemoryUserRepository};
use crate::mysql::{MySqlBookRepository, MySqlPersonRepository, MySqlUserRepository};
use crate::traits::{BookRepository, PersonRepository, UserRepository};
use crate::{create_pool, DatabasePool};
use erudio_config::{DatabaseConfig, StorageBackend};
use erudio_core::ErudioResult;
use std::sync::Arc;
use tracing::info;

/// The repositories one application instance works against.
#[derive(Clone)]
pub struct Repositories {
    pub person: Arc<dyn PersonRepository>,
    pub book: Arc<dyn BookRepository>,
    pub user: Arc<dyn UserRepository>,
    /// Present for the MySQL backend only.
    pub pool: Option<Arc<DatabasePool>>,
}

impl Repositories {
    /// Empty in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            person: Arc::new(InMemoryPersonRepository::new()),
            book: Arc::new(InMemoryBookRepository::new()),
            user: Arc::new(InMemoryUserRepository::new()),
            pool: None,
        }
    }

    /// MySQL repositories sharing one pool.
    #[must_use]
    pub fn mysql(pool: Arc<DatabasePool>) -> Self {
        Self {
            person: Arc::new(MySqlPersonRepository::new(Arc::clone(&pool))),
            book: Arc::new(MySqlBookRepository::new(Arc::clone(&pool))),
            user: Arc::new(MySqlUserRepository::new(Arc::clone(&pool))),
            pool: Some(pool),
        }
    }

    /// Builds the repositories named by `config.backend`.
    pub async fn from_config(config: &DatabaseConfig) -> ErudioResult<Self> {
        match config.backend {
            StorageBackend::Memory => {
                info!("Using in-memory repositories");
                Ok(Self::in_memory())
            }
            StorageBackend::Mysql => Ok(Self::mysql(create_pool(config).await?)),
        }
    }

    /// Checks the backing store; always healthy for the in-memory backend.
    pub async fn health_check(&self) -> ErudioResult<()> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").field("pool", &self.pool).finish_non_exhaustive()
    }
}
