use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::database::tenant_store::TenantStore;

/// Errors from the central registry and tenant stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid connection descriptor: {0:?}")]
    InvalidDescriptor(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens isolated per-tenant stores from an organization's connection descriptor.
///
/// Every call returns a fresh handle; the caller owns it and must `close()` it.
#[async_trait]
pub trait TenantConnector: Send + Sync {
    async fn open(&self, descriptor: &str) -> Result<TenantStore, DatabaseError>;
}

/// SQLite-backed tenant connector. Each descriptor names a database file.
#[derive(Debug, Clone)]
pub struct SqliteTenantConnector {
    data_dir: PathBuf,
    acquire_timeout: Duration,
}

impl SqliteTenantConnector {
    pub fn new(data_dir: impl Into<PathBuf>, acquire_timeout: Duration) -> Self {
        Self {
            data_dir: data_dir.into(),
            acquire_timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.tenant.data_dir.clone(),
            Duration::from_secs(config.database.connection_timeout),
        )
    }

    /// Map a descriptor to a database file. Accepts bare paths and `sqlite:` URLs;
    /// relative paths land under the tenant data directory.
    fn resolve_path(&self, descriptor: &str) -> Result<PathBuf, DatabaseError> {
        let trimmed = descriptor.trim();
        let raw = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        if raw.is_empty() {
            return Err(DatabaseError::InvalidDescriptor(descriptor.to_string()));
        }

        let path = Path::new(raw);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.data_dir.join(path))
        }
    }
}

#[async_trait]
impl TenantConnector for SqliteTenantConnector {
    async fn open(&self, descriptor: &str) -> Result<TenantStore, DatabaseError> {
        let path = self.resolve_path(descriptor)?;

        // The data directory itself is created on demand, subdirectories named by descriptors are not
        tokio::fs::create_dir_all(&self.data_dir).await.map_err(|e| {
            DatabaseError::ConnectionError(format!("{}: {}", self.data_dir.display(), e))
        })?;

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .busy_timeout(self.acquire_timeout);

        // One connection per handle, nothing shared between requests
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(self.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError(format!("{}: {}", path.display(), e)))?;

        let store = TenantStore::new(descriptor, pool);
        if let Err(e) = store.ensure_schema().await {
            store.close().await;
            return Err(DatabaseError::ConnectionError(format!(
                "{}: schema setup failed: {}",
                path.display(),
                e
            )));
        }

        debug!("Opened tenant store {} at {}", store.descriptor(), path.display());
        Ok(store)
    }
}

/// Open the central registry database, creating the file when missing
pub async fn connect_central(config: &AppConfig) -> Result<SqlitePool, DatabaseError> {
    let timeout = Duration::from_secs(config.database.connection_timeout);
    let options = SqliteConnectOptions::new()
        .filename(&config.database.central)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(timeout)
        .connect_with(options)
        .await
        .map_err(|e| {
            DatabaseError::ConnectionError(format!("{}: {}", config.database.central.display(), e))
        })?;

    info!(
        max_connections = config.database.max_connections,
        "Created central database pool for: {}",
        config.database.central.display()
    );
    Ok(pool)
}
