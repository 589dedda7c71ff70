use sqlx::SqlitePool;
use std::sync::Arc;

use crate::database::manager::DatabaseError;
use crate::database::models::Kindergarten;

/// Demo rows inserted by the kindergarten listing when seeding is enabled
const SEED_KINDERGARTENS: [(&str, &str); 2] = [("1", "Kindergarten 1"), ("2", "Kindergarten 2")];

/// Handle to one tenant's isolated store
#[derive(Clone, Debug)]
pub struct TenantStore {
    descriptor: Arc<str>,
    pool: SqlitePool,
}

impl TenantStore {
    pub fn new(descriptor: &str, pool: SqlitePool) -> Self {
        Self {
            descriptor: Arc::from(descriptor),
            pool,
        }
    }

    /// Connection descriptor this handle was opened from
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Idempotent; runs on every open.
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kindergartens (
                id   TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert the demo rows unless they already exist
    pub async fn seed_kindergartens(&self) -> Result<(), DatabaseError> {
        for (id, name) in SEED_KINDERGARTENS {
            sqlx::query("INSERT OR IGNORE INTO kindergartens (id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    pub async fn insert_kindergarten(&self, kindergarten: &Kindergarten) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO kindergartens (id, name) VALUES (?, ?)")
            .bind(&kindergarten.id)
            .bind(&kindergarten.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_kindergartens(&self) -> Result<Vec<Kindergarten>, DatabaseError> {
        let rows = sqlx::query_as::<_, Kindergarten>("SELECT id, name FROM kindergartens ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Release the underlying connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}
