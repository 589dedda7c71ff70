use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, Organization, OrganizationPatch, User, UserPatch};

/// Central registry of organizations and platform users, shared by all tenants
#[async_trait]
pub trait Registry: Send + Sync {
    async fn find_organization(&self, id: &str) -> Result<Option<Organization>, DatabaseError>;
    async fn create_organization(&self, organization: Organization) -> Result<Organization, DatabaseError>;
    async fn list_organizations(&self) -> Result<Vec<Organization>, DatabaseError>;
    async fn update_organization(
        &self,
        id: &str,
        patch: OrganizationPatch,
    ) -> Result<Organization, DatabaseError>;
    async fn delete_organization(&self, id: &str) -> Result<(), DatabaseError>;

    async fn find_user(&self, id: i64) -> Result<Option<User>, DatabaseError>;
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, DatabaseError>;
    async fn delete_user(&self, id: i64) -> Result<(), DatabaseError>;

    /// Ping the backing store
    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Registry kept in the central SQLite database
#[derive(Clone, Debug)]
pub struct SqliteRegistry {
    pool: SqlitePool,
}

impl SqliteRegistry {
    /// Wrap an open pool and make sure the registry tables exist
    pub async fn new(pool: SqlitePool) -> Result<Self, DatabaseError> {
        let registry = Self { pool };
        registry.ensure_schema().await?;
        info!("Central registry schema ready");
        Ok(registry)
    }

    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS organizations (
                id     TEXT PRIMARY KEY NOT NULL,
                name   TEXT NOT NULL DEFAULT '',
                config TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL DEFAULT '',
                role     TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed central database pool");
    }
}

#[async_trait]
impl Registry for SqliteRegistry {
    async fn find_organization(&self, id: &str) -> Result<Option<Organization>, DatabaseError> {
        let row = sqlx::query_as::<_, Organization>("SELECT id, name, config FROM organizations WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_organization(&self, organization: Organization) -> Result<Organization, DatabaseError> {
        sqlx::query("INSERT INTO organizations (id, name, config) VALUES (?, ?, ?)")
            .bind(&organization.id)
            .bind(&organization.name)
            .bind(&organization.config)
            .execute(&self.pool)
            .await?;
        Ok(organization)
    }

    async fn list_organizations(&self) -> Result<Vec<Organization>, DatabaseError> {
        let rows = sqlx::query_as::<_, Organization>("SELECT id, name, config FROM organizations ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_organization(
        &self,
        id: &str,
        patch: OrganizationPatch,
    ) -> Result<Organization, DatabaseError> {
        sqlx::query_as::<_, Organization>(
            r#"
            UPDATE organizations
            SET name = COALESCE(?, name), config = COALESCE(?, config)
            WHERE id = ?
            RETURNING id, name, config
            "#,
        )
        .bind(patch.name)
        .bind(patch.config)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("organization {}", id)))
    }

    async fn delete_organization(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("organization {}", id)));
        }
        Ok(())
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, User>("SELECT id, username, password, role FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let result = sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.role)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: user.username,
            password: user.password,
            role: user.role,
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let rows = sqlx::query_as::<_, User>("SELECT id, username, password, role FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE(?, username),
                password = COALESCE(?, password),
                role     = COALESCE(?, role)
            WHERE id = ?
            RETURNING id, username, password, role
            "#,
        )
        .bind(patch.username)
        .bind(patch.password)
        .bind(patch.role)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("user {}", id)))
    }

    async fn delete_user(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
