#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use kindergarten_registry::app::{build_router, AppState};
use kindergarten_registry::config::AppConfig;
use kindergarten_registry::database::models::{Kindergarten, Organization};
use kindergarten_registry::database::{
    connect_central, DatabaseError, Registry, SqliteRegistry, SqliteTenantConnector, TenantConnector,
    TenantStore,
};

/// Wraps the SQLite connector and counts how many tenant stores were opened
pub struct CountingConnector {
    inner: SqliteTenantConnector,
    opens: Arc<AtomicUsize>,
}

#[async_trait]
impl TenantConnector for CountingConnector {
    async fn open(&self, descriptor: &str) -> Result<TenantStore, DatabaseError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.inner.open(descriptor).await
    }
}

/// In-process application backed by SQLite files in a temporary directory
pub struct TestApp {
    pub router: Router,
    pub registry: Arc<SqliteRegistry>,
    pub tenants: SqliteTenantConnector,
    opens: Arc<AtomicUsize>,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Result<Self> {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(customize: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let dir = tempfile::tempdir()?;

        let mut config = AppConfig::development();
        config.database.central = dir.path().join("central.db");
        config.tenant.data_dir = dir.path().to_path_buf();
        config.api.enable_request_logging = false;
        customize(&mut config);

        let pool = connect_central(&config).await?;
        let registry = Arc::new(SqliteRegistry::new(pool).await?);
        let tenants = SqliteTenantConnector::from_config(&config);
        let opens = Arc::new(AtomicUsize::new(0));
        let connector = Arc::new(CountingConnector {
            inner: tenants.clone(),
            opens: opens.clone(),
        });

        let state = AppState::new(registry.clone(), connector, config);
        Ok(Self {
            router: build_router(state),
            registry,
            tenants,
            opens,
            _dir: dir,
        })
    }

    /// Tenant stores opened through the application so far
    pub fn tenant_opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub async fn create_organization(&self, id: &str, name: &str, config: &str) -> Result<Organization> {
        let organization = Organization {
            id: id.to_string(),
            name: name.to_string(),
            config: config.to_string(),
        };
        Ok(self.registry.create_organization(organization).await?)
    }

    /// Write kindergartens straight into a tenant store, bypassing the API
    pub async fn insert_kindergartens(&self, descriptor: &str, rows: &[(&str, &str)]) -> Result<()> {
        let store = self.tenants.open(descriptor).await?;
        for (id, name) in rows {
            store
                .insert_kindergarten(&Kindergarten {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .await?;
        }
        store.close().await;
        Ok(())
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, body))
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.send(Request::builder().uri(uri).body(Body::empty())?).await
    }

    pub async fn get_as_tenant(&self, uri: &str, tenant: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .uri(uri)
            .header("X-Tenant-ID", tenant)
            .body(Body::empty())?;
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: impl Into<Body>) -> Result<(StatusCode, Value)> {
        self.with_body(Method::POST, uri, body.into()).await
    }

    pub async fn put(&self, uri: &str, body: impl Into<Body>) -> Result<(StatusCode, Value)> {
        self.with_body(Method::PUT, uri, body.into()).await
    }

    pub async fn delete(&self, uri: &str) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())?;
        self.send(request).await
    }

    async fn with_body(&self, method: Method, uri: &str, body: Body) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)?;
        self.send(request).await
    }
}
