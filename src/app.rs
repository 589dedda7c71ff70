//! Application state and router builder
//!
//! The central registry and the tenant connector are owned by `AppState` and
//! handed to every handler through axum's `State` extractor.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::AppConfig;
use crate::database::{Registry, TenantConnector};
use crate::handlers;
use crate::middleware::{validate_tenant_middleware, X_TENANT_ID};

/// Shared application state, cloned per request
#[derive(Clone)]
pub struct AppState {
    /// Central registry of organizations and users
    pub registry: Arc<dyn Registry>,

    /// Opens per-tenant stores from connection descriptors
    pub tenants: Arc<dyn TenantConnector>,

    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        registry: Arc<dyn Registry>,
        tenants: Arc<dyn TenantConnector>,
        config: AppConfig,
    ) -> Self {
        Self {
            registry,
            tenants,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete router
///
/// ```text
/// /
/// ├── GET /health
/// ├── /organizations           (central registry)
/// │   ├── POST / GET
/// │   └── GET / PUT / DELETE /:id
/// ├── /users                   (central registry)
/// │   ├── POST / GET
/// │   └── GET / PUT / DELETE /:id
/// └── /kindergartens           (tenant scoped, requires X-Tenant-ID)
///     └── GET
/// ```
pub fn build_router(state: AppState) -> Router {
    let organization_routes = Router::new()
        .route(
            "/",
            get(handlers::organizations::list).post(handlers::organizations::create),
        )
        .route(
            "/:id",
            get(handlers::organizations::show)
                .put(handlers::organizations::update)
                .delete(handlers::organizations::delete),
        );

    let user_routes = Router::new()
        .route("/", get(handlers::users::list).post(handlers::users::create))
        .route(
            "/:id",
            get(handlers::users::show)
                .put(handlers::users::update)
                .delete(handlers::users::delete),
        );

    let kindergarten_routes = Router::new()
        .route("/", get(handlers::kindergartens::list))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            validate_tenant_middleware,
        ));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/organizations", organization_routes)
        .nest("/users", user_routes)
        .nest("/kindergartens", kindergarten_routes)
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        app = app.layer(cors_layer(&state.config));
    }

    if state.config.api.enable_request_logging {
        app = app.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );
    }

    app.with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, X_TENANT_ID.clone()])
}
