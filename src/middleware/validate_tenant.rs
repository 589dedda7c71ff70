use axum::{
    extract::{Request, State},
    http::{header::HeaderName, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::database::models::Organization;
use crate::database::tenant_store::TenantStore;
use crate::error::ApiError;

/// Header carrying the organization id on tenant-scoped routes
pub static X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");

/// Tenant resolved for the current request, injected by middleware
#[derive(Clone, Debug)]
pub struct ResolvedTenant {
    pub organization: Organization,
    pub store: TenantStore,
}

/// Resolves `X-Tenant-ID` against the central registry and opens that tenant's store.
///
/// The store handle lives for the duration of the downstream handler and is
/// closed once the response has been produced.
pub async fn validate_tenant_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let tenant_id = extract_tenant_id(request.headers())
        .ok_or_else(|| ApiError::missing_tenant("tenant ID is required"))?;

    let organization = match state.registry.find_organization(&tenant_id).await {
        Ok(Some(organization)) => organization,
        Ok(None) => {
            tracing::warn!("Tenant validation failed: tenant '{}' not found", tenant_id);
            return Err(ApiError::unknown_tenant("invalid tenant ID"));
        }
        Err(e) => {
            tracing::warn!("Tenant validation failed: lookup of '{}' errored: {}", tenant_id, e);
            return Err(ApiError::unknown_tenant("invalid tenant ID"));
        }
    };

    tracing::debug!("Tenant validation successful: {} ({})", organization.name, organization.id);

    let store = state.tenants.open(&organization.config).await.map_err(|e| {
        tracing::error!("Failed to open tenant store for '{}': {}", organization.id, e);
        ApiError::tenant_unavailable("failed to connect to tenant database")
    })?;

    request.extensions_mut().insert(ResolvedTenant {
        organization,
        store: store.clone(),
    });

    let response = next.run(request).await;
    store.close().await;

    Ok(response)
}

/// Non-empty textual `X-Tenant-ID` value, if present
pub fn extract_tenant_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(&X_TENANT_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
