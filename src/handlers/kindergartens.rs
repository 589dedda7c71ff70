use axum::{extract::State, Extension, Json};

use crate::app::AppState;
use crate::database::models::Kindergarten;
use crate::error::ApiResult;
use crate::middleware::ResolvedTenant;

use super::utils::store_error;

/// GET /kindergartens - records of the tenant named by X-Tenant-ID
pub async fn list(
    State(state): State<AppState>,
    Extension(tenant): Extension<ResolvedTenant>,
) -> ApiResult<Json<Vec<Kindergarten>>> {
    if state.config.tenant.seed_kindergartens {
        tenant
            .store
            .seed_kindergartens()
            .await
            .map_err(|e| store_error(e, "could not seed kindergartens"))?;
    }

    let kindergartens = tenant
        .store
        .list_kindergartens()
        .await
        .map_err(|e| store_error(e, "could not list kindergartens"))?;

    tracing::debug!(
        tenant = %tenant.organization.id,
        count = kindergartens.len(),
        "Listed kindergartens"
    );
    Ok(Json(kindergartens))
}
