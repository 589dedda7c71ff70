//! /organizations CRUD against the central registry

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::database::manager::DatabaseError;
use crate::database::models::{Organization, OrganizationListing, OrganizationPatch};
use crate::error::{ApiError, ApiResult};

use super::utils::{decode_body, store_error};

/// POST /organizations
pub async fn create(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<Organization>> {
    let organization: Organization = decode_body(&body)?;

    let organization = state
        .registry
        .create_organization(organization)
        .await
        .map_err(|e| store_error(e, "could not create organization"))?;

    tracing::info!("Created organization {}", organization.id);
    Ok(Json(organization))
}

/// GET /organizations - every organization with the kindergartens from its own store.
///
/// Opens one tenant store per organization, one after another.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<OrganizationListing>>> {
    let organizations = state
        .registry
        .list_organizations()
        .await
        .map_err(|e| store_error(e, "could not list organizations"))?;

    let mut listings = Vec::with_capacity(organizations.len());
    for organization in organizations {
        tracing::debug!("Listing kindergartens of {}", organization.id);
        let store = state.tenants.open(&organization.config).await?;

        let kindergartens = store.list_kindergartens().await;
        store.close().await;
        let kindergartens = kindergartens.map_err(|e| store_error(e, "could not list kindergartens"))?;

        listings.push(OrganizationListing {
            organization,
            kindergartens,
        });
    }

    Ok(Json(listings))
}

/// GET /organizations/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Organization>> {
    find(&state, &id).await.map(Json)
}

/// PUT /organizations/:id - fields missing from the body keep their stored values
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Organization>> {
    find(&state, &id).await?;
    let patch: OrganizationPatch = decode_body(&body)?;

    let organization = state
        .registry
        .update_organization(&id, patch)
        .await
        .map_err(|e| store_error(e, "could not update organization"))?;

    Ok(Json(organization))
}

/// DELETE /organizations/:id - 204 whether or not the row existed
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    match state.registry.delete_organization(&id).await {
        Ok(()) => {
            tracing::info!("Deleted organization {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(DatabaseError::NotFound(_)) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(store_error(e, "could not delete organization")),
    }
}

async fn find(state: &AppState, id: &str) -> ApiResult<Organization> {
    state
        .registry
        .find_organization(id)
        .await
        .map_err(|e| store_error(e, "could not load organization"))?
        .ok_or_else(|| ApiError::not_found("organization not found"))
}
