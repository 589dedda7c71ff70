use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Kindergarten;

/// Registry entry for one tenant. `config` is the tenant store's connection descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Organization {
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    #[serde(rename = "Name", alias = "name", default)]
    pub name: String,
    #[serde(rename = "Config", alias = "config", default)]
    pub config: String,
}

/// Partial update body; fields left out keep their stored values
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationPatch {
    #[serde(rename = "Name", alias = "name")]
    pub name: Option<String>,
    #[serde(rename = "Config", alias = "config")]
    pub config: Option<String>,
}

/// Organization as returned by the listing, with its tenant's kindergartens attached
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationListing {
    #[serde(flatten)]
    pub organization: Organization,
    #[serde(rename = "Kindergartens")]
    pub kindergartens: Vec<Kindergarten>,
}
