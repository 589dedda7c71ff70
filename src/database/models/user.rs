use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Platform user. The password is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(rename = "ID", alias = "id")]
    pub id: i64,
    #[serde(rename = "Username", alias = "username")]
    pub username: String,
    #[serde(rename = "Password", alias = "password")]
    pub password: String,
    #[serde(rename = "Role", alias = "role")]
    pub role: String,
}

/// Create body; the id is assigned by the store
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    #[serde(rename = "Username", alias = "username")]
    pub username: String,
    #[serde(rename = "Password", alias = "password", default)]
    pub password: String,
    #[serde(rename = "Role", alias = "role", default)]
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(rename = "Username", alias = "username")]
    pub username: Option<String>,
    #[serde(rename = "Password", alias = "password")]
    pub password: Option<String>,
    #[serde(rename = "Role", alias = "role")]
    pub role: Option<String>,
}
