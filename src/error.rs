// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager::DatabaseError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    InvalidJson(String),
    MissingTenant(String),
    UnknownTenant(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    TenantUnavailable(String),
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingTenant(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownTenant(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TenantUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidJson(msg) => msg,
            ApiError::MissingTenant(msg) => msg,
            ApiError::UnknownTenant(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::TenantUnavailable(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::MissingTenant(_) => "MISSING_TENANT",
            ApiError::UnknownTenant(_) => "UNKNOWN_TENANT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::TenantUnavailable(_) => "TENANT_UNAVAILABLE",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

impl ApiError {
    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn missing_tenant(message: impl Into<String>) -> Self {
        ApiError::MissingTenant(message.into())
    }

    pub fn unknown_tenant(message: impl Into<String>) -> Self {
        ApiError::UnknownTenant(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn tenant_unavailable(message: impl Into<String>) -> Self {
        ApiError::TenantUnavailable(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(format!("{} not found", msg)),
            e @ (DatabaseError::InvalidDescriptor(_) | DatabaseError::ConnectionError(_)) => {
                tracing::error!("Tenant store unavailable: {}", e);
                ApiError::tenant_unavailable("failed to connect to tenant database")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_errors_are_client_errors() {
        assert_eq!(ApiError::missing_tenant("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unknown_tenant("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::tenant_unavailable("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn database_errors_map_to_status() {
        let not_found: ApiError = DatabaseError::NotFound("organization org1".into()).into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message(), "organization org1 not found");

        let conn: ApiError = DatabaseError::ConnectionError("boom".into()).into();
        assert_eq!(conn.error_code(), "TENANT_UNAVAILABLE");

        let sqlx: ApiError = DatabaseError::Sqlx(sqlx::Error::RowNotFound).into();
        assert_eq!(sqlx.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(sqlx.message(), "Database error occurred");
    }

    #[test]
    fn json_body_shape() {
        let body = ApiError::invalid_json("invalid input").to_json();
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "invalid input");
        assert_eq!(body["code"], "INVALID_JSON");
    }
}
