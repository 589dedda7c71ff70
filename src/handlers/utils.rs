use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::database::manager::DatabaseError;
use crate::error::ApiError;

/// Decode a JSON request body. Content-Type is not checked.
pub fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        ApiError::invalid_json("invalid input")
    })
}

/// Translate a failed store call into a response, keeping the handler's own message
pub fn store_error(err: DatabaseError, message: &str) -> ApiError {
    match err {
        DatabaseError::NotFound(what) => ApiError::not_found(format!("{} not found", what)),
        other => {
            tracing::error!("{}: {}", message, other);
            ApiError::internal_server_error(message)
        }
    }
}
