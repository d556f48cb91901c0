//! # Error Handling Middleware
//!
//! This module maps domain errors to HTTP status codes and JSON error bodies,
//! so every failing admin command answers with the same shape:
//!
//! ```json
//! { "success": false, "error": "Booked slots cannot be deleted" }
//! ```
//!
//! Storage and internal failures are logged with their full detail and
//! reported to the client as a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cabinet_core::errors::CabinetError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps a `CabinetError` and implements `IntoResponse`, so
/// handlers can return `Result<_, AppError>` and use `?` on both domain
/// results and repository results.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use cabinet_api::middleware::error_handling::AppError;
/// use cabinet_core::errors::CabinetError;
/// use uuid::Uuid;
///
/// async fn handler(id: Option<Uuid>) -> Result<Json<Uuid>, AppError> {
///     let id = id.ok_or_else(|| CabinetError::Validation("Missing ID".to_string()))?;
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CabinetError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CabinetError::NotFound(_) => StatusCode::NOT_FOUND,
            CabinetError::Validation(_) => StatusCode::BAD_REQUEST,
            CabinetError::Refusal(_) => StatusCode::CONFLICT,
            CabinetError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CabinetError::Authorization(_) => StatusCode::FORBIDDEN,
            CabinetError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CabinetError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({
            "success": false,
            "error": self.0.public_message(),
        }));

        (status, body).into_response()
    }
}

/// Allows `?` on `CabinetResult` values inside handlers.
impl From<CabinetError> for AppError {
    fn from(err: CabinetError) -> Self {
        AppError(err)
    }
}

/// Repository failures surface as `CabinetError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CabinetError::Database(err))
    }
}

/// Maps a `CabinetError` straight to an HTTP response.
pub fn map_error(err: CabinetError) -> Response {
    AppError(err).into_response()
}
