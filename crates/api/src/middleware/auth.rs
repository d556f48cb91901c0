//! # Authentication Module
//!
//! Every `/api/admin` endpoint requires the configured admin token in an
//! `Authorization: Bearer <token>` header. A request that presents it gets an
//! [`AdminSession`] carrying the [`RequestContext`] passed on to the admin
//! operations.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use cabinet_core::{context::RequestContext, errors::CabinetError};
use tracing::warn;

use crate::{middleware::error_handling::AppError, ApiState};

/// An authenticated admin request.
///
/// # Example
///
/// ```ignore
/// async fn handler(AdminSession(ctx): AdminSession) -> String {
///     format!("Hello {}", ctx.admin)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession(pub RequestContext);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| {
                CabinetError::Authentication("Missing bearer token".to_string())
            })?;

        if !tokens_match(token, &state.admin_token) {
            warn!("Rejected admin request to {} with an invalid token", parts.uri.path());
            return Err(AppError(CabinetError::Authentication(
                "Invalid admin token".to_string(),
            )));
        }

        Ok(AdminSession(RequestContext::new(state.admin_name.clone())))
    }
}

/// Extracts the token from an `Authorization` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Compares two tokens without stopping at the first differing byte.
pub fn tokens_match(given: &str, expected: &str) -> bool {
    let given = given.as_bytes();
    let expected = expected.as_bytes();

    if given.len() != expected.len() {
        return false;
    }

    given
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
