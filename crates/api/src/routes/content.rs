use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

/// Largest accepted content form, images included.
pub const CONTENT_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/content",
            get(handlers::content::get_content).post(handlers::content::post_content),
        )
        .layer(DefaultBodyLimit::max(CONTENT_BODY_LIMIT))
}
