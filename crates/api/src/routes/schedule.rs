use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/admin/schedule",
        get(handlers::schedule::get_schedule).post(handlers::schedule::post_schedule),
    )
}
