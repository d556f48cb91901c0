use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/contacts",
            get(handlers::contacts::list_contacts).post(handlers::contacts::post_contact),
        )
        .route("/api/admin/contacts/:id", get(handlers::contacts::get_contact))
}
