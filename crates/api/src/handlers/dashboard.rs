use axum::{extract::State, Json};
use cabinet_core::{
    errors::CabinetError,
    models::dashboard::{DashboardResponse, RecentContact, UpcomingAppointment},
};
use cabinet_db::repositories::dashboard as repo;
use std::sync::Arc;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

/// Number of entries shown in each dashboard list.
pub const DASHBOARD_LIST_LIMIT: i64 = 5;

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<Arc<ApiState>>,
    AdminSession(_ctx): AdminSession,
) -> Result<Json<DashboardResponse>, AppError> {
    let stats = repo::get_stats(&state.db_pool)
        .await
        .map_err(CabinetError::Database)?;

    let recent_contacts = repo::get_recent_contacts(&state.db_pool, DASHBOARD_LIST_LIMIT)
        .await
        .map_err(CabinetError::Database)?;

    let upcoming_appointments =
        repo::get_upcoming_appointments(&state.db_pool, DASHBOARD_LIST_LIMIT)
            .await
            .map_err(CabinetError::Database)?;

    Ok(Json(DashboardResponse {
        stats,
        recent_contacts: recent_contacts.into_iter().map(RecentContact::from).collect(),
        upcoming_appointments: upcoming_appointments
            .into_iter()
            .map(UpcomingAppointment::from)
            .collect(),
    }))
}
