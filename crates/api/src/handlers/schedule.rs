//! # Schedule Handlers
//!
//! Lists the appointment slots and runs the schedule commands: generating the
//! slots of a working day and deleting an unbooked slot. The commands
//! themselves live in `cabinet_core::schedule`; these handlers only resolve
//! the request and pick the collaborators from the shared state.

use axum::{extract::State, Json};
use cabinet_core::{
    commands::ScheduleCommand,
    errors::CabinetError,
    models::{
        dashboard::{FlashMessage, ScheduleOverview},
        slot::SlotListing,
    },
    schedule,
};
use std::sync::Arc;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

/// Returns every slot, earliest first, with the dashboard counters.
#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    AdminSession(_ctx): AdminSession,
) -> Result<Json<ScheduleOverview>, AppError> {
    let slots = cabinet_db::repositories::slot::list_slots(&state.db_pool)
        .await
        .map_err(CabinetError::Database)?;

    let stats = cabinet_db::repositories::dashboard::get_stats(&state.db_pool)
        .await
        .map_err(CabinetError::Database)?;

    Ok(Json(ScheduleOverview {
        slots: slots.into_iter().map(SlotListing::from).collect(),
        stats,
    }))
}

/// Runs an `add_daily_slots` or `delete_slot` command.
///
/// # Example request
///
/// ```json
/// {
///   "action": "add_daily_slots",
///   "date": "2024-05-06",
///   "start_time": "09:00",
///   "end_time": "12:00",
///   "break_start": "10:00",
///   "break_end": "10:30"
/// }
/// ```
#[axum::debug_handler]
pub async fn post_schedule(
    State(state): State<Arc<ApiState>>,
    AdminSession(ctx): AdminSession,
    Json(command): Json<ScheduleCommand>,
) -> Result<Json<FlashMessage>, AppError> {
    let message = schedule::execute(&ctx, &state.planner, state.slots.as_ref(), &command).await?;
    Ok(Json(message))
}
