use axum::{
    extract::{Path, State},
    Json,
};
use cabinet_core::{
    commands::ContactCommand,
    errors::CabinetError,
    inbox,
    models::{
        contact::{Contact, ContactDetail},
        dashboard::FlashMessage,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminSession, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_contacts(
    State(state): State<Arc<ApiState>>,
    AdminSession(_ctx): AdminSession,
) -> Result<Json<Vec<Contact>>, AppError> {
    let contacts = state
        .contacts
        .list_contacts()
        .await
        .map_err(CabinetError::Database)?;

    Ok(Json(contacts))
}

/// Returns a contact with its attachments. Opening an unread contact marks it read.
#[axum::debug_handler]
pub async fn get_contact(
    State(state): State<Arc<ApiState>>,
    AdminSession(ctx): AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactDetail>, AppError> {
    let detail = inbox::open_contact(&ctx, state.contacts.as_ref(), id).await?;

    Ok(Json(detail))
}

/// Runs a `mark_read`, `mark_new` or `delete` command on one contact.
#[axum::debug_handler]
pub async fn post_contact(
    State(state): State<Arc<ApiState>>,
    AdminSession(ctx): AdminSession,
    Json(command): Json<ContactCommand>,
) -> Result<Json<FlashMessage>, AppError> {
    let message = inbox::execute(&ctx, state.contacts.as_ref(), &command).await?;

    Ok(Json(message))
}
