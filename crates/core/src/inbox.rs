//! Contact inbox operations: reading a message and the commands the admin
//! runs on it.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    commands::{ContactAction, ContactCommand},
    context::RequestContext,
    errors::{CabinetError, CabinetResult},
    gateway::ContactGateway,
    models::{
        contact::{ContactDetail, ContactStatus},
        dashboard::FlashMessage,
    },
};

fn not_found(id: Uuid) -> CabinetError {
    CabinetError::NotFound(format!("Contact with ID {} not found", id))
}

/// Returns a contact with its attachments, marking an unread contact as read.
///
/// # Errors
///
/// * `CabinetError::NotFound` - no contact with this id
/// * `CabinetError::Database` - a gateway call failed
pub async fn open_contact<G>(
    ctx: &RequestContext,
    gateway: &G,
    id: Uuid,
) -> CabinetResult<ContactDetail>
where
    G: ContactGateway + Sync + ?Sized,
{
    let mut contact = gateway
        .find_contact(id)
        .await
        .map_err(CabinetError::Database)?
        .ok_or_else(|| not_found(id))?;

    if contact.status == ContactStatus::New {
        gateway
            .set_contact_status(id, ContactStatus::Read)
            .await
            .map_err(CabinetError::Database)?;
        contact.status = ContactStatus::Read;
        debug!(admin = %ctx.admin, "Contact {} marked read on open", id);
    }

    let files = gateway
        .contact_files(id)
        .await
        .map_err(CabinetError::Database)?;

    Ok(ContactDetail { contact, files })
}

/// Runs a `mark_read`, `mark_new` or `delete` command on one contact.
///
/// # Errors
///
/// * `CabinetError::Validation` - no contact id given
/// * `CabinetError::NotFound` - no contact with this id
/// * `CabinetError::Database` - a gateway call failed
pub async fn execute<G>(
    ctx: &RequestContext,
    gateway: &G,
    command: &ContactCommand,
) -> CabinetResult<FlashMessage>
where
    G: ContactGateway + Sync + ?Sized,
{
    let id = command
        .id
        .ok_or_else(|| CabinetError::Validation("Missing ID".to_string()))?;

    let (affected, message) = match command.action {
        ContactAction::MarkRead => (
            gateway.set_contact_status(id, ContactStatus::Read).await,
            "Message marked as read",
        ),
        ContactAction::MarkNew => (
            gateway.set_contact_status(id, ContactStatus::New).await,
            "Message marked as new",
        ),
        ContactAction::Delete => (gateway.delete_contact(id).await, "Message deleted"),
    };

    if affected.map_err(CabinetError::Database)? == 0 {
        return Err(not_found(id));
    }

    info!(
        admin = %ctx.admin,
        request_id = %ctx.request_id,
        "Contact {} updated: {:?}",
        id,
        command.action
    );

    Ok(FlashMessage::success(message))
}
