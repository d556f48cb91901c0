//! Schedule operations: persisting planned slots and deleting unbooked ones.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    commands::ScheduleCommand,
    context::RequestContext,
    errors::{CabinetError, CabinetResult},
    gateway::SlotGateway,
    models::{dashboard::FlashMessage, slot::DailySlotsRequest},
    planner::{SlotPlanner, WorkingDay},
};

/// Generates the slots of one day and stores the ones not yet present.
///
/// Each planned slot is checked once against the gateway; a slot with the
/// same start and end already stored is skipped, as is one whose insert was
/// rejected as a duplicate by a concurrent run. Only new rows are counted.
///
/// # Errors
///
/// * `CabinetError::Validation` - missing date or unparseable date/times; no
///   gateway call is made in that case
/// * `CabinetError::Database` - a gateway call failed; slots inserted before
///   the failure stay in place
pub async fn add_daily_slots<G>(
    ctx: &RequestContext,
    planner: &SlotPlanner,
    gateway: &G,
    request: &DailySlotsRequest,
) -> CabinetResult<usize>
where
    G: SlotGateway + Sync + ?Sized,
{
    let day = WorkingDay::from_request(request)?;

    let mut created = 0;
    for slot in planner.generate(&day) {
        let exists = gateway
            .slot_exists(slot.start, slot.end)
            .await
            .map_err(CabinetError::Database)?;
        if exists {
            debug!("Skipping existing slot {} - {}", slot.start, slot.end);
            continue;
        }

        match gateway
            .insert_slot(slot.start, slot.end)
            .await
            .map_err(CabinetError::Database)?
        {
            Some(id) => {
                debug!("Created slot {}: {} - {}", id, slot.start, slot.end);
                created += 1;
            }
            None => debug!("Slot {} - {} was created concurrently", slot.start, slot.end),
        }
    }

    info!(
        admin = %ctx.admin,
        request_id = %ctx.request_id,
        date = %day.date,
        created,
        "Daily slots generated"
    );

    Ok(created)
}

/// Deletes an unbooked slot.
///
/// A slot that still has appointment rows, cancelled ones included, is kept
/// so the appointment history stays intact.
///
/// # Errors
///
/// * `CabinetError::Validation` - no slot id given
/// * `CabinetError::NotFound` - no slot with this id
/// * `CabinetError::Refusal` - the slot is booked or has appointments
/// * `CabinetError::Database` - a gateway call failed
pub async fn delete_slot<G>(
    ctx: &RequestContext,
    gateway: &G,
    slot_id: Option<Uuid>,
) -> CabinetResult<()>
where
    G: SlotGateway + Sync + ?Sized,
{
    let id = slot_id.ok_or_else(|| CabinetError::Validation("Slot ID is required".to_string()))?;

    let affected = gateway
        .delete_slot_if_unbooked(id)
        .await
        .map_err(CabinetError::Database)?;

    if affected > 0 {
        info!(admin = %ctx.admin, request_id = %ctx.request_id, "Deleted slot {}", id);
        return Ok(());
    }

    // Nothing was deleted: work out which guard held the row back.
    match gateway.find_slot(id).await.map_err(CabinetError::Database)? {
        None => Err(CabinetError::NotFound(format!("Slot with ID {} not found", id))),
        Some(slot) if slot.is_booked => Err(CabinetError::Refusal(
            "Booked slots cannot be deleted".to_string(),
        )),
        Some(_) => {
            let appointments = gateway
                .count_appointments(id)
                .await
                .map_err(CabinetError::Database)?;
            if appointments > 0 {
                Err(CabinetError::Refusal(
                    "Slots with appointments cannot be deleted".to_string(),
                ))
            } else {
                Err(CabinetError::Refusal(format!(
                    "Slot with ID {} could not be deleted",
                    id
                )))
            }
        }
    }
}

/// Runs a schedule command and reports its outcome as a flash message.
pub async fn execute<G>(
    ctx: &RequestContext,
    planner: &SlotPlanner,
    gateway: &G,
    command: &ScheduleCommand,
) -> CabinetResult<FlashMessage>
where
    G: SlotGateway + Sync + ?Sized,
{
    match command {
        ScheduleCommand::AddDailySlots(request) => {
            let created = add_daily_slots(ctx, planner, gateway, request).await?;
            Ok(FlashMessage::success(format!(
                "{} slots added successfully",
                created
            )))
        }
        ScheduleCommand::DeleteSlot { slot_id } => {
            delete_slot(ctx, gateway, *slot_id).await?;
            Ok(FlashMessage::success("Slot deleted successfully"))
        }
    }
}
