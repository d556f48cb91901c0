//! Admin commands, resolved from the request body once at the boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::slot::DailySlotsRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScheduleCommand {
    AddDailySlots(DailySlotsRequest),
    DeleteSlot { slot_id: Option<Uuid> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactAction {
    MarkRead,
    MarkNew,
    Delete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCommand {
    pub action: ContactAction,
    pub id: Option<Uuid>,
}
