use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted, bookable appointment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSlot {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_booked: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A slot produced by the planner that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlannedSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Slot row as shown in the schedule view, with its appointment count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotListing {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_booked: bool,
    pub appointment_count: i64,
}

/// Raw form of an "add daily slots" request, as submitted by the admin.
///
/// Times are kept as strings so that blank form fields can be told apart
/// from missing ones; [`crate::planner::WorkingDay::from_request`] turns this
/// into a validated working day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailySlotsRequest {
    pub date: Option<String>,
    #[serde(default)]
    pub all_day: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
}
