use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slot::SlotListing;

/// Outcome of an admin command, shown to the admin once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub success: bool,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub contacts: i64,
    pub new_contacts: i64,
    pub appointments: i64,
    pub services: i64,
    pub team_members: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentContact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub appointment_status: Option<String>,
    pub appointment_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingAppointment {
    pub name: String,
    pub email: String,
    pub appointment_status: String,
    pub appointment_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_contacts: Vec<RecentContact>,
    pub upcoming_appointments: Vec<UpcomingAppointment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOverview {
    pub slots: Vec<SlotListing>,
    pub stats: DashboardStats,
}
