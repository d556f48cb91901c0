use cabinet_core::models::{
    contact::{Contact, ContactFile, ContactStatus},
    content::{Event, NewsItem, Service, TeamMember},
    dashboard::{RecentContact, UpcomingAppointment},
    slot::{AppointmentSlot, SlotListing},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentSlot {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_booked: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlotListing {
    pub id: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_booked: bool,
    pub appointment_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSiteContent {
    pub section: String,
    pub key_name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub detailed_content: String,
    pub order_position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTeamMember {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub description: String,
    pub image_path: Option<String>,
    pub order_position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row of the `news` or `events` table; the date column is selected as
/// `article_date` for both.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbArticle {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_path: Option<String>,
    pub article_date: NaiveDateTime,
    pub order_position: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbContact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: String,
    pub appointment_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbContactFile {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRecentContact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub appointment_status: Option<String>,
    pub appointment_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUpcomingAppointment {
    pub name: String,
    pub email: String,
    pub appointment_status: String,
    pub appointment_time: NaiveDateTime,
}

impl From<DbAppointmentSlot> for AppointmentSlot {
    fn from(row: DbAppointmentSlot) -> Self {
        AppointmentSlot {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbSlotListing> for SlotListing {
    fn from(row: DbSlotListing) -> Self {
        SlotListing {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            is_booked: row.is_booked,
            appointment_count: row.appointment_count,
        }
    }
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            title: row.title,
            description: row.description,
            icon: row.icon,
            color: row.color,
            detailed_content: row.detailed_content,
            order_position: row.order_position,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbTeamMember> for TeamMember {
    fn from(row: DbTeamMember) -> Self {
        TeamMember {
            id: row.id,
            name: row.name,
            position: row.position,
            description: row.description,
            image_path: row.image_path,
            order_position: row.order_position,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbArticle> for NewsItem {
    fn from(row: DbArticle) -> Self {
        NewsItem {
            id: row.id,
            title: row.title,
            content: row.content,
            image_path: row.image_path,
            publish_date: row.article_date,
            order_position: row.order_position,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbArticle> for Event {
    fn from(row: DbArticle) -> Self {
        Event {
            id: row.id,
            title: row.title,
            content: row.content,
            image_path: row.image_path,
            event_date: row.article_date,
            order_position: row.order_position,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbContact> for Contact {
    fn from(row: DbContact) -> Self {
        Contact {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            status: ContactStatus::from_db(&row.status),
            appointment_id: row.appointment_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbContactFile> for ContactFile {
    fn from(row: DbContactFile) -> Self {
        ContactFile {
            id: row.id,
            contact_id: row.contact_id,
            file_name: row.file_name,
            file_path: row.file_path,
            uploaded_at: row.uploaded_at,
        }
    }
}

impl From<DbRecentContact> for RecentContact {
    fn from(row: DbRecentContact) -> Self {
        RecentContact {
            id: row.id,
            name: row.name,
            email: row.email,
            status: row.status,
            created_at: row.created_at,
            appointment_status: row.appointment_status,
            appointment_time: row.appointment_time,
        }
    }
}

impl From<DbUpcomingAppointment> for UpcomingAppointment {
    fn from(row: DbUpcomingAppointment) -> Self {
        UpcomingAppointment {
            name: row.name,
            email: row.email,
            appointment_status: row.appointment_status,
            appointment_time: row.appointment_time,
        }
    }
}
