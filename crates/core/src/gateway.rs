//! Storage seams of the admin operations.
//!
//! Each trait covers one area of the admin back end. The database crate
//! provides the PostgreSQL implementations; tests use the generated mocks.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use mockall::automock;
use uuid::Uuid;

use crate::models::{
    contact::{Contact, ContactFile, ContactStatus},
    content::{
        ArticleFields, ArticleKind, Event, NewsItem, Service, ServiceFields, SiteContent,
        TeamMember, TeamMemberFields,
    },
    slot::AppointmentSlot,
};

/// Storage operations the slot planner relies on.
///
/// Implementations must not assume exclusive access to the slot table
/// between `slot_exists` and `insert_slot`.
#[automock]
#[async_trait]
pub trait SlotGateway {
    /// Whether a slot with exactly this start and end is already stored.
    async fn slot_exists(&self, start: NaiveDateTime, end: NaiveDateTime) -> eyre::Result<bool>;

    /// Inserts an unbooked slot. Returns `None` when the storage rejected the
    /// row as a duplicate.
    async fn insert_slot(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> eyre::Result<Option<Uuid>>;

    /// Deletes the slot if it is not booked and no appointment refers to it.
    /// Returns the affected row count.
    async fn delete_slot_if_unbooked(&self, id: Uuid) -> eyre::Result<u64>;

    async fn find_slot(&self, id: Uuid) -> eyre::Result<Option<AppointmentSlot>>;

    /// Number of appointments of any status attached to the slot.
    async fn count_appointments(&self, slot_id: Uuid) -> eyre::Result<i64>;
}

/// Storage of the site texts and the services, team, news and events lists.
///
/// Updates and plain deletes return the affected row count. Deletes of
/// entries carrying an image return `None` when no row matched, otherwise the
/// image path the row pointed to. An `image_path` of `None` on update keeps
/// the stored image.
#[automock]
#[async_trait]
pub trait ContentGateway {
    async fn site_content(&self) -> eyre::Result<SiteContent>;

    /// Upserts `(section, key, value)` entries, all or nothing.
    async fn save_site_content(&self, entries: Vec<(String, String, String)>) -> eyre::Result<()>;

    async fn list_services(&self) -> eyre::Result<Vec<Service>>;

    async fn create_service(&self, fields: &ServiceFields) -> eyre::Result<Service>;

    async fn update_service(
        &self,
        id: Uuid,
        fields: &ServiceFields,
        is_active: bool,
    ) -> eyre::Result<u64>;

    async fn delete_service(&self, id: Uuid) -> eyre::Result<u64>;

    async fn list_team_members(&self) -> eyre::Result<Vec<TeamMember>>;

    async fn create_team_member(
        &self,
        fields: &TeamMemberFields,
        image_path: Option<String>,
    ) -> eyre::Result<TeamMember>;

    async fn update_team_member(
        &self,
        id: Uuid,
        fields: &TeamMemberFields,
        image_path: Option<String>,
        is_active: bool,
    ) -> eyre::Result<u64>;

    async fn delete_team_member(&self, id: Uuid) -> eyre::Result<Option<Option<String>>>;

    async fn list_news(&self) -> eyre::Result<Vec<NewsItem>>;

    async fn list_events(&self) -> eyre::Result<Vec<Event>>;

    /// Creates a news item or event and returns its id.
    async fn create_article(
        &self,
        kind: ArticleKind,
        fields: &ArticleFields,
        image_path: Option<String>,
    ) -> eyre::Result<Uuid>;

    async fn update_article(
        &self,
        kind: ArticleKind,
        id: Uuid,
        fields: &ArticleFields,
        image_path: Option<String>,
        is_active: bool,
    ) -> eyre::Result<u64>;

    async fn delete_article(
        &self,
        kind: ArticleKind,
        id: Uuid,
    ) -> eyre::Result<Option<Option<String>>>;
}

/// Storage of the contact inbox.
#[automock]
#[async_trait]
pub trait ContactGateway {
    /// All contacts, newest first.
    async fn list_contacts(&self) -> eyre::Result<Vec<Contact>>;

    async fn find_contact(&self, id: Uuid) -> eyre::Result<Option<Contact>>;

    async fn contact_files(&self, contact_id: Uuid) -> eyre::Result<Vec<ContactFile>>;

    /// Returns the affected row count.
    async fn set_contact_status(&self, id: Uuid, status: ContactStatus) -> eyre::Result<u64>;

    /// Returns the affected row count.
    async fn delete_contact(&self, id: Uuid) -> eyre::Result<u64>;
}
