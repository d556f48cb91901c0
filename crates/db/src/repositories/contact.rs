use crate::models::{DbContact, DbContactFile};
use async_trait::async_trait;
use cabinet_core::{
    gateway::ContactGateway,
    models::contact::{Contact, ContactFile, ContactStatus},
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn list_contacts(pool: &Pool<Postgres>) -> Result<Vec<DbContact>> {
    let contacts = sqlx::query_as::<_, DbContact>(
        r#"
        SELECT id, name, email, phone, subject, message, status,
               appointment_id, created_at, updated_at
        FROM contacts
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(contacts)
}

pub async fn get_contact_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbContact>> {
    let contact = sqlx::query_as::<_, DbContact>(
        r#"
        SELECT id, name, email, phone, subject, message, status,
               appointment_id, created_at, updated_at
        FROM contacts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(contact)
}

pub async fn get_contact_files(pool: &Pool<Postgres>, contact_id: Uuid) -> Result<Vec<DbContactFile>> {
    let files = sqlx::query_as::<_, DbContactFile>(
        r#"
        SELECT id, contact_id, file_name, file_path, uploaded_at
        FROM contact_files
        WHERE contact_id = $1
        ORDER BY uploaded_at DESC
        "#,
    )
    .bind(contact_id)
    .fetch_all(pool)
    .await?;

    Ok(files)
}

pub async fn set_contact_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: ContactStatus,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE contacts
        SET status = $2, updated_at = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(crate::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_contact(pool: &Pool<Postgres>, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// [`ContactGateway`] backed by the `contacts` and `contact_files` tables.
#[derive(Debug, Clone)]
pub struct PgContactGateway {
    pool: Pool<Postgres>,
}

impl PgContactGateway {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactGateway for PgContactGateway {
    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let contacts = list_contacts(&self.pool).await?;
        Ok(contacts.into_iter().map(Contact::from).collect())
    }

    async fn find_contact(&self, id: Uuid) -> Result<Option<Contact>> {
        Ok(get_contact_by_id(&self.pool, id).await?.map(Contact::from))
    }

    async fn contact_files(&self, contact_id: Uuid) -> Result<Vec<ContactFile>> {
        let files = get_contact_files(&self.pool, contact_id).await?;
        Ok(files.into_iter().map(ContactFile::from).collect())
    }

    async fn set_contact_status(&self, id: Uuid, status: ContactStatus) -> Result<u64> {
        set_contact_status(&self.pool, id, status).await
    }

    async fn delete_contact(&self, id: Uuid) -> Result<u64> {
        delete_contact(&self.pool, id).await
    }
}
