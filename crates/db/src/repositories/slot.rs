use crate::models::{DbAppointmentSlot, DbSlotListing};
use async_trait::async_trait;
use cabinet_core::{gateway::SlotGateway, models::slot::AppointmentSlot};
use chrono::NaiveDateTime;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn slot_exists(
    pool: &Pool<Postgres>,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM appointment_slots
            WHERE start_time = $1 AND end_time = $2
        )
        "#,
    )
    .bind(start_time)
    .bind(end_time)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Inserts an unbooked slot. Returns `None` if a slot with the same bounds
/// was stored in the meantime.
pub async fn create_slot(
    pool: &Pool<Postgres>,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
) -> Result<Option<Uuid>> {
    let id = Uuid::new_v4();
    let now = crate::now();

    let inserted = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO appointment_slots (id, start_time, end_time, is_booked, created_at, updated_at)
        VALUES ($1, $2, $3, FALSE, $4, $4)
        ON CONFLICT (start_time, end_time) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(id)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(inserted)
}

/// Deletes a slot that is neither booked nor referenced by an appointment.
pub async fn delete_unbooked_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointment_slots
        WHERE id = $1
          AND is_booked = FALSE
          AND NOT EXISTS (SELECT 1 FROM appointments WHERE slot_id = $1)
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointmentSlot>> {
    let slot = sqlx::query_as::<_, DbAppointmentSlot>(
        r#"
        SELECT id, start_time, end_time, is_booked, created_at, updated_at
        FROM appointment_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn count_slot_appointments(pool: &Pool<Postgres>, slot_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM appointments
        WHERE slot_id = $1
        "#,
    )
    .bind(slot_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

pub async fn list_slots(pool: &Pool<Postgres>) -> Result<Vec<DbSlotListing>> {
    let slots = sqlx::query_as::<_, DbSlotListing>(
        r#"
        SELECT s.id, s.start_time, s.end_time, s.is_booked,
               COUNT(a.id) AS appointment_count
        FROM appointment_slots s
        LEFT JOIN appointments a ON s.id = a.slot_id
        GROUP BY s.id
        ORDER BY s.start_time ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

/// [`SlotGateway`] backed by the `appointment_slots` table.
#[derive(Debug, Clone)]
pub struct PgSlotGateway {
    pool: Pool<Postgres>,
}

impl PgSlotGateway {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotGateway for PgSlotGateway {
    async fn slot_exists(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<bool> {
        slot_exists(&self.pool, start, end).await
    }

    async fn insert_slot(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Option<Uuid>> {
        create_slot(&self.pool, start, end).await
    }

    async fn delete_slot_if_unbooked(&self, id: Uuid) -> Result<u64> {
        delete_unbooked_slot(&self.pool, id).await
    }

    async fn find_slot(&self, id: Uuid) -> Result<Option<AppointmentSlot>> {
        Ok(get_slot_by_id(&self.pool, id).await?.map(AppointmentSlot::from))
    }

    async fn count_appointments(&self, slot_id: Uuid) -> Result<i64> {
        count_slot_appointments(&self.pool, slot_id).await
    }
}
