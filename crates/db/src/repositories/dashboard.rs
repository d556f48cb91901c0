use crate::models::{DbRecentContact, DbUpcomingAppointment};
use cabinet_core::models::dashboard::DashboardStats;
use eyre::Result;
use sqlx::{Pool, Postgres};

async fn count(pool: &Pool<Postgres>, sql: &str) -> Result<i64> {
    let value = sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?;
    Ok(value)
}

pub async fn get_stats(pool: &Pool<Postgres>) -> Result<DashboardStats> {
    Ok(DashboardStats {
        contacts: count(pool, "SELECT COUNT(*) FROM contacts").await?,
        new_contacts: count(pool, "SELECT COUNT(*) FROM contacts WHERE status = 'new'").await?,
        appointments: count(
            pool,
            "SELECT COUNT(*) FROM appointments WHERE status IN ('pending', 'confirmed')",
        )
        .await?,
        services: count(pool, "SELECT COUNT(*) FROM services WHERE is_active").await?,
        team_members: count(pool, "SELECT COUNT(*) FROM team_members WHERE is_active").await?,
    })
}

pub async fn get_recent_contacts(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbRecentContact>> {
    let contacts = sqlx::query_as::<_, DbRecentContact>(
        r#"
        SELECT c.id, c.name, c.email, c.status, c.created_at,
               a.status AS appointment_status,
               s.start_time AS appointment_time
        FROM contacts c
        LEFT JOIN appointments a ON c.appointment_id = a.id
        LEFT JOIN appointment_slots s ON a.slot_id = s.id
        ORDER BY c.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(contacts)
}

pub async fn get_upcoming_appointments(
    pool: &Pool<Postgres>,
    limit: i64,
) -> Result<Vec<DbUpcomingAppointment>> {
    let appointments = sqlx::query_as::<_, DbUpcomingAppointment>(
        r#"
        SELECT c.name, c.email,
               a.status AS appointment_status,
               s.start_time AS appointment_time
        FROM contacts c
        JOIN appointments a ON c.appointment_id = a.id
        JOIN appointment_slots s ON a.slot_id = s.id
        WHERE s.start_time > $1
        ORDER BY s.start_time ASC
        LIMIT $2
        "#,
    )
    .bind(crate::now())
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}
