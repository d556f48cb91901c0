use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const TABLES: [&str; 9] = [
    // Appointment slots. Exact start/end duplicates are rejected so that two
    // concurrent planning runs cannot store the same slot twice.
    r#"
    CREATE TABLE IF NOT EXISTS appointment_slots (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        start_time TIMESTAMP NOT NULL,
        end_time TIMESTAMP NOT NULL,
        is_booked BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
        CONSTRAINT valid_slot_range CHECK (end_time > start_time),
        CONSTRAINT unique_slot_bounds UNIQUE (start_time, end_time)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS appointments (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        slot_id UUID NOT NULL REFERENCES appointment_slots(id),
        status VARCHAR(20) NOT NULL DEFAULT 'pending',
        created_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contacts (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        phone VARCHAR(50) NULL,
        subject VARCHAR(255) NULL,
        message TEXT NOT NULL,
        status VARCHAR(20) NOT NULL DEFAULT 'new',
        appointment_id UUID NULL REFERENCES appointments(id) ON DELETE SET NULL,
        created_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contact_files (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        contact_id UUID NOT NULL REFERENCES contacts(id) ON DELETE CASCADE,
        file_name VARCHAR(255) NOT NULL,
        file_path VARCHAR(512) NOT NULL,
        uploaded_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS site_content (
        section VARCHAR(50) NOT NULL,
        key_name VARCHAR(100) NOT NULL,
        value TEXT NOT NULL,
        updated_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
        PRIMARY KEY (section, key_name)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title VARCHAR(255) NOT NULL,
        description TEXT NOT NULL,
        icon VARCHAR(100) NOT NULL,
        color VARCHAR(20) NOT NULL,
        detailed_content TEXT NOT NULL DEFAULT '',
        order_position INTEGER NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS team_members (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        position VARCHAR(255) NOT NULL,
        description TEXT NOT NULL,
        image_path VARCHAR(512) NULL,
        order_position INTEGER NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS news (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        image_path VARCHAR(512) NULL,
        publish_date TIMESTAMP NOT NULL,
        order_position INTEGER NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS events (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        image_path VARCHAR(512) NULL,
        event_date TIMESTAMP NOT NULL,
        order_position INTEGER NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT LOCALTIMESTAMP
    );
    "#,
];

const INDEXES: [&str; 6] = [
    "CREATE INDEX IF NOT EXISTS idx_appointment_slots_start_time ON appointment_slots(start_time)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_slot_id ON appointments(slot_id)",
    "CREATE INDEX IF NOT EXISTS idx_contacts_created_at ON contacts(created_at)",
    "CREATE INDEX IF NOT EXISTS idx_contacts_status ON contacts(status)",
    "CREATE INDEX IF NOT EXISTS idx_contact_files_contact_id ON contact_files(contact_id)",
    "CREATE INDEX IF NOT EXISTS idx_news_publish_date ON news(publish_date)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in TABLES {
        sqlx::query(statement).execute(pool).await?;
    }

    // Postgres refuses several commands in one prepared statement
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
