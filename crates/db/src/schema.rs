use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            date VARCHAR(10) NOT NULL,
            time VARCHAR(5) NOT NULL,
            services JSONB NOT NULL DEFAULT '[]'::jsonb,
            customer_name VARCHAR(255) NOT NULL,
            customer_email VARCHAR(255) NOT NULL,
            customer_phone VARCHAR(64) NOT NULL,
            nail_shape VARCHAR(255) NULL,
            nail_design TEXT NULL,
            tattoo_location VARCHAR(255) NULL,
            tattoo_size VARCHAR(255) NULL,
            reference_image TEXT NULL,
            special_requests TEXT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'confirmed',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_status CHECK (status IN ('confirmed', 'pending', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One active appointment per slot
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_active_slot
            ON appointments(date, time)
            WHERE status <> 'cancelled';
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
