use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create bookings table. Ids are timestamp-derived integers assigned by
    // the repository, not a sequence. Cancellation is a status change, so
    // there is no delete path and no soft-delete column.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id BIGINT PRIMARY KEY,
            customer_id BIGINT NOT NULL,
            contract_number VARCHAR(255) NOT NULL,
            appointment_date DATE NOT NULL,
            appointment_time VARCHAR(64) NOT NULL,
            employee VARCHAR(255) NULL,
            appointment_method VARCHAR(255) NULL,
            address TEXT NULL,
            province VARCHAR(255) NULL,
            district VARCHAR(255) NULL,
            subdistrict VARCHAR(255) NULL,
            status VARCHAR(64) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bookings_appointment_date ON bookings(appointment_date);
        CREATE INDEX IF NOT EXISTS idx_bookings_customer_id ON bookings(customer_id);
        CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
