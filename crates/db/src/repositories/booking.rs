use cartent_core::models::booking::BookingStatus;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};

use crate::models::{DbBooking, NewBooking};

const ALL_COLUMNS: &str = "id, customer_id, contract_number, appointment_date, appointment_time, \
     employee, appointment_method, address, province, district, subdistrict, status, created_at";

pub async fn create_booking(pool: &Pool<Postgres>, new: &NewBooking) -> Result<DbBooking> {
    // Ids are epoch milliseconds at creation time, matching the records the
    // dealership already holds.
    let id = Utc::now().timestamp_millis();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, customer_id={}, date={}, time={}",
        id,
        new.customer_id,
        new.appointment_date,
        new.appointment_time
    );

    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        INSERT INTO bookings ({ALL_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {ALL_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(new.customer_id)
    .bind(&new.contract_number)
    .bind(new.appointment_date)
    .bind(&new.appointment_time)
    .bind(&new.employee)
    .bind(&new.appointment_method)
    .bind(&new.address)
    .bind(&new.province)
    .bind(&new.district)
    .bind(&new.subdistrict)
    .bind(BookingStatus::InProgress.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbBooking>> {
    tracing::debug!("Getting booking by id: {}", id);

    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {ALL_COLUMNS}
        FROM bookings
        WHERE id = $1
        "#,
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Loads the full booking list, oldest first. The availability handler reads
/// this once per date change and derives slot occupancy in memory.
pub async fn list_bookings(pool: &Pool<Postgres>) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {ALL_COLUMNS}
        FROM bookings
        ORDER BY created_at ASC
        "#,
    ))
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn list_bookings_by_customer(
    pool: &Pool<Postgres>,
    customer_id: i64,
) -> Result<Vec<DbBooking>> {
    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {ALL_COLUMNS}
        FROM bookings
        WHERE customer_id = $1
        ORDER BY created_at ASC
        "#,
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Replaces the stored booking in place under the same id. The status goes
/// back to in-progress, as an edited appointment restarts its lifecycle.
pub async fn update_booking(
    pool: &Pool<Postgres>,
    id: i64,
    new: &NewBooking,
) -> Result<Option<DbBooking>> {
    tracing::debug!(
        "Updating booking: id={}, date={}, time={}",
        id,
        new.appointment_date,
        new.appointment_time
    );

    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        UPDATE bookings
        SET customer_id = $2, contract_number = $3, appointment_date = $4,
            appointment_time = $5, employee = $6, appointment_method = $7,
            address = $8, province = $9, district = $10, subdistrict = $11,
            status = $12
        WHERE id = $1
        RETURNING {ALL_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(new.customer_id)
    .bind(&new.contract_number)
    .bind(new.appointment_date)
    .bind(&new.appointment_time)
    .bind(&new.employee)
    .bind(&new.appointment_method)
    .bind(&new.address)
    .bind(&new.province)
    .bind(&new.district)
    .bind(&new.subdistrict)
    .bind(BookingStatus::InProgress.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Cancellation is a status transition; the row is never removed.
pub async fn cancel_booking(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbBooking>> {
    tracing::debug!("Cancelling booking: id={}", id);

    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        UPDATE bookings
        SET status = $2
        WHERE id = $1
        RETURNING {ALL_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(BookingStatus::Cancelled.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}
