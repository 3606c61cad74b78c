use axum::{
    extract::{Path, Query, State},
    Json,
};
use cartent_core::{
    availability::{is_selectable, unavailable_slots},
    errors::TentError,
    format,
    models::booking::{
        Booking, BookingResponse, CreateBookingRequest, ListBookingsResponse,
        UpdateBookingRequest,
    },
    models::slot::SlotLabel,
};
use cartent_db::models::NewBooking;
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    handlers::availability::to_domain_logged, middleware::error_handling::AppError, ApiState,
};

fn to_response(booking: Booking) -> BookingResponse {
    BookingResponse {
        id: booking.id,
        customer_id: booking.customer_id,
        contract_number: booking.contract_number,
        appointment_date: booking.appointment_date,
        appointment_date_thai: format::thai_date(booking.appointment_date),
        appointment_time: booking.appointment_time,
        employee: booking.employee,
        appointment_method: booking.appointment_method,
        address: booking.address,
        province: booking.province,
        district: booking.district,
        subdistrict: booking.subdistrict,
        status: booking.status,
        created_at: booking.created_at,
    }
}

/// Checks that the requested date/slot pair can be booked right now.
/// `exclude_id` makes an edited booking not conflict with its own row.
///
/// No lock or transaction spans this check and the following write; two
/// concurrent clients can both pass it for the same slot.
async fn ensure_slot_bookable(
    state: &ApiState,
    date: chrono::NaiveDate,
    slot: SlotLabel,
    exclude_id: Option<i64>,
) -> Result<(), AppError> {
    let now = state.clock.now();

    if !is_selectable(date, now) {
        return Err(AppError(TentError::InvalidDate(format!(
            "date {date} is not open for appointments"
        ))));
    }
    if !state.slot_catalog.contains(&slot) {
        return Err(AppError(TentError::Validation(format!(
            "slot {slot} is not in the catalog"
        ))));
    }

    let rows = cartent_db::repositories::booking::list_bookings(&state.db_pool)
        .await
        .map_err(TentError::Database)?;
    let mut bookings = to_domain_logged(rows);
    if let Some(id) = exclude_id {
        bookings.retain(|booking| booking.id != id);
    }

    let unavailable = unavailable_slots(date, now, &bookings, &state.slot_catalog)?;
    if unavailable.contains(&slot) {
        return Err(AppError(TentError::Validation(format!(
            "slot {slot} on {date} is no longer available"
        ))));
    }

    Ok(())
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    if let Some(reason) = payload.validation_error() {
        return Err(AppError(TentError::Validation(reason)));
    }

    ensure_slot_bookable(&state, payload.appointment_date, payload.slot, None).await?;

    let new = NewBooking {
        customer_id: payload.customer_id,
        contract_number: payload.contract_number,
        appointment_date: payload.appointment_date,
        appointment_time: format::slot_range(payload.slot),
        employee: Some(payload.employee),
        appointment_method: Some(payload.appointment_method),
        address: payload.address,
        province: payload.province,
        district: payload.district,
        subdistrict: payload.subdistrict,
    };

    let row = cartent_db::repositories::booking::create_booking(&state.db_pool, &new)
        .await
        .map_err(TentError::Database)?;
    let booking = row
        .into_domain()
        .map_err(|e| TentError::Internal(Box::new(e)))?;

    Ok(Json(to_response(booking)))
}

/// Optional filter for the booking list
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub customer_id: Option<i64>,
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<ListBookingsResponse>, AppError> {
    let rows = match query.customer_id {
        Some(customer_id) => {
            cartent_db::repositories::booking::list_bookings_by_customer(
                &state.db_pool,
                customer_id,
            )
            .await
        }
        None => cartent_db::repositories::booking::list_bookings(&state.db_pool).await,
    }
    .map_err(TentError::Database)?;

    let bookings = to_domain_logged(rows).into_iter().map(to_response).collect();

    Ok(Json(ListBookingsResponse { bookings }))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<BookingResponse>, AppError> {
    let row = cartent_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(TentError::Database)?
        .ok_or_else(|| TentError::NotFound(format!("Booking with ID {} not found", id)))?;

    let booking = row
        .into_domain()
        .map_err(|e| TentError::Internal(Box::new(e)))?;

    Ok(Json(to_response(booking)))
}

#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    if let Some(reason) = payload.validation_error() {
        return Err(AppError(TentError::Validation(reason)));
    }

    // The existing row supplies the owner; edits never move a booking
    // between customers.
    let existing = cartent_db::repositories::booking::get_booking_by_id(&state.db_pool, id)
        .await
        .map_err(TentError::Database)?
        .ok_or_else(|| TentError::NotFound(format!("Booking with ID {} not found", id)))?;

    ensure_slot_bookable(&state, payload.appointment_date, payload.slot, Some(id)).await?;

    let new = NewBooking {
        customer_id: existing.customer_id,
        contract_number: payload.contract_number,
        appointment_date: payload.appointment_date,
        appointment_time: format::slot_range(payload.slot),
        employee: Some(payload.employee),
        appointment_method: Some(payload.appointment_method),
        address: payload.address,
        province: payload.province,
        district: payload.district,
        subdistrict: payload.subdistrict,
    };

    let row = cartent_db::repositories::booking::update_booking(&state.db_pool, id, &new)
        .await
        .map_err(TentError::Database)?
        .ok_or_else(|| TentError::NotFound(format!("Booking with ID {} not found", id)))?;
    let booking = row
        .into_domain()
        .map_err(|e| TentError::Internal(Box::new(e)))?;

    Ok(Json(to_response(booking)))
}

#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<Json<BookingResponse>, AppError> {
    let row = cartent_db::repositories::booking::cancel_booking(&state.db_pool, id)
        .await
        .map_err(TentError::Database)?
        .ok_or_else(|| TentError::NotFound(format!("Booking with ID {} not found", id)))?;

    let booking = row
        .into_domain()
        .map_err(|e| TentError::Internal(Box::new(e)))?;

    Ok(Json(to_response(booking)))
}
