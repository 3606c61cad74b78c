//! # Availability Handlers
//!
//! Handlers for querying which appointment slots are still offerable on a
//! given date. The actual computation is the pure engine in
//! `cartent_core::availability`; this module is the host side of that
//! contract:
//!
//! 1. Load the full booking list once per request
//! 2. Convert rows to domain bookings, logging (not failing on) malformed
//!    records — a bad status string or an unparsable appointment time costs
//!    that record its occupancy, never the whole computation
//! 3. Read "now" from the injected clock and invoke the engine
//! 4. Return the unavailable set in catalog order, together with the
//!    date-selectability verdict, so clients can disable slots and drop a
//!    stale selection in one pass

use axum::{
    extract::{Query, State},
    Json,
};
use cartent_core::{
    availability::{is_selectable, unavailable_slots},
    errors::TentError,
    models::availability::AvailabilityResponse,
    models::booking::Booking,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use cartent_db::models::DbBooking;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Target calendar date, ISO `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Converts stored rows into domain bookings, warning about records the
/// engine will not be able to count. The engine itself stays silent about
/// them; logging is this host's job.
pub(crate) fn to_domain_logged(rows: Vec<DbBooking>) -> Vec<Booking> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match row.into_domain() {
                Ok(booking) => {
                    if booking.slot_label().is_none() {
                        tracing::warn!(
                            "booking {} has unparsable appointment time {:?}; skipped for occupancy",
                            id,
                            booking.appointment_time
                        );
                    }
                    Some(booking)
                }
                Err(err) => {
                    tracing::warn!("booking {} has {}; record skipped", id, err);
                    None
                }
            }
        })
        .collect()
}

/// Returns the unavailable slots for a date.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?date=2025-09-14
/// ```
///
/// # Errors
///
/// * `TentError::InvalidDate` - date is before today (the client's calendar
///   disables such dates; reaching this means the gate was skipped)
/// * `TentError::Database` - booking list could not be loaded
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let now = state.clock.now();

    let rows = cartent_db::repositories::booking::list_bookings(&state.db_pool)
        .await
        .map_err(TentError::Database)?;
    let bookings = to_domain_logged(rows);

    let unavailable = unavailable_slots(query.date, now, &bookings, &state.slot_catalog)?;

    // Re-order the set against the fixed catalog for rendering
    let unavailable: Vec<_> = state
        .slot_catalog
        .iter()
        .filter(|label| unavailable.contains(label))
        .copied()
        .collect();

    Ok(Json(AvailabilityResponse {
        date: query.date,
        selectable: is_selectable(query.date, now),
        unavailable,
        catalog: state.slot_catalog.labels().to_vec(),
    }))
}
