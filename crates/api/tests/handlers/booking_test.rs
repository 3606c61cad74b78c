use cartent_api::middleware::error_handling::AppError;
use cartent_core::{
    availability::{is_selectable, unavailable_slots},
    clock::Clock,
    errors::TentError,
    format,
    models::booking::{Booking, BookingStatus, CreateBookingRequest, HOME_DELIVERY_METHOD},
    models::slot::SlotLabel,
};
use cartent_db::models::{DbBooking, NewBooking};
use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use std::str::FromStr;

use crate::test_utils::{db_booking, FixedClock, TestContext};

fn slot(s: &str) -> SlotLabel {
    SlotLabel::from_str(s).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_request(date: NaiveDate, slot_label: SlotLabel) -> CreateBookingRequest {
    CreateBookingRequest {
        customer_id: 42,
        contract_number: "CT-2568-014".to_string(),
        appointment_date: date,
        slot: slot_label,
        employee: "สมชาย ใจดี".to_string(),
        appointment_method: "รับรถที่เต็นท์".to_string(),
        address: None,
        province: None,
        district: None,
        subdistrict: None,
    }
}

// Mirrors the create handler against the mock repository: validate fields,
// gate the date, check the slot against the engine, then insert.
async fn create_booking_wrapper(
    ctx: &mut TestContext,
    payload: CreateBookingRequest,
) -> Result<DbBooking, AppError> {
    if let Some(reason) = payload.validation_error() {
        return Err(AppError(TentError::Validation(reason)));
    }

    let now = ctx.clock.now();
    if !is_selectable(payload.appointment_date, now) {
        return Err(AppError(TentError::InvalidDate(format!(
            "date {} is not open for appointments",
            payload.appointment_date
        ))));
    }
    if !ctx.catalog.contains(&payload.slot) {
        return Err(AppError(TentError::Validation(format!(
            "slot {} is not in the catalog",
            payload.slot
        ))));
    }

    let rows = ctx.booking_repo.list_bookings().await?;
    let bookings: Vec<Booking> = rows
        .into_iter()
        .filter_map(|row| row.into_domain().ok())
        .collect();
    let unavailable = unavailable_slots(payload.appointment_date, now, &bookings, &ctx.catalog)?;
    if unavailable.contains(&payload.slot) {
        return Err(AppError(TentError::Validation(format!(
            "slot {} on {} is no longer available",
            payload.slot, payload.appointment_date
        ))));
    }

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
    let row = ctx.booking_repo.create_booking(new).await?;
    Ok(row)
}

#[tokio::test]
async fn test_create_booking_for_free_slot() {
    let mut ctx = TestContext::new();
    let target = day(2025, 9, 14);

    ctx.booking_repo
        .expect_list_bookings()
        .returning(|| Ok(vec![]));
    ctx.booking_repo
        .expect_create_booking()
        .times(1)
        .returning(|new| {
            Ok(DbBooking {
                id: 1757820000000,
                customer_id: new.customer_id,
                contract_number: new.contract_number,
                appointment_date: new.appointment_date,
                appointment_time: new.appointment_time,
                employee: new.employee,
                appointment_method: new.appointment_method,
                address: new.address,
                province: new.province,
                district: new.district,
                subdistrict: new.subdistrict,
                status: BookingStatus::InProgress.as_str().to_string(),
                created_at: Utc::now(),
            })
        });

    let row = create_booking_wrapper(&mut ctx, create_request(target, slot("09:00")))
        .await
        .unwrap();

    assert_eq!(row.appointment_time, "09:00 - 10:00 น.");
    assert_eq!(row.status, "กำลังดำเนินการ");
}

#[tokio::test]
async fn test_create_booking_rejects_taken_slot() {
    let mut ctx = TestContext::new();
    let target = day(2025, 9, 14);

    ctx.booking_repo.expect_list_bookings().returning(move || {
        Ok(vec![db_booking(
            7,
            day(2025, 9, 14),
            "09:00 - 10:00 น.",
            BookingStatus::InProgress,
        )])
    });
    // No create expectation: reaching the insert would fail the test

    let result = create_booking_wrapper(&mut ctx, create_request(target, slot("09:00"))).await;

    assert!(matches!(result, Err(AppError(TentError::Validation(_)))));
}

#[tokio::test]
async fn test_create_booking_rejects_past_date() {
    let mut ctx = TestContext::new();

    let result = create_booking_wrapper(&mut ctx, create_request(day(2025, 9, 1), slot("09:00"))).await;

    assert!(matches!(result, Err(AppError(TentError::InvalidDate(_)))));
}

#[tokio::test]
async fn test_create_booking_rejects_today_after_cutoff() {
    let mut ctx = TestContext::new();
    ctx.clock = FixedClock(day(2025, 9, 10).and_hms_opt(12, 0, 0).unwrap());

    let result =
        create_booking_wrapper(&mut ctx, create_request(day(2025, 9, 10), slot("09:00"))).await;

    assert!(matches!(result, Err(AppError(TentError::InvalidDate(_)))));
}

#[tokio::test]
async fn test_create_booking_rejects_unknown_slot() {
    let mut ctx = TestContext::new();

    let result =
        create_booking_wrapper(&mut ctx, create_request(day(2025, 9, 14), slot("13:00"))).await;

    assert!(matches!(result, Err(AppError(TentError::Validation(_)))));
}

#[tokio::test]
async fn test_create_booking_requires_delivery_address() {
    let mut ctx = TestContext::new();
    let mut request = create_request(day(2025, 9, 14), slot("09:00"));
    request.appointment_method = HOME_DELIVERY_METHOD.to_string();

    let result = create_booking_wrapper(&mut ctx, request).await;

    assert!(matches!(result, Err(AppError(TentError::Validation(_)))));
}

#[tokio::test]
async fn test_editing_a_booking_does_not_conflict_with_itself() {
    let mut ctx = TestContext::new();
    let target = day(2025, 9, 14);
    let editing_id = 7;

    ctx.booking_repo.expect_list_bookings().returning(move || {
        Ok(vec![db_booking(
            7,
            day(2025, 9, 14),
            "09:00 - 10:00 น.",
            BookingStatus::InProgress,
        )])
    });

    // The edit flow drops the booking's own row before running the engine
    let now = ctx.clock.now();
    let rows = ctx.booking_repo.list_bookings().await.unwrap();
    let bookings: Vec<Booking> = rows
        .into_iter()
        .filter_map(|row| row.into_domain().ok())
        .filter(|booking| booking.id != editing_id)
        .collect();
    let unavailable = unavailable_slots(target, now, &bookings, &ctx.catalog).unwrap();

    assert!(!unavailable.contains(&slot("09:00")));
}

#[tokio::test]
async fn test_cancel_booking_is_a_status_change() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_cancel_booking()
        .times(1)
        .returning(|id| {
            Ok(Some(db_booking(
                id,
                day(2025, 9, 14),
                "09:00 - 10:00 น.",
                BookingStatus::Cancelled,
            )))
        });

    let row = ctx.booking_repo.cancel_booking(7).await.unwrap().unwrap();

    assert_eq!(row.id, 7);
    assert_eq!(row.status, "ยกเลิก");
    // The record survives cancellation; only its status changed
    assert_eq!(row.appointment_time, "09:00 - 10:00 น.");
}

#[tokio::test]
async fn test_cancel_missing_booking_is_not_found() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_cancel_booking()
        .returning(|_| Ok(None));

    let result: Result<DbBooking, AppError> = match ctx.booking_repo.cancel_booking(12345).await {
        Ok(Some(row)) => Ok(row),
        Ok(None) => Err(AppError(TentError::NotFound(
            "Booking with ID 12345 not found".to_string(),
        ))),
        Err(e) => Err(AppError::from(e)),
    };

    assert!(matches!(result, Err(AppError(TentError::NotFound(_)))));
}
