use cartent_api::middleware::error_handling::AppError;
use cartent_core::{
    availability::{is_selectable, unavailable_slots},
    errors::TentError,
    models::availability::AvailabilityResponse,
    models::booking::{Booking, BookingStatus},
    models::slot::SlotLabel,
};
use cartent_core::clock::Clock;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::str::FromStr;

use crate::test_utils::{db_booking, FixedClock, TestContext};

// Mirrors the availability handler against the mock repository: load all
// rows once, convert to domain bookings, run the engine, order the result
// against the catalog.
async fn availability_wrapper(
    ctx: &mut TestContext,
    date: NaiveDate,
) -> Result<AvailabilityResponse, AppError> {
    let now = ctx.clock.now();

    let rows = ctx.booking_repo.list_bookings().await?;
    let bookings: Vec<Booking> = rows
        .into_iter()
        .filter_map(|row| row.into_domain().ok())
        .collect();

    let unavailable = unavailable_slots(date, now, &bookings, &ctx.catalog)?;
    let unavailable: Vec<_> = ctx
        .catalog
        .iter()
        .filter(|label| unavailable.contains(label))
        .copied()
        .collect();

    Ok(AvailabilityResponse {
        date,
        selectable: is_selectable(date, now),
        unavailable,
        catalog: ctx.catalog.labels().to_vec(),
    })
}

fn slot(s: &str) -> SlotLabel {
    SlotLabel::from_str(s).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_booked_slot_is_unavailable_cancelled_is_not() {
    let mut ctx = TestContext::new();
    let target = day(2025, 9, 14);

    ctx.booking_repo.expect_list_bookings().returning(move || {
        Ok(vec![
            db_booking(1, day(2025, 9, 14), "09:00 - 10:00 น.", BookingStatus::InProgress),
            db_booking(2, day(2025, 9, 14), "10:00 - 11:00 น.", BookingStatus::Cancelled),
        ])
    });

    let response = availability_wrapper(&mut ctx, target).await.unwrap();

    assert!(response.selectable);
    assert_eq!(response.unavailable, vec![slot("09:00")]);
    assert_eq!(response.catalog.len(), 4);
}

#[tokio::test]
async fn test_past_date_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.booking_repo
        .expect_list_bookings()
        .returning(|| Ok(vec![]));

    let result = availability_wrapper(&mut ctx, day(2025, 9, 1)).await;

    assert!(matches!(result, Err(AppError(TentError::InvalidDate(_)))));
}

#[tokio::test]
async fn test_today_after_cutoff_is_fully_closed() {
    let mut ctx = TestContext::new();
    // Move the clock to 13:00 on the target day itself
    ctx.clock = FixedClock(day(2025, 9, 10).and_hms_opt(13, 0, 0).unwrap());
    ctx.booking_repo
        .expect_list_bookings()
        .returning(|| Ok(vec![]));

    let response = availability_wrapper(&mut ctx, day(2025, 9, 10)).await.unwrap();

    assert!(!response.selectable);
    assert_eq!(response.unavailable, response.catalog);
}

#[tokio::test]
async fn test_malformed_rows_do_not_abort_the_computation() {
    let mut ctx = TestContext::new();
    let target = day(2025, 9, 14);

    ctx.booking_repo.expect_list_bookings().returning(move || {
        let mut bad_status = db_booking(
            1,
            day(2025, 9, 14),
            "08:00 - 09:00 น.",
            BookingStatus::InProgress,
        );
        bad_status.status = "สถานะปริศนา".to_string();
        Ok(vec![
            bad_status,
            db_booking(2, day(2025, 9, 14), "เวลาใดก็ได้", BookingStatus::InProgress),
            db_booking(3, day(2025, 9, 14), "10:00 - 11:00 น.", BookingStatus::InProgress),
        ])
    });

    let response = availability_wrapper(&mut ctx, target).await.unwrap();

    // Only the well-formed record occupies a slot
    assert_eq!(response.unavailable, vec![slot("10:00")]);
}

#[tokio::test]
async fn test_new_booking_invalidates_a_held_selection() {
    let mut ctx = TestContext::new();
    let target = day(2025, 9, 14);
    let mut selected = Some(slot("09:00"));

    // First read: nothing booked, the selection stands
    ctx.booking_repo
        .expect_list_bookings()
        .times(1)
        .returning(|| Ok(vec![]));
    // Second read: another client has taken 09:00 in the meantime
    ctx.booking_repo.expect_list_bookings().times(1).returning(move || {
        Ok(vec![db_booking(
            99,
            day(2025, 9, 14),
            "09:00 - 10:00 น.",
            BookingStatus::InProgress,
        )])
    });

    let response = availability_wrapper(&mut ctx, target).await.unwrap();
    assert!(!response.unavailable.contains(&slot("09:00")));

    let response = availability_wrapper(&mut ctx, target).await.unwrap();
    assert!(response.unavailable.contains(&slot("09:00")));

    // Host contract: a selection that turned unavailable must be cleared
    if selected.is_some_and(|s| response.unavailable.contains(&s)) {
        selected = None;
    }
    assert_eq!(selected, None);
}
