//! Slot availability engine.
//!
//! Pure computation over bookings already resident in memory: given a target
//! date, an injected "now", the recorded bookings, and the fixed slot
//! catalog, produce the set of slot labels that cannot be offered. A slot is
//! unavailable when it is booked-out (at least one non-cancelled booking on
//! the target date already starts there) or past (target date is today and
//! the slot's hour has elapsed, with a hard noon cutoff after which no
//! same-day slot is offered at all).
//!
//! The result is always a subset of the catalog, and identical inputs yield
//! identical sets. Bookings whose stored appointment time does not parse into
//! a slot label are skipped here; surfacing them is the caller's concern.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::errors::{TentError, TentResult};
use crate::models::booking::Booking;
use crate::models::slot::{SlotCatalog, SlotLabel};

/// Hour of day after which no same-day appointment may start. Fixed business
/// rule at the dealership, not configuration.
pub const SAME_DAY_CUTOFF_HOUR: u32 = 12;

/// Whether a calendar date may be offered for booking at all. Checked before
/// any slot computation: past dates are never offerable, and today stops
/// being offerable at the same-day cutoff.
pub fn is_selectable(date: NaiveDate, now: NaiveDateTime) -> bool {
    let today = now.date();
    if date < today {
        return false;
    }
    !(date == today && now.hour() >= SAME_DAY_CUTOFF_HOUR)
}

/// Computes the slots that must be disabled for `target_date`.
///
/// Fails with [`TentError::InvalidDate`] when `target_date` is before today;
/// callers gate dates with [`is_selectable`] first, so reaching that error
/// means the caller skipped the gate.
pub fn unavailable_slots(
    target_date: NaiveDate,
    now: NaiveDateTime,
    bookings: &[Booking],
    catalog: &SlotCatalog,
) -> TentResult<BTreeSet<SlotLabel>> {
    if target_date < now.date() {
        return Err(TentError::InvalidDate(format!(
            "availability requested for past date {target_date}"
        )));
    }

    // Occupancy per starting label, over non-cancelled bookings on the target
    // date. Unparsable appointment times are skipped rather than fatal.
    let mut occupancy: BTreeMap<SlotLabel, usize> = BTreeMap::new();
    for booking in bookings {
        if booking.appointment_date != target_date || booking.is_cancelled() {
            continue;
        }
        if let Some(label) = booking.slot_label() {
            *occupancy.entry(label).or_insert(0) += 1;
        }
    }

    let mut unavailable: BTreeSet<SlotLabel> = occupancy
        .into_iter()
        // Single-capacity slots: one confirmed booking fills the hour.
        .filter(|(_, count)| *count >= 1)
        .map(|(label, _)| label)
        .filter(|label| catalog.contains(label))
        .collect();

    if target_date == now.date() {
        if now.hour() >= SAME_DAY_CUTOFF_HOUR {
            unavailable.extend(catalog.iter().copied());
        } else {
            unavailable.extend(
                catalog
                    .iter()
                    .filter(|slot| u32::from(slot.hour()) <= now.hour())
                    .copied(),
            );
        }
    }

    Ok(unavailable)
}
