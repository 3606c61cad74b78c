//! Presentation-edge formatting.
//!
//! Dates and times are structured values everywhere inside the system; the
//! Thai locale forms the dealership's records use (day, Thai month name,
//! Buddhist-era year, and the `"HH:MM - HH:MM น."` slot range) are produced
//! only here, when building responses or storing the legacy time field.

use chrono::{Datelike, NaiveDate};

use crate::models::slot::SlotLabel;

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Buddhist-era offset from the common era.
const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Formats a date the way the booking records display it, e.g.
/// `"14 กันยายน 2568"`.
pub fn thai_date(date: NaiveDate) -> String {
    let month = THAI_MONTHS[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year() + BUDDHIST_ERA_OFFSET)
}

/// Formats a slot as the stored appointment-time field: the one-hour range
/// with the Thai time marker, e.g. `"09:00 - 10:00 น."`.
pub fn slot_range(slot: SlotLabel) -> String {
    let end_hour = (slot.hour() + 1) % 24;
    format!("{} - {:02}:{:02} น.", slot, end_hour, slot.minute())
}
