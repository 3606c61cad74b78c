use cartent_core::clock::Clock;
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Asia::Bangkok;

/// Dealership wall clock. Appointment dates, the past-slot rule, and the
/// same-day cutoff are all local business time, so "now" is taken in
/// Asia/Bangkok rather than UTC.
pub struct BangkokClock;

impl Clock for BangkokClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&Bangkok).naive_local()
    }
}
