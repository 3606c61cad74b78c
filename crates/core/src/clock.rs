use chrono::NaiveDateTime;

/// Source of the dealership's local wall-clock time.
///
/// Handlers read "now" through this trait and pass it into the availability
/// engine as a value, so the cutoff rules stay deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
