use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::slot::SlotLabel;

/// Availability of every catalog slot on one date.
///
/// `unavailable` is the engine's result set in catalog order; clients render
/// the catalog and disable (and deselect) anything listed in `unavailable`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    /// Whether the date itself is offerable at all.
    pub selectable: bool,
    pub unavailable: Vec<SlotLabel>,
    pub catalog: Vec<SlotLabel>,
}
