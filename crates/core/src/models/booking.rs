use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::slot::SlotLabel;

/// Pickup method that requires a delivery address.
pub const HOME_DELIVERY_METHOD: &str = "จัดส่งรถถึงที่";

/// Lifecycle status of a booking. The Thai strings are the stored and wire
/// form, carried over from the dealership's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// กำลังดำเนินการ
    #[serde(rename = "กำลังดำเนินการ")]
    InProgress,
    /// ยกเลิก — a cancelled booking stays on record but never occupies a slot.
    #[serde(rename = "ยกเลิก")]
    Cancelled,
    /// เสร็จสิ้น
    #[serde(rename = "เสร็จสิ้น")]
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::InProgress => "กำลังดำเนินการ",
            BookingStatus::Cancelled => "ยกเลิก",
            BookingStatus::Completed => "เสร็จสิ้น",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0:?}")]
pub struct ParseBookingStatusError(String);

impl FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "กำลังดำเนินการ" => Ok(BookingStatus::InProgress),
            "ยกเลิก" => Ok(BookingStatus::Cancelled),
            "เสร็จสิ้น" => Ok(BookingStatus::Completed),
            other => Err(ParseBookingStatusError(other.to_string())),
        }
    }
}

/// A pickup/delivery appointment as the engine sees it.
///
/// `appointment_time` keeps the stored slot-range form (`"09:00 - 10:00 น."`);
/// the leading label is recovered with [`Booking::slot_label`]. Records whose
/// label does not parse are skipped for occupancy, not treated as fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub contract_number: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub employee: Option<String>,
    pub appointment_method: Option<String>,
    pub address: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The starting slot label, parsed from the leading token of the stored
    /// appointment time. `None` for malformed records.
    pub fn slot_label(&self) -> Option<SlotLabel> {
        self.appointment_time
            .split_whitespace()
            .next()
            .and_then(|label| label.parse().ok())
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: i64,
    pub contract_number: String,
    pub appointment_date: NaiveDate,
    pub slot: SlotLabel,
    pub employee: String,
    pub appointment_method: String,
    pub address: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
}

impl CreateBookingRequest {
    /// Field-level validation mirrored from the booking form: contract number
    /// is mandatory, and home delivery needs the full address.
    pub fn validation_error(&self) -> Option<String> {
        if self.contract_number.trim().is_empty() {
            return Some("contract_number must not be empty".to_string());
        }
        if self.appointment_method == HOME_DELIVERY_METHOD {
            let complete = [&self.address, &self.province, &self.district, &self.subdistrict]
                .iter()
                .all(|field| field.as_deref().is_some_and(|s| !s.trim().is_empty()));
            if !complete {
                return Some(
                    "home delivery requires address, province, district, and subdistrict"
                        .to_string(),
                );
            }
        }
        None
    }
}

/// Edit payload; an update replaces the stored record in place under the
/// same id, and resets the status to in-progress like the original records do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingRequest {
    pub contract_number: String,
    pub appointment_date: NaiveDate,
    pub slot: SlotLabel,
    pub employee: String,
    pub appointment_method: String,
    pub address: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
}

impl UpdateBookingRequest {
    pub fn validation_error(&self) -> Option<String> {
        CreateBookingRequest {
            customer_id: 0,
            contract_number: self.contract_number.clone(),
            appointment_date: self.appointment_date,
            slot: self.slot,
            employee: self.employee.clone(),
            appointment_method: self.appointment_method.clone(),
            address: self.address.clone(),
            province: self.province.clone(),
            district: self.district.clone(),
            subdistrict: self.subdistrict.clone(),
        }
        .validation_error()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: i64,
    pub customer_id: i64,
    pub contract_number: String,
    pub appointment_date: NaiveDate,
    /// Presentation form: day, Thai month name, Buddhist-era year.
    pub appointment_date_thai: String,
    pub appointment_time: String,
    pub employee: Option<String>,
    pub appointment_method: Option<String>,
    pub address: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub bookings: Vec<BookingResponse>,
}
