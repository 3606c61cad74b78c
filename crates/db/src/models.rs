use cartent_core::models::booking::{Booking, ParseBookingStatusError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A booking row as stored. Status is kept as its stored Thai string; parsing
/// into the domain enum happens in [`DbBooking::into_domain`] so one bad row
/// cannot poison a whole listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
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
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl DbBooking {
    pub fn into_domain(self) -> Result<Booking, ParseBookingStatusError> {
        let status = self.status.parse()?;
        Ok(Booking {
            id: self.id,
            customer_id: self.customer_id,
            contract_number: self.contract_number,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            employee: self.employee,
            appointment_method: self.appointment_method,
            address: self.address,
            province: self.province,
            district: self.district,
            subdistrict: self.subdistrict,
            status,
            created_at: self.created_at,
        })
    }
}

/// Insert/replace payload for a booking row. The id, status, and timestamp
/// are assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
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
}
