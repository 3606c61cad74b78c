use mockall::mock;

use crate::models::{DbBooking, NewBooking};

// Mock repository for testing
mock! {
    pub BookingRepo {
        pub async fn create_booking(&self, new: NewBooking) -> eyre::Result<DbBooking>;

        pub async fn get_booking_by_id(&self, id: i64) -> eyre::Result<Option<DbBooking>>;

        pub async fn list_bookings(&self) -> eyre::Result<Vec<DbBooking>>;

        pub async fn list_bookings_by_customer(
            &self,
            customer_id: i64,
        ) -> eyre::Result<Vec<DbBooking>>;

        pub async fn update_booking(
            &self,
            id: i64,
            new: NewBooking,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn cancel_booking(&self, id: i64) -> eyre::Result<Option<DbBooking>>;
    }
}
