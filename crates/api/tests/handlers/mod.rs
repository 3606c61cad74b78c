mod availability_test;
mod booking_test;
