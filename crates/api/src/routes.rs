pub mod appointment;
pub mod booking;
