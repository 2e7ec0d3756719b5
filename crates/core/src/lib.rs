//! Domain types shared by the SalonBook crates.
//!
//! Nothing in here performs I/O: the database and notification crates build
//! on these types, and the API crate maps [`errors::BookingError`] onto HTTP
//! responses.

pub mod errors;
pub mod formatting;
pub mod models;
pub mod schedule;
