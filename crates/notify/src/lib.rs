//! # SalonBook notifications
//!
//! Booking events fan out to three independent, best-effort channels:
//!
//! - an email to the customer
//! - a push notification to the owner
//! - a WhatsApp message to the owner
//!
//! Each channel is a [`channels::NotificationChannel`]. The
//! [`dispatcher::Dispatcher`] runs all three concurrently and reports one
//! flag per channel; a failing channel never stops the others and never turns
//! into an error for the caller.

use salonbook_core::models::{
    appointment::{Appointment, ServiceSelection},
    booking::BookingDetails,
};

pub mod channels;
pub mod config;
pub mod dispatcher;
pub mod message;

/// Something that happened to a booking and is worth telling people about.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    Confirmed(BookingDetails),
    Cancelled(Appointment),
}

impl BookingEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            BookingEvent::Confirmed(_) => "confirmed",
            BookingEvent::Cancelled(_) => "cancelled",
        }
    }

    pub fn customer_name(&self) -> &str {
        match self {
            BookingEvent::Confirmed(b) => &b.customer_name,
            BookingEvent::Cancelled(a) => &a.customer_name,
        }
    }

    pub fn customer_email(&self) -> &str {
        match self {
            BookingEvent::Confirmed(b) => b.customer_email.trim(),
            BookingEvent::Cancelled(a) => &a.customer_email,
        }
    }

    pub fn customer_phone(&self) -> &str {
        match self {
            BookingEvent::Confirmed(b) => &b.customer_phone,
            BookingEvent::Cancelled(a) => &a.customer_phone,
        }
    }

    /// Date exactly as submitted or stored.
    pub fn date(&self) -> &str {
        match self {
            BookingEvent::Confirmed(b) => &b.date,
            BookingEvent::Cancelled(a) => &a.date,
        }
    }

    /// Time exactly as submitted or stored.
    pub fn time(&self) -> &str {
        match self {
            BookingEvent::Confirmed(b) => &b.time,
            BookingEvent::Cancelled(a) => &a.time,
        }
    }

    pub fn services(&self) -> &[ServiceSelection] {
        match self {
            BookingEvent::Confirmed(b) => &b.services,
            BookingEvent::Cancelled(a) => &a.services,
        }
    }

    pub fn special_requests(&self) -> Option<&str> {
        match self {
            BookingEvent::Confirmed(b) => b.details.special_requests.as_deref(),
            BookingEvent::Cancelled(a) => a.details.special_requests.as_deref(),
        }
    }
}
