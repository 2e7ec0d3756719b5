//! Message text for each channel.
//!
//! Dates and times are rendered for people ("Saturday, March 15, 2025",
//! "2:00 PM"); values that do not parse are shown exactly as received.

use salonbook_core::{
    models::appointment::{total_price, ServiceSelection},
    schedule::{BookingDate, BookingTime},
};
use html_escape::encode_text;
use serde::Serialize;

use crate::BookingEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
}

pub fn display_date(raw: &str) -> String {
    BookingDate::parse(raw)
        .map(|date| date.as_naive().format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn display_time(raw: &str) -> String {
    BookingTime::parse(raw)
        .map(|time| time.to_12h_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// `"Gel Manicure ($45.00), Nail Art ($15.50)"`
pub fn service_summary(services: &[ServiceSelection]) -> String {
    services
        .iter()
        .map(|s| format!("{} (${:.2})", s.name, s.price))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn customer_email(event: &BookingEvent, business_name: &str) -> EmailMessage {
    let date = display_date(event.date());
    let time = display_time(event.time());

    let subject = match event {
        BookingEvent::Confirmed(_) => format!("Your {} appointment is confirmed", business_name),
        BookingEvent::Cancelled(_) => format!("Your {} appointment has been cancelled", business_name),
    };

    let services = event
        .services()
        .iter()
        .map(|s| format!("<li>{} - ${:.2}</li>", encode_text(&s.name), s.price))
        .collect::<String>();

    let intro = match event {
        BookingEvent::Confirmed(_) => "Your appointment is confirmed",
        BookingEvent::Cancelled(_) => "Your appointment has been cancelled",
    };

    let mut html = format!(
        "<p>Hi {},</p>\
         <p>{} for <strong>{}</strong> at <strong>{}</strong>.</p>\
         <ul>{}</ul>\
         <p>Total: ${:.2}</p>",
        encode_text(event.customer_name()),
        intro,
        encode_text(&date),
        encode_text(&time),
        services,
        total_price(event.services()),
    );
    if let Some(requests) = event.special_requests() {
        html.push_str(&format!("<p>Your notes: {}</p>", encode_text(requests)));
    }
    html.push_str(&format!("<p>{}</p>", encode_text(business_name)));

    EmailMessage {
        to: event.customer_email().to_string(),
        subject,
        html,
    }
}

pub fn owner_push(event: &BookingEvent) -> PushMessage {
    let title = match event {
        BookingEvent::Confirmed(_) => "New booking".to_string(),
        BookingEvent::Cancelled(_) => "Booking cancelled".to_string(),
    };
    let body = format!(
        "{} - {} at {} ({})",
        event.customer_name(),
        display_date(event.date()),
        display_time(event.time()),
        service_summary(event.services()),
    );

    PushMessage { title, body }
}

pub fn owner_whatsapp(event: &BookingEvent, business_name: &str) -> String {
    let headline = match event {
        BookingEvent::Confirmed(_) => "New booking",
        BookingEvent::Cancelled(_) => "Cancelled booking",
    };

    let mut text = format!(
        "*{}* ({})\nCustomer: {}\nPhone: {}\nEmail: {}\nWhen: {} at {}\nServices: {}\nTotal: ${:.2}",
        headline,
        business_name,
        event.customer_name(),
        event.customer_phone(),
        event.customer_email(),
        display_date(event.date()),
        display_time(event.time()),
        service_summary(event.services()),
        total_price(event.services()),
    );
    if let Some(requests) = event.special_requests() {
        text.push_str(&format!("\nNotes: {}", requests));
    }
    text
}
