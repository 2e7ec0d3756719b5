//! # Booking dates and times
//!
//! Appointments keep their date and time as two text columns in a fixed
//! storage format: `MM/DD/YYYY` for the date and 24-hour `HH:MM` for the time.
//! Clients send dates either in that storage format or day-first
//! (`DD-MM-YYYY`, `DD.MM.YYYY`), so every date crossing the API boundary goes
//! through [`BookingDate::parse`] exactly once. Inputs in any other shape are
//! rejected with a [`DateParseError`] instead of being guessed at.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DateParseError, TimeParseError};
use crate::formatting::format_time_12h;

/// Storage format for appointment dates.
pub const STORAGE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Storage format for appointment times.
pub const STORAGE_TIME_FORMAT: &str = "%H:%M";

/// A calendar date for a booking, independent of the format it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookingDate(NaiveDate);

impl BookingDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses a client-supplied date.
    ///
    /// Accepted shapes:
    ///
    /// * `MM/DD/YYYY` (the storage format)
    /// * `DD-MM-YYYY`
    /// * `DD.MM.YYYY`
    ///
    /// Day and month may be one or two digits; the year must have four.
    ///
    /// # Errors
    ///
    /// * [`DateParseError::Empty`] for blank input
    /// * [`DateParseError::UnrecognizedFormat`] when the shape matches none of the above
    /// * [`DateParseError::InvalidDate`] when the shape matches but the date does not exist
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DateParseError::Empty);
        }

        let (separator, month_first) = if trimmed.contains('/') {
            ('/', true)
        } else if trimmed.contains('-') {
            ('-', false)
        } else if trimmed.contains('.') {
            ('.', false)
        } else {
            return Err(DateParseError::UnrecognizedFormat(trimmed.to_string()));
        };

        let parts: Vec<&str> = trimmed.split(separator).collect();
        let well_formed = parts.len() == 3
            && parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
            && parts[0].len() <= 2
            && parts[1].len() <= 2
            && parts[2].len() == 4;
        if !well_formed {
            return Err(DateParseError::UnrecognizedFormat(trimmed.to_string()));
        }

        let first: u32 = parts[0].parse().map_err(|_| DateParseError::UnrecognizedFormat(trimmed.to_string()))?;
        let second: u32 = parts[1].parse().map_err(|_| DateParseError::UnrecognizedFormat(trimmed.to_string()))?;
        let year: i32 = parts[2].parse().map_err(|_| DateParseError::UnrecognizedFormat(trimmed.to_string()))?;

        let (month, day) = if month_first { (first, second) } else { (second, first) };

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DateParseError::InvalidDate(trimmed.to_string()))
    }

    /// The value stored in the `date` column and used in store queries.
    pub fn to_storage_string(&self) -> String {
        self.0.format(STORAGE_DATE_FORMAT).to_string()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BookingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_storage_string())
    }
}

/// A time of day for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookingTime(NaiveTime);

impl BookingTime {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Parses `HH:MM` / `H:MM` on a 24-hour clock, or `H:MM AM` / `H:MM PM`.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TimeParseError::Empty);
        }
        let unrecognized = || TimeParseError::UnrecognizedFormat(trimmed.to_string());

        let upper = trimmed.to_ascii_uppercase();
        let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = upper.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (upper.as_str(), None)
        };

        let (hour, minute) = split_clock(clock).ok_or_else(unrecognized)?;

        let hour = match meridiem {
            None if hour < 24 => hour,
            Some(is_pm) if (1..=12).contains(&hour) => match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, false) => h,
                (h, true) => h + 12,
            },
            _ => return Err(unrecognized()),
        };

        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(unrecognized)
    }

    /// The value stored in the `time` column.
    pub fn to_storage_string(&self) -> String {
        self.0.format(STORAGE_TIME_FORMAT).to_string()
    }

    /// 12-hour rendering used in listings and notifications.
    pub fn to_12h_string(&self) -> String {
        format_time_12h(&self.to_storage_string())
    }
}

impl fmt::Display for BookingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_storage_string())
    }
}

/// Splits `H:MM` / `HH:MM` into numbers. Minutes must be exactly two digits.
pub(crate) fn split_clock(clock: &str) -> Option<(u32, u32)> {
    let (hour, minute) = clock.split_once(':')?;
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !digits(hour) || hour.len() > 2 || !digits(minute) || minute.len() != 2 {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    (minute < 60).then_some((hour, minute))
}
