use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub service_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i32,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub price_cents: Option<i64>,
    pub reimbursable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Confirmed,
        }
    }
}

/// What the booking form submits.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    /// "YYYY-MM-DD", from the selected day card.
    #[serde(default)]
    pub date: String,
    /// "HH:MM", from the selected slot.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub notes: String,
}

impl BookingRequest {
    pub fn start(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(date.and_time(time))
    }
}

/// Deterministic booking key. Same-day/same-time/same-service submissions
/// collapse onto one store key, so duplicates lose the reservation
/// transaction. `date` and `time` must be the canonical zero-padded
/// `day_key`/`time_key` spellings or the collapse breaks.
/// Distinct services can still claim the same clock slot;
/// whether that is intended needs product confirmation before the key is
/// changed to time-only.
pub fn booking_key(date: &str, time: &str, service_id: &str) -> String {
    format!("{date}_{time}_{service_id}")
}
