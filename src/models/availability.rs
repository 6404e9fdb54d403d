use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::Booking;

pub fn day_key(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub fn time_key(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

/// Read-through cache of taken slots, keyed day -> set of "HH:MM" keys.
///
/// Rebuilt from a range query over the bookings table and updated locally
/// after a successful reservation. It is never authoritative: the booking
/// transaction re-checks the key against the store, so a stale index can
/// only over-display availability, and the next attempt on a stale slot is
/// rejected there.
#[derive(Debug, Default, Clone)]
pub struct AvailabilityIndex {
    taken: HashMap<String, HashSet<String>>,
}

impl AvailabilityIndex {
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        let mut index = Self::default();
        for booking in bookings {
            index.mark_taken(&day_key(&booking.start), &time_key(&booking.start));
        }
        index
    }

    pub fn is_taken(&self, day: &str, time: &str) -> bool {
        self.taken
            .get(day)
            .map(|times| times.contains(time))
            .unwrap_or(false)
    }

    pub fn mark_taken(&mut self, day: &str, time: &str) {
        self.taken
            .entry(day.to_string())
            .or_default()
            .insert(time.to_string());
    }

    pub fn taken_on(&self, date: NaiveDate) -> Option<&HashSet<String>> {
        self.taken.get(&date.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{booking_key, BookingStatus};
    use chrono::Duration;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn booking(start: &str) -> Booking {
        let start = dt(start);
        Booking {
            id: booking_key(
                &start.format("%Y-%m-%d").to_string(),
                &start.format("%H:%M").to_string(),
                "classique",
            ),
            service_id: "classique".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "+32470000000".to_string(),
            notes: String::new(),
            start,
            end: start + Duration::minutes(30),
            duration_minutes: 30,
            status: BookingStatus::Confirmed,
            created_at: start,
            price_cents: None,
            reimbursable: true,
        }
    }

    #[test]
    fn test_from_bookings() {
        let index =
            AvailabilityIndex::from_bookings(&[booking("2025-06-16 08:00"), booking("2025-06-16 08:40")]);
        assert!(index.is_taken("2025-06-16", "08:00"));
        assert!(index.is_taken("2025-06-16", "08:40"));
        assert!(!index.is_taken("2025-06-16", "09:20"));
        assert!(!index.is_taken("2025-06-17", "08:00"));
    }

    #[test]
    fn test_mark_taken_then_is_taken() {
        let mut index = AvailabilityIndex::default();
        assert!(!index.is_taken("2025-06-16", "10:00"));
        index.mark_taken("2025-06-16", "10:00");
        assert!(index.is_taken("2025-06-16", "10:00"));
    }

    #[test]
    fn test_taken_on_date() {
        let index = AvailabilityIndex::from_bookings(&[booking("2025-06-16 08:00")]);
        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        assert!(index.taken_on(date).unwrap().contains("08:00"));
        assert!(index
            .taken_on(NaiveDate::from_ymd_opt(2025, 6, 17).unwrap())
            .is_none());
    }
}
