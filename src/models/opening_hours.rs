use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// One open period within a single day, `start < end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OpeningInterval {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl OpeningInterval {
    pub const fn new(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Self {
        Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        }
    }

    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(
            NaiveTime::from_hms_opt(self.start_hour, self.start_minute, 0)
                .unwrap_or(NaiveTime::MIN),
        )
    }

    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(
            NaiveTime::from_hms_opt(self.end_hour, self.end_minute, 0).unwrap_or(NaiveTime::MIN),
        )
    }
}

/// Static weekly schedule: each weekday maps to zero or more non-overlapping,
/// time-ordered open intervals. A day with no intervals is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningHours {
    // Indexed Monday=0 .. Sunday=6.
    days: [Vec<OpeningInterval>; 7],
}

impl OpeningHours {
    pub fn new(days: [Vec<OpeningInterval>; 7]) -> Self {
        Self { days }
    }

    pub fn intervals_for(&self, weekday: Weekday) -> &[OpeningInterval] {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn is_closed(&self, weekday: Weekday) -> bool {
        self.intervals_for(weekday).is_empty()
    }
}

impl Default for OpeningHours {
    /// Clinic defaults: Monday through Friday 8:00-14:00 and 16:15-21:20,
    /// closed on weekends.
    fn default() -> Self {
        let weekday_periods = vec![
            OpeningInterval::new(8, 0, 14, 0),
            OpeningInterval::new(16, 15, 21, 20),
        ];
        Self {
            days: [
                weekday_periods.clone(),
                weekday_periods.clone(),
                weekday_periods.clone(),
                weekday_periods.clone(),
                weekday_periods,
                vec![],
                vec![],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weekday_has_two_intervals() {
        let hours = OpeningHours::default();
        assert_eq!(hours.intervals_for(Weekday::Mon).len(), 2);
        assert_eq!(hours.intervals_for(Weekday::Fri).len(), 2);
    }

    #[test]
    fn test_default_weekend_closed() {
        let hours = OpeningHours::default();
        assert!(hours.is_closed(Weekday::Sat));
        assert!(hours.is_closed(Weekday::Sun));
        assert!(!hours.is_closed(Weekday::Wed));
    }

    #[test]
    fn test_interval_bounds_on_date() {
        let interval = OpeningInterval::new(8, 0, 14, 0);
        let date = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();
        assert_eq!(interval.start_on(date), date.and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(interval.end_on(date), date.and_hms_opt(14, 0, 0).unwrap());
    }
}
