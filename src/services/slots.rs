use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::OpeningHours;

/// Standard occupancy used to step between candidate slots.
pub const DEFAULT_OCCUPANCY_MINUTES: i64 = 30;
/// Idle gap between consecutive appointments.
pub const BUFFER_MINUTES: i64 = 10;
/// Rolling window of days offered for booking.
pub const LOOKAHEAD_DAYS: i64 = 14;

#[derive(Debug, Clone, Serialize)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub closed: bool,
    pub slots: Vec<NaiveDateTime>,
}

/// Candidate slot starts for one calendar day, chronological.
///
/// A slot is emitted only if the full occupancy (the selected service's
/// duration) fits strictly inside the interval, and, on the current day,
/// only if the start is still in the future. The cursor always advances by
/// `DEFAULT_OCCUPANCY_MINUTES + BUFFER_MINUTES` rather than by the selected
/// duration; a 45-minute service therefore walks the same grid as the
/// 30-minute ones. That matches how the clinic has always published its
/// slots, so it stays as is.
pub fn slots_for_date(
    hours: &OpeningHours,
    date: NaiveDate,
    duration_minutes: i32,
    now: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    let occupancy = Duration::minutes(duration_minutes as i64);
    let step = Duration::minutes(DEFAULT_OCCUPANCY_MINUTES + BUFFER_MINUTES);
    let is_today = date == now.date();

    let mut slots = Vec::new();
    for interval in hours.intervals_for(date.weekday()) {
        let mut cursor = interval.start_on(date);
        let end = interval.end_on(date);

        while cursor + occupancy < end {
            if !is_today || cursor > now {
                slots.push(cursor);
            }
            cursor += step;
        }
    }
    slots
}

/// The booking window: today plus the next `lookahead - 1` days.
pub fn upcoming_days(
    hours: &OpeningHours,
    duration_minutes: i32,
    now: NaiveDateTime,
    lookahead: i64,
) -> Vec<DaySlots> {
    (0..lookahead)
        .map(|offset| {
            let date = now.date() + Duration::days(offset);
            DaySlots {
                date,
                closed: hours.is_closed(date.weekday()),
                slots: slots_for_date(hours, date, duration_minutes, now),
            }
        })
        .collect()
}

/// First slot in the window not marked taken, if any.
pub fn next_available<'a>(
    days: &'a [DaySlots],
    is_taken: impl Fn(&NaiveDateTime) -> bool,
) -> Option<&'a NaiveDateTime> {
    days.iter()
        .flat_map(|day| day.slots.iter())
        .find(|slot| !is_taken(*slot))
}
