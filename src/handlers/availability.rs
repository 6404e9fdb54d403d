use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::models::AvailabilityIndex;
use crate::services::slots::{self, DEFAULT_OCCUPANCY_MINUTES, LOOKAHEAD_DAYS};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub service: Option<String>,
}

#[derive(Serialize)]
pub struct SlotView {
    pub time: String,
    pub taken: bool,
}

#[derive(Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub closed: bool,
    pub slots: Vec<SlotView>,
}

#[derive(Serialize)]
pub struct AvailabilityView {
    pub days: Vec<DayView>,
    pub next_available: Option<NaiveDateTime>,
}

/// The look-ahead window with per-slot taken flags.
///
/// A failed bookings load degrades instead of returning a 5xx: the shared
/// index keeps serving whatever was last known (empty at startup), and
/// over-displaying only costs the loser a SlotTaken at booking time, while
/// hiding all slots would block everyone.
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Json<AvailabilityView> {
    let now = Local::now().naive_local();

    let duration = query
        .service
        .as_deref()
        .and_then(|id| state.catalog.get(id))
        .map(|s| s.duration_minutes)
        .unwrap_or(DEFAULT_OCCUPANCY_MINUTES as i32);

    let window_end = now + Duration::days(LOOKAHEAD_DAYS);
    let loaded = {
        let db = state.db.lock().unwrap();
        queries::bookings_in_range(&db, &now, &window_end)
    };

    // Reload the shared cache from the store when it answers, then serve
    // from the cache either way.
    let index = {
        let mut availability = state.availability.lock().unwrap();
        match loaded {
            Ok(bookings) => *availability = AvailabilityIndex::from_bookings(&bookings),
            Err(e) => {
                tracing::error!(error = %e, "failed to load bookings, serving last known availability");
            }
        }
        availability.clone()
    };

    let days = slots::upcoming_days(&state.hours, duration, now, LOOKAHEAD_DAYS);
    let next_available = slots::next_available(&days, |slot| {
        index.is_taken(
            &slot.format("%Y-%m-%d").to_string(),
            &slot.format("%H:%M").to_string(),
        )
    })
    .copied();

    let days = days
        .into_iter()
        .map(|day| DayView {
            date: day.date,
            closed: day.closed,
            slots: day
                .slots
                .iter()
                .map(|slot| {
                    let time = slot.format("%H:%M").to_string();
                    let taken = index.is_taken(&slot.format("%Y-%m-%d").to_string(), &time);
                    SlotView { time, taken }
                })
                .collect(),
        })
        .collect();

    Json(AvailabilityView {
        days,
        next_available,
    })
}
