use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;

use crate::errors::AppError;
use crate::models::{Booking, BookingRequest};
use crate::services::booking;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let now = Local::now().naive_local();
    let booking = booking::book(&state, &request, now).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}
