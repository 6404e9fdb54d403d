use chrono::{Duration, NaiveDateTime};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{booking_key, day_key, time_key, Booking, BookingRequest, BookingStatus};
use crate::services::notify;
use crate::state::AppState;

/// One booking attempt: validate, atomically reserve the slot key against
/// the store, then fire the best-effort side effects. The reservation
/// transaction is the only serialization point; once it commits the booking
/// stands regardless of what the notifications do.
pub async fn book(
    state: &AppState,
    request: &BookingRequest,
    now: NaiveDateTime,
) -> Result<Booking, AppError> {
    // Validation: no storage round-trip on any failure here.
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name"));
    }
    if request.phone.trim().is_empty() {
        return Err(AppError::Validation("phone"));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("email"));
    }
    let start = request.start().ok_or(AppError::Validation("slot"))?;
    let service = state
        .catalog
        .get(&request.service)
        .ok_or(AppError::Validation("service"))?;

    // Key and index entries come from the parsed instant, not the raw form
    // strings: chrono parses "8:40" and "2030-6-17" leniently, and an
    // unpadded variant must collapse onto the same slot key as the padded
    // one.
    let day = day_key(&start);
    let time = time_key(&start);

    let booking = Booking {
        id: booking_key(&day, &time, &service.id),
        service_id: service.id.clone(),
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        phone: request.phone.trim().to_string(),
        notes: request.notes.trim().to_string(),
        start,
        end: start + Duration::minutes(service.duration_minutes as i64),
        duration_minutes: service.duration_minutes,
        status: BookingStatus::Confirmed,
        created_at: now,
        price_cents: service.price_cents,
        reimbursable: service.reimbursable,
    };

    // Atomic reservation: the store decides who wins the key.
    let created = {
        let mut db = state.db.lock().unwrap();
        queries::insert_booking_if_absent(&mut db, &booking).map_err(AppError::Storage)?
    };
    if !created {
        // The conflict proves the cache was stale; record the slot as taken
        // so it stops being offered before the next full reload.
        let mut availability = state.availability.lock().unwrap();
        availability.mark_taken(&day, &time);
        tracing::info!(key = %booking.id, "slot already taken");
        return Err(AppError::SlotTaken);
    }

    tracing::info!(key = %booking.id, service = %booking.service_id, "booking confirmed");

    // Local cache update; the next availability load will see the row anyway.
    {
        let mut availability = state.availability.lock().unwrap();
        availability.mark_taken(&day, &time);
    }

    // Both emails are attempted independently; neither failure unwinds the
    // committed booking.
    let client_params = notify::client_payload(&booking, service, &state.config);
    let clinic_params = notify::clinic_payload(&booking, service, &state.config);
    let (client_sent, clinic_sent) = tokio::join!(
        state
            .notifier
            .send(&state.config.emailjs_client_template, &client_params),
        state
            .notifier
            .send(&state.config.emailjs_admin_template, &clinic_params),
    );
    if let Err(e) = client_sent {
        tracing::warn!(error = %e, key = %booking.id, "client confirmation email failed");
    }
    if let Err(e) = clinic_sent {
        tracing::warn!(error = %e, key = %booking.id, "clinic notification email failed");
    }

    Ok(booking)
}
