pub mod emailjs;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::models::{Booking, Service};

#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Send one templated message; `params` is a flat map of string fields.
    async fn send(&self, template_id: &str, params: &Value) -> anyhow::Result<()>;
}

const WEEKDAYS_FR: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];
const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
    "septembre", "octobre", "novembre", "décembre",
];

/// "lundi 16 juin 2025 à 08:40": the confirmation emails are in French.
pub fn format_datetime_fr(dt: &NaiveDateTime) -> String {
    format!(
        "{} {} {} {} à {:02}:{:02}",
        WEEKDAYS_FR[dt.weekday().num_days_from_monday() as usize],
        dt.day(),
        MONTHS_FR[dt.month0() as usize],
        dt.year(),
        dt.hour(),
        dt.minute(),
    )
}

fn shared_params(booking: &Booking, service: &Service) -> Value {
    let mut params = json!({
        "date_time": format_datetime_fr(&booking.start),
        "service_label": service.label,
        "duration": format!("{} min", service.duration_minutes),
        "phone": booking.phone,
        "notes": if booking.notes.is_empty() {
            "(aucune remarque)".to_string()
        } else {
            booking.notes.clone()
        },
    });
    if let Some(cents) = service.price_cents {
        params["price"] = json!(format!("{} € (non remboursable)", cents / 100));
    }
    params
}

/// Payload for the confirmation sent to the client.
pub fn client_payload(booking: &Booking, service: &Service, config: &AppConfig) -> Value {
    let mut params = shared_params(booking, service);
    params["to_name"] = json!(booking.name);
    params["to_email"] = json!(booking.email);
    params["clinic_email"] = json!(config.clinic_email);
    params
}

/// Payload for the copy sent to the clinic inbox; notes aggregate the
/// client's identity so the clinic sees everything in one field.
pub fn clinic_payload(booking: &Booking, service: &Service, config: &AppConfig) -> Value {
    let mut params = shared_params(booking, service);
    params["to_name"] = json!("PhysioBorn");
    params["to_email"] = json!(config.clinic_email);
    params["clinic_email"] = json!(config.clinic_email);
    params["notes"] = json!(format!(
        "{} • {} • {}",
        booking.name,
        if booking.email.is_empty() { "sans email" } else { &booking.email },
        if booking.notes.is_empty() { "aucune remarque" } else { &booking.notes },
    ));
    params
}
