use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub emailjs_public_key: String,
    pub emailjs_service_id: String,
    pub emailjs_client_template: String,
    pub emailjs_admin_template: String,
    pub clinic_email: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let client_template = env::var("EMAILJS_TEMPLATE_ID").unwrap_or_default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "physioborn.db".to_string()),
            emailjs_public_key: env::var("EMAILJS_PUBLIC_KEY").unwrap_or_default(),
            emailjs_service_id: env::var("EMAILJS_SERVICE_ID").unwrap_or_default(),
            // The admin template falls back to the client one.
            emailjs_admin_template: env::var("EMAILJS_ADMIN_TEMPLATE_ID")
                .unwrap_or_else(|_| client_template.clone()),
            emailjs_client_template: client_template,
            clinic_email: env::var("CLINIC_EMAIL")
                .unwrap_or_else(|_| "contact@physioborn.be".to_string()),
        }
    }
}
