use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::models::{AvailabilityIndex, OpeningHours, ServiceCatalog};
use crate::services::notify::NotificationProvider;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub catalog: ServiceCatalog,
    pub hours: OpeningHours,
    pub availability: Mutex<AvailabilityIndex>,
    pub notifier: Box<dyn NotificationProvider>,
}
