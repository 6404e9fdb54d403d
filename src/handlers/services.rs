use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::Service;
use crate::state::AppState;

pub async fn list_services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.catalog.services.clone())
}
