use axum::{extract::State, Json};
use common::types::HealthReport;

use crate::routes::AppState;

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport::now(state.service_name.as_ref()))
}
