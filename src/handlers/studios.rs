use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::Studio;
use crate::state::AppState;

// GET /api/studios
pub async fn list_studios(State(state): State<Arc<AppState>>) -> Json<Vec<Studio>> {
    Json(state.catalog.all().to_vec())
}
