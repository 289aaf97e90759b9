use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::services::calendar::generate_ics;
use crate::state::AppState;

// GET /calendar/:booking_id
pub async fn download_ics(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Response {
    // Strip .ics suffix if present
    let booking_id = raw_id.strip_suffix(".ics").unwrap_or(&raw_id);

    let booking = match state.ledger() {
        Ok(ledger) => ledger.get_by_id(booking_id).cloned(),
        Err(e) => return e.into_response(),
    };
    let Some(booking) = booking else {
        return (StatusCode::NOT_FOUND, "Booking not found").into_response();
    };

    let Some(ics) = generate_ics(&booking) else {
        tracing::warn!(booking_id, "booking end time out of range, no calendar entry");
        return (StatusCode::UNPROCESSABLE_ENTITY, "Booking time out of range").into_response();
    };
    let filename = format!("tunespace-{booking_id}.ics");

    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        ics,
    )
        .into_response()
}
