use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::handlers::auth::current_user;
use crate::models::{Booking, BookingRequest, Notice, StudioTier};
use crate::services::booking::{self, Quote};
use crate::services::pricing;
use crate::services::receipt::render_receipt;
use crate::state::AppState;

/// A stored booking plus its derived end time, as listed to the widget.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    #[serde(flatten)]
    booking: Booking,
    end_time: NaiveTime,
    rollover: bool,
    time_range: String,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        let end = booking.end_time();
        let time_range = pricing::format_time_range(booking.start_time, booking.duration_hours);
        Self {
            booking,
            end_time: end.end,
            rollover: end.rollover,
            time_range,
        }
    }
}

// POST /api/bookings/quote
pub async fn quote_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookingRequest>,
) -> Result<Json<Quote>, AppError> {
    let candidate = booking::validate_request(
        &body,
        &state.catalog,
        state.config.max_booking_hours,
        Utc::now().date_naive(),
    )?;
    Ok(Json(candidate.quote()))
}

// POST /api/bookings
#[derive(Serialize)]
pub struct CreateBookingResponse {
    booking: BookingView,
    receipt: String,
    notice: Notice,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<BookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), AppError> {
    let user = current_user(&state, &headers)?;
    let stored = booking::place_booking(&state, &user, &body).await?;

    let notice = Notice::success(
        "Booking Confirmed!",
        format!(
            "Your studio has been booked for {}.",
            pricing::format_date(stored.date)
        ),
    );
    let receipt = render_receipt(&stored);

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking: stored.into(),
            receipt,
            notice,
        }),
    ))
}

// GET /api/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub date: Option<String>,
    pub studio: Option<String>,
}

#[derive(Serialize)]
pub struct BookingList {
    bookings: Vec<BookingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<Notice>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<BookingList>, AppError> {
    let user = current_user(&state, &headers)?;
    let viewer = user.viewer();

    let date = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(d) => Some(
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| AppError::Validation(format!("Invalid date: {d}")))?,
        ),
        None => None,
    };
    let studio = match query.studio.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => Some(
            StudioTier::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown studio: {s}")))?,
        ),
        None => None,
    };

    let bookings = {
        let ledger = state.ledger()?;
        match (date, studio) {
            (None, None) => ledger.visible_to(viewer),
            (Some(date), studio) => ledger
                .get_by_date(date)
                .into_iter()
                .filter(|b| studio.map_or(true, |s| b.studio_tier == s))
                .filter(|b| viewer.can_see(b))
                .collect(),
            (None, Some(studio)) => ledger
                .get_by_studio(studio)
                .into_iter()
                .filter(|b| viewer.can_see(b))
                .collect::<Vec<_>>(),
        }
    };

    let notice = bookings.is_empty().then(|| {
        Notice::info("No Bookings", "You haven't made any bookings yet.")
    });

    Ok(Json(BookingList {
        bookings: bookings.into_iter().map(BookingView::from).collect(),
        notice,
    }))
}

// GET /api/bookings/:id/receipt
pub async fn booking_receipt(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let user = current_user(&state, &headers)?;

    let stored = state
        .ledger()?
        .get_by_id(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Booking".to_string()))?;

    if !user.viewer().can_see(&stored) {
        return Err(AppError::Forbidden);
    }

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_receipt(&stored),
    )
        .into_response())
}
