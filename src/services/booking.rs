use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Booking, BookingRequest, NewBooking, Studio, StudioTier, User};
use crate::services::backend::ProposedBooking;
use crate::services::catalog::Catalog;
use crate::services::ledger::LedgerError;
use crate::services::pricing;
use crate::state::AppState;

/// How far ahead a session can be booked.
pub const BOOKING_HORIZON_DAYS: i64 = 365;

/// A booking form that passed validation, bound to a catalog studio.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub studio: Studio,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: u32,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub hourly_rate: u32,
    pub duration_hours: u32,
    pub total_cost: u64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub rollover: bool,
    pub time_range: String,
}

impl Candidate {
    pub fn quote(&self) -> Quote {
        let end = pricing::compute_end_time(self.start_time, self.duration_hours);
        Quote {
            hourly_rate: self.studio.hourly_rate,
            duration_hours: self.duration_hours,
            total_cost: pricing::compute_cost(self.studio.hourly_rate, self.duration_hours),
            start_time: self.start_time,
            end_time: end.end,
            rollover: end.rollover,
            time_range: pricing::format_time_range(self.start_time, self.duration_hours),
        }
    }

    pub fn into_new_booking(self, user: &User) -> NewBooking {
        NewBooking {
            id: None,
            studio_tier: self.studio.tier,
            studio_name: self.studio.name,
            hourly_rate: self.studio.hourly_rate,
            date: self.date,
            start_time: self.start_time,
            duration_hours: self.duration_hours,
            purpose: self.purpose,
            user_id: user.id.clone(),
        }
    }
}

/// `today` is the first bookable date.
pub fn validate_request(
    req: &BookingRequest,
    catalog: &Catalog,
    max_hours: u32,
    today: NaiveDate,
) -> Result<Candidate, AppError> {
    let purpose = req.purpose.trim();
    if req.studio.trim().is_empty()
        || req.date.trim().is_empty()
        || req.start_time.trim().is_empty()
        || req.duration.is_none()
        || purpose.is_empty()
    {
        return Err(AppError::Validation("Please fill in all fields".to_string()));
    }

    let studio = StudioTier::parse(&req.studio)
        .and_then(|tier| catalog.get(tier))
        .ok_or_else(|| AppError::Validation(format!("Unknown studio: {}", req.studio.trim())))?;

    let date = NaiveDate::parse_from_str(req.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", req.date.trim())))?;
    if date < today {
        return Err(AppError::Validation(
            "Please choose today or a later date".to_string(),
        ));
    }
    if date > today + Duration::days(BOOKING_HORIZON_DAYS) {
        return Err(AppError::Validation(format!(
            "Bookings open at most {BOOKING_HORIZON_DAYS} days ahead"
        )));
    }

    let start_time = parse_time_of_day(&req.start_time)
        .ok_or_else(|| AppError::Validation(format!("Invalid start time: {}", req.start_time.trim())))?;

    let duration_hours = match req.duration {
        Some(d) if d >= 1 && d <= i64::from(max_hours) => d as u32,
        _ => {
            return Err(AppError::Validation(format!(
                "Duration must be between 1 and {max_hours} hours"
            )))
        }
    };

    Ok(Candidate {
        studio: studio.clone(),
        date,
        start_time,
        duration_hours,
        purpose: purpose.to_string(),
    })
}

/// Accepts `HH:MM` (as sent by time inputs) and `HH:MM:SS`.
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn proposal_for(new: &NewBooking) -> ProposedBooking {
    let end = pricing::compute_end_time(new.start_time, new.duration_hours);
    ProposedBooking {
        studio_id: new.studio_tier.studio_id().to_string(),
        user_id: new.user_id.clone(),
        date: new.date.format("%Y-%m-%d").to_string(),
        start_time: new.start_time.format("%H:%M:%S").to_string(),
        end_time: end.end.format("%H:%M:%S").to_string(),
        duration: new.duration_hours,
        purpose: new.purpose.clone(),
    }
}

/// Validates, rejects early on a local conflict, asks the remote booking
/// service, then appends to the ledger. The ledger re-checks for conflicts
/// under its lock, so a slot taken while the remote call was in flight is
/// still refused.
pub async fn place_booking(
    state: &AppState,
    user: &User,
    req: &BookingRequest,
) -> Result<Booking, AppError> {
    let candidate = validate_request(
        req,
        &state.catalog,
        state.config.max_booking_hours,
        Utc::now().date_naive(),
    )?;
    let new = candidate.into_new_booking(user);

    let taken = state.ledger()?.check_conflict(&new.slot());
    if taken {
        tracing::info!(
            user = %user.id,
            studio = new.studio_tier.as_str(),
            date = %new.date,
            "booking rejected: slot taken"
        );
        return Err(AppError::Conflict);
    }

    let proposal = proposal_for(&new);
    let reply = state.backend.submit_booking(&proposal).await.map_err(|e| {
        tracing::error!(error = %e, "booking service call failed");
        AppError::RemoteService("Could not reach the booking service. Please try again.".to_string())
    })?;

    if !reply.success {
        let reason = reply.reason().unwrap_or("Unknown error");
        tracing::warn!(user = %user.id, reason, "booking service declined booking");
        return Err(AppError::RemoteService(format!("Booking failed: {reason}")));
    }

    let appended = state.ledger()?.append(new);
    match appended {
        Ok(booking) => Ok(booking),
        Err(LedgerError::Conflict) => {
            tracing::warn!(
                user = %proposal.user_id,
                studio = %proposal.studio_id,
                date = %proposal.date,
                start = %proposal.start_time,
                end = %proposal.end_time,
                "booking service accepted a slot taken locally meanwhile"
            );
            Err(AppError::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn request(studio: &str, date: &str, start: &str, duration: Option<i64>, purpose: &str) -> BookingRequest {
        BookingRequest {
            studio: studio.to_string(),
            date: date.to_string(),
            start_time: start.to_string(),
            duration,
            purpose: purpose.to_string(),
        }
    }

    #[test]
    fn test_validate_and_quote() {
        let catalog = Catalog::default();
        let candidate =
            validate_request(&request("first", "2025-06-01", "10:00", Some(2), "Podcast"), &catalog, 24, today())
                .unwrap();

        assert_eq!(candidate.studio.tier, StudioTier::First);
        assert_eq!(candidate.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        let quote = candidate.quote();
        assert_eq!(quote.total_cost, 3000);
        assert_eq!(quote.end_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert!(!quote.rollover);
        assert_eq!(quote.time_range, "10:00 AM - 12:00 PM");
    }

    #[test]
    fn test_quote_rolls_over() {
        let catalog = Catalog::default();
        let quote =
            validate_request(&request("2", "2025-06-01", "22:00:00", Some(4), "Jam"), &catalog, 24, today())
                .unwrap()
                .quote();
        assert_eq!(quote.total_cost, 3200);
        assert_eq!(quote.end_time, NaiveTime::from_hms_opt(2, 0, 0).unwrap());
        assert!(quote.rollover);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let catalog = Catalog::default();
        for req in [
            request("", "2025-06-01", "10:00", Some(1), "x"),
            request("first", "", "10:00", Some(1), "x"),
            request("first", "2025-06-01", "", Some(1), "x"),
            request("first", "2025-06-01", "10:00", None, "x"),
            request("first", "2025-06-01", "10:00", Some(1), "   "),
        ] {
            let err = validate_request(&req, &catalog, 24, today()).unwrap_err();
            assert!(matches!(err, AppError::Validation(msg) if msg == "Please fill in all fields"));
        }
    }

    #[test]
    fn test_duration_bounds() {
        let catalog = Catalog::default();
        for duration in [0, -3, 25] {
            let req = request("first", "2025-06-01", "10:00", Some(duration), "x");
            assert!(matches!(
                validate_request(&req, &catalog, 24, today()),
                Err(AppError::Validation(_))
            ));
        }
        let req = request("first", "2025-06-01", "10:00", Some(8), "x");
        assert!(validate_request(&req, &catalog, 6, today()).is_err());
        assert!(validate_request(&req, &catalog, 8, today()).is_ok());
    }

    #[test]
    fn test_bad_formats_rejected() {
        let catalog = Catalog::default();
        let cases = [
            request("vip", "2025-06-01", "10:00", Some(1), "x"),
            request("first", "01/06/2025", "10:00", Some(1), "x"),
            request("first", "2025-06-01", "25:00", Some(1), "x"),
        ];
        for req in cases {
            assert!(matches!(
                validate_request(&req, &catalog, 24, today()),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_date_window() {
        let catalog = Catalog::default();
        for date in ["2025-04-30", "1999-01-01", "2026-05-02", "+262142-12-31"] {
            let req = request("first", date, "23:00", Some(2), "x");
            assert!(
                matches!(validate_request(&req, &catalog, 24, today()), Err(AppError::Validation(_))),
                "date: {date}"
            );
        }
        for date in ["2025-05-01", "2026-05-01"] {
            let req = request("first", date, "23:00", Some(2), "x");
            assert!(validate_request(&req, &catalog, 24, today()).is_ok(), "date: {date}");
        }
    }

    #[test]
    fn test_proposal_carries_end_time() {
        let catalog = Catalog::default();
        let user = User {
            id: "asha@example.com".to_string(),
            name: "Asha".to_string(),
            role: crate::models::Role::User,
        };
        let new = validate_request(&request("third", "2025-06-01", "23:30", Some(2), "Mix"), &catalog, 24, today())
            .unwrap()
            .into_new_booking(&user);

        let proposal = proposal_for(&new);
        assert_eq!(proposal.studio_id, "3");
        assert_eq!(proposal.user_id, "asha@example.com");
        assert_eq!(proposal.start_time, "23:30:00");
        assert_eq!(proposal.end_time, "01:30:00");
        assert_eq!(proposal.duration, 2);
    }
}
