use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::StudioTier;
use crate::services::pricing::{self, EndTime};

/// A stored reservation. Field names follow the widget's `tuneSpaceBookings`
/// blob so an exported browser ledger loads as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(rename = "studioClass")]
    pub studio_tier: StudioTier,
    pub studio_name: String,
    #[serde(rename = "studioPrice")]
    pub hourly_rate: u32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    #[serde(rename = "duration")]
    pub duration_hours: u32,
    pub purpose: String,
    pub total_cost: u64,
    #[serde(rename = "bookingTime")]
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

impl Booking {
    pub fn slot(&self) -> BookingSlot {
        BookingSlot {
            studio_tier: self.studio_tier,
            date: self.date,
            start_time: self.start_time,
            duration_hours: self.duration_hours,
        }
    }

    pub fn end_time(&self) -> EndTime {
        pricing::compute_end_time(self.start_time, self.duration_hours)
    }
}

/// A booking that has not been appended to the ledger yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    /// Assigned by the ledger when absent.
    pub id: Option<String>,
    pub studio_tier: StudioTier,
    pub studio_name: String,
    pub hourly_rate: u32,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: u32,
    pub purpose: String,
    pub user_id: String,
}

impl NewBooking {
    pub fn slot(&self) -> BookingSlot {
        BookingSlot {
            studio_tier: self.studio_tier,
            date: self.date,
            start_time: self.start_time,
            duration_hours: self.duration_hours,
        }
    }
}

/// The part of a booking that takes part in conflict detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSlot {
    pub studio_tier: StudioTier,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: u32,
}

impl BookingSlot {
    /// Half-open `[start, end)` interval anchored on the slot's own date. An
    /// interval that rolls past midnight simply extends beyond that date.
    /// `None` when the end falls outside the calendar chrono can represent.
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.date.and_time(self.start_time);
        let end = start.checked_add_signed(Duration::hours(i64::from(self.duration_hours)))?;
        Some((start, end))
    }

    /// An unrepresentable interval counts as overlapping, so it can never be
    /// double-booked.
    pub fn overlaps(&self, other: &BookingSlot) -> bool {
        match (self.interval(), other.interval()) {
            (Some((start, end)), Some((other_start, other_end))) => {
                start < other_end && end > other_start
            }
            _ => true,
        }
    }
}

/// Booking form as submitted by the widget. Everything arrives as text so
/// that missing and malformed fields surface as validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub studio: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    pub duration: Option<i64>,
    #[serde(default)]
    pub purpose: String,
}
