use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::models::{Booking, BookingSlot, NewBooking, StudioTier, Viewer};
use crate::services::pricing;
use crate::services::storage::{SlotStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("slot overlaps an existing booking")]
    Conflict,

    #[error("booking id already in use: {0}")]
    DuplicateId(String),

    #[error("failed to persist ledger: {0}")]
    Persistence(#[from] StoreError),

    #[error("failed to encode ledger: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Insertion-ordered booking records mirrored whole into a single slot.
///
/// Conflict checks go through an index keyed by tier and date, so a booking
/// is only ever compared against bookings that start on the same date. A
/// session rolling past midnight is therefore not checked against the next
/// date's bookings.
pub struct Ledger {
    key: String,
    store: Box<dyn SlotStore>,
    bookings: Vec<Booking>,
    index: HashMap<(StudioTier, NaiveDate), Vec<usize>>,
}

impl Ledger {
    pub fn load(store: Box<dyn SlotStore>, key: impl Into<String>) -> Result<Self, LedgerError> {
        let key = key.into();
        let bookings: Vec<Booking> = match store.load(&key)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        let mut ledger = Self {
            key,
            store,
            bookings: Vec::new(),
            index: HashMap::new(),
        };
        for booking in bookings {
            ledger.insert(booking);
        }

        tracing::info!(key = %ledger.key, count = ledger.bookings.len(), "loaded booking ledger");
        Ok(ledger)
    }

    pub fn check_conflict(&self, candidate: &BookingSlot) -> bool {
        self.conflicts(candidate, None)
    }

    /// Like [`Ledger::check_conflict`], ignoring the booking with `id`.
    pub fn check_conflict_excluding(&self, candidate: &BookingSlot, id: &str) -> bool {
        self.conflicts(candidate, Some(id))
    }

    fn conflicts(&self, candidate: &BookingSlot, exclude: Option<&str>) -> bool {
        self.index
            .get(&(candidate.studio_tier, candidate.date))
            .into_iter()
            .flatten()
            .filter_map(|&pos| self.bookings.get(pos))
            .filter(|existing| exclude != Some(existing.id.as_str()))
            .any(|existing| candidate.overlaps(&existing.slot()))
    }

    /// Checks for conflicts, stamps the booking and persists the whole
    /// ledger. Nothing changes in memory unless the write succeeds.
    pub fn append(&mut self, new: NewBooking) -> Result<Booking, LedgerError> {
        if self.check_conflict(&new.slot()) {
            return Err(LedgerError::Conflict);
        }

        let id = match new.id {
            Some(id) if self.get_by_id(&id).is_some() => {
                return Err(LedgerError::DuplicateId(id));
            }
            Some(id) => id,
            None => self.generate_id(),
        };

        let booking = Booking {
            id,
            total_cost: pricing::compute_cost(new.hourly_rate, new.duration_hours),
            studio_tier: new.studio_tier,
            studio_name: new.studio_name,
            hourly_rate: new.hourly_rate,
            date: new.date,
            start_time: new.start_time,
            duration_hours: new.duration_hours,
            purpose: new.purpose,
            created_at: Utc::now(),
            user_id: new.user_id,
        };

        self.bookings.push(booking.clone());
        if let Err(e) = self.persist() {
            self.bookings.pop();
            return Err(e);
        }
        self.index_last();

        tracing::info!(
            booking_id = %booking.id,
            studio = booking.studio_tier.as_str(),
            date = %booking.date,
            start = %booking.start_time,
            hours = booking.duration_hours,
            "booking appended to ledger"
        );
        Ok(booking)
    }

    pub fn get_all(&self) -> Vec<Booking> {
        self.bookings.clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn get_by_user(&self, user_id: &str) -> Vec<Booking> {
        self.filtered(|b| b.user_id == user_id)
    }

    pub fn get_by_date(&self, date: NaiveDate) -> Vec<Booking> {
        self.filtered(|b| b.date == date)
    }

    pub fn get_by_studio(&self, tier: StudioTier) -> Vec<Booking> {
        self.filtered(|b| b.studio_tier == tier)
    }

    pub fn visible_to(&self, viewer: Viewer<'_>) -> Vec<Booking> {
        match viewer {
            Viewer::Admin => self.get_all(),
            Viewer::Owner(user_id) => self.get_by_user(user_id),
        }
    }

    /// Drops every booking and persists the empty ledger.
    pub fn clear(&mut self) -> Result<(), LedgerError> {
        self.store.save(&self.key, "[]")?;
        let dropped = self.bookings.len();
        self.bookings.clear();
        self.index.clear();
        tracing::warn!(key = %self.key, dropped, "booking ledger cleared");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    fn filtered(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        self.bookings.iter().filter(|b| keep(b)).cloned().collect()
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let raw = serde_json::to_string(&self.bookings)?;
        self.store.save(&self.key, &raw)?;
        Ok(())
    }

    fn insert(&mut self, booking: Booking) {
        self.bookings.push(booking);
        self.index_last();
    }

    fn index_last(&mut self) {
        let pos = self.bookings.len() - 1;
        if let Some(booking) = self.bookings.get(pos) {
            self.index
                .entry((booking.studio_tier, booking.date))
                .or_default()
                .push(pos);
        }
    }

    fn generate_id(&self) -> String {
        loop {
            let raw = Uuid::new_v4().simple().to_string().to_uppercase();
            let id = format!("TN{}", &raw[..8]);
            if self.get_by_id(&id).is_none() {
                return id;
            }
        }
    }
}
