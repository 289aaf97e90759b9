use serde::{Deserialize, Serialize};

use crate::models::Booking;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

/// An authenticated visitor. `id` is the login email and owns bookings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn viewer(&self) -> Viewer<'_> {
        match self.role {
            Role::Admin => Viewer::Admin,
            Role::User => Viewer::Owner(&self.id),
        }
    }
}

/// What a caller is allowed to see in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer<'a> {
    Admin,
    Owner(&'a str),
}

impl Viewer<'_> {
    pub fn can_see(&self, booking: &Booking) -> bool {
        match self {
            Viewer::Admin => true,
            Viewer::Owner(user_id) => booking.user_id == *user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    use crate::models::StudioTier;

    fn owned_by(user_id: &str) -> Booking {
        Booking {
            id: "TN0000BEEF".to_string(),
            studio_tier: StudioTier::Third,
            studio_name: "3rd Class Studio".to_string(),
            hourly_rate: 500,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_hours: 1,
            purpose: "Demo".to_string(),
            total_cost: 500,
            created_at: Utc::now(),
            user_id: user_id.to_string(),
        }
    }

    #[test]
    fn test_viewer_visibility() {
        let asha = User {
            id: "asha@example.com".to_string(),
            name: "Asha".to_string(),
            role: Role::User,
        };
        let admin = User {
            id: "admin@tunespace.in".to_string(),
            name: "Admin".to_string(),
            role: Role::parse("admin"),
        };

        assert!(asha.viewer().can_see(&owned_by("asha@example.com")));
        assert!(!asha.viewer().can_see(&owned_by("ravi@example.com")));
        assert!(admin.viewer().can_see(&owned_by("ravi@example.com")));
    }
}
