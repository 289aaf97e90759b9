pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Booking as proposed to the remote booking service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProposedBooking {
    pub studio_id: String,
    pub user_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    pub purpose: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendReply {
    #[serde(default)]
    pub success: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl BackendReply {
    /// The backend's own failure text, if it sent one.
    pub fn reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    pub user: Option<RemoteUser>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Studio metadata from the remote catalog. Every field is optional; the
/// static tier defaults fill the gaps. Entries map onto tiers by position,
/// so any class label the service sends is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteStudio {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub badge: Option<String>,
    pub hourly_rate: Option<serde_json::Value>,
    pub capacity: Option<serde_json::Value>,
}

#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn submit_booking(&self, proposal: &ProposedBooking) -> anyhow::Result<BackendReply>;
    async fn login(&self, username: &str, password: &str) -> anyhow::Result<LoginReply>;
    async fn register(&self, registration: &Registration) -> anyhow::Result<BackendReply>;
    async fn list_studios(&self) -> anyhow::Result<Vec<RemoteStudio>>;
}
