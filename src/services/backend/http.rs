use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{
    BackendReply, BookingBackend, LoginReply, ProposedBooking, Registration, RemoteStudio,
};

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl BookingBackend for HttpBackend {
    async fn submit_booking(&self, proposal: &ProposedBooking) -> anyhow::Result<BackendReply> {
        tracing::debug!(?proposal, "submitting booking to backend");

        // Rejections come back as JSON with `success: false`, whatever the status.
        self.client
            .post(self.url("bookings"))
            .json(proposal)
            .send()
            .await
            .context("failed to call booking service")?
            .json()
            .await
            .context("failed to parse booking service response")
    }

    async fn login(&self, username: &str, password: &str) -> anyhow::Result<LoginReply> {
        self.client
            .post(self.url("login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .context("failed to call login endpoint")?
            .json()
            .await
            .context("failed to parse login response")
    }

    async fn register(&self, registration: &Registration) -> anyhow::Result<BackendReply> {
        self.client
            .post(self.url("register"))
            .json(registration)
            .send()
            .await
            .context("failed to call register endpoint")?
            .json()
            .await
            .context("failed to parse register response")
    }

    async fn list_studios(&self) -> anyhow::Result<Vec<RemoteStudio>> {
        self.client
            .get(self.url("studios"))
            .send()
            .await
            .context("failed to call studio catalog")?
            .error_for_status()
            .context("studio catalog returned error")?
            .json()
            .await
            .context("failed to parse studio catalog")
    }
}
