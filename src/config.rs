use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// Base URL of the remote booking, catalog and auth service.
    pub backend_url: String,
    /// Slot the booking ledger is stored under.
    pub ledger_key: String,
    pub max_booking_hours: u32,
    pub cors_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "tunespace.db".to_string()),
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),
            ledger_key: env::var("LEDGER_KEY").unwrap_or_else(|_| "tuneSpaceBookings".to_string()),
            max_booking_hours: env::var("MAX_BOOKING_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&h| h > 0)
                .unwrap_or(24),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty()),
        }
    }
}
