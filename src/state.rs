use std::sync::{Mutex, MutexGuard};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::backend::BookingBackend;
use crate::services::catalog::Catalog;
use crate::services::ledger::Ledger;
use crate::services::session::SessionStore;

pub struct AppState {
    pub config: AppConfig,
    pub ledger: Mutex<Ledger>,
    pub sessions: Mutex<SessionStore>,
    pub catalog: Catalog,
    pub backend: Box<dyn BookingBackend>,
}

impl AppState {
    pub fn ledger(&self) -> Result<MutexGuard<'_, Ledger>, AppError> {
        self.ledger
            .lock()
            .map_err(|_| AppError::Persistence("ledger lock poisoned".to_string()))
    }

    pub fn sessions(&self) -> Result<MutexGuard<'_, SessionStore>, AppError> {
        self.sessions
            .lock()
            .map_err(|_| AppError::Persistence("session lock poisoned".to_string()))
    }
}
