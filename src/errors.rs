use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::Notice;
use crate::services::ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("booking conflict")]
    Conflict,

    #[error("persistence error: {0}")]
    Persistence(String),

    /// Carries a message that is safe to show the visitor.
    #[error("remote service error: {0}")]
    RemoteService(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Conflict => AppError::Conflict,
            LedgerError::DuplicateId(id) => {
                AppError::Validation(format!("booking id {id} is already in use"))
            }
            LedgerError::Persistence(_) | LedgerError::Serialization(_) => {
                AppError::Persistence(e.to_string())
            }
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RemoteService(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    /// What the visitor sees. Internal details stay in the logs.
    pub fn notice(&self) -> Notice {
        match self {
            AppError::Validation(msg) => Notice::error("Error", msg.as_str()),
            AppError::Conflict => Notice::error(
                "Booking Conflict",
                "This studio is already booked for the selected time. Please choose another slot.",
            ),
            AppError::Persistence(_) => Notice::error(
                "Error",
                "Something went wrong while saving. Please try again.",
            ),
            AppError::RemoteService(msg) => Notice::error("Request Failed", msg.as_str()),
            AppError::NotFound(what) => Notice::error("Not Found", format!("{what} not found.")),
            AppError::Unauthorized => Notice::error("Error", "Please login to continue."),
            AppError::Forbidden => Notice::error("Access Denied", "Admin access required."),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Persistence(detail) = &self {
            tracing::error!(error = %detail, "persistence failure");
        }

        (self.status(), Json(self.notice())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::services::storage::StoreError;

    #[test]
    fn test_ledger_errors_map_to_app_errors() {
        assert!(matches!(AppError::from(LedgerError::Conflict), AppError::Conflict));
        assert!(matches!(
            AppError::from(LedgerError::DuplicateId("TN1".to_string())),
            AppError::Validation(_)
        ));
        let store = LedgerError::Persistence(StoreError::Unavailable("quota".to_string()));
        assert!(matches!(AppError::from(store), AppError::Persistence(_)));
    }

    #[test]
    fn test_persistence_notice_hides_detail() {
        let err = AppError::Persistence("disk I/O error at page 7".to_string());
        let notice = err.notice();
        assert_eq!(notice.severity, Severity::Error);
        assert!(!notice.description.contains("page 7"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::RemoteService("down".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
