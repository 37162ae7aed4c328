use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::chain::amount::AmountError;
use crate::chain::ChainError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The marketplace contract rejected the transaction.
    #[error("Transaction reverted: {reason}")]
    Reverted { code: Option<u32>, reason: String },

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Reverted { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Reverted { .. } => "CONTRACT_REVERTED",
            AppError::ExternalServiceError(_) => "EXTERNAL_SERVICE_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => {
                warn!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::Reverted { code, reason } => {
                warn!(revert_code = ?code, reason = %reason, "Transaction reverted");
            }
            AppError::ExternalServiceError(msg) => {
                error!(message = %msg, "Ledger call failed");
            }
        }
    }
}

impl From<ChainError> for AppError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Reverted { code, reason } => AppError::Reverted { code, reason },
            ChainError::UnknownAccount(account) => {
                AppError::NotFound(format!("Account '{}' is not known to the wallet", account))
            }
            ChainError::TimedOut => AppError::ExternalServiceError(
                "Transaction is still pending; check /transactions later".to_string(),
            ),
            ChainError::Decode(_) | ChainError::Host(_) | ChainError::Unavailable => {
                AppError::ExternalServiceError(err.to_string())
            }
        }
    }
}

impl From<AmountError> for AppError {
    fn from(err: AmountError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        let public_message = match &self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ExternalServiceError(msg) => msg.clone(),
            AppError::Reverted { reason, .. } => reason.clone(),
        };

        // Revert codes are stable and safe to expose; nothing else is.
        let details = match &self {
            AppError::Reverted {
                code: Some(code), ..
            } => Some(json!({ "revert_code": code })),
            _ => None,
        };

        error_response(code, public_message, details, status)
    }
}
