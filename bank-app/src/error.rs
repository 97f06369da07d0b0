//! Error types for the bank service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bank_core::{AccountId, CoreError, ValidationProblem};
use serde_json::json;

/// Message attached to the `amount` field when a withdrawal would overdraw.
pub const INSUFFICIENT_FUNDS: &str = "not enough funds available";

/// Errors that can occur while handling a bank request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BankError {
    /// No account is stored under the given id.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// A withdrawal would leave the account with a negative balance.
    #[error(transparent)]
    InsufficientFunds(CoreError),

    /// The request body is malformed or contains invalid values.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl IntoResponse for BankError {
    fn into_response(self) -> Response {
        match self {
            BankError::AccountNotFound(_) => {
                (StatusCode::NOT_FOUND, Json(json!({"error": self.to_string()}))).into_response()
            }
            BankError::InsufficientFunds(_) => {
                let problem = ValidationProblem::new().with_error("amount", INSUFFICIENT_FUNDS);
                (StatusCode::BAD_REQUEST, Json(problem)).into_response()
            }
            BankError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": self.to_string()}))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_error_status_codes_map_correctly() {
        let not_found = BankError::AccountNotFound(AccountId::new("17"));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let bad_req = BankError::InvalidRequest("missing field".to_owned());
        assert_eq!(bad_req.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn insufficient_funds_returns_400() {
        let err = BankError::InsufficientFunds(CoreError::InsufficientFunds {
            id: "17".to_owned(),
            balance: 100.0,
            requested: 1_000_000.0,
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn bank_error_display_includes_message() {
        let err = BankError::InvalidRequest("bad amount".to_owned());
        assert!(err.to_string().contains("bad amount"), "Display must include the message");
    }
}
