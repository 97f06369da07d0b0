//! Axum route handlers for the bank service.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bank_core::{Account, AccountId, Transaction};
use tower_http::trace::TraceLayer;

use crate::{error::BankError, store::AccountStore};

// ── Shared state ─────────────────────────────────────────────────────────────

type Store = Arc<AccountStore>;

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given account store.
pub fn create_router(store: Store) -> Router {
    Router::new()
        .route("/accounts/{id}", get(get_account))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/health", get(health))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /accounts/{id}` — current state of an account.
///
/// # Errors
/// Returns [`BankError::AccountNotFound`] if the account does not exist.
pub async fn get_account(
    State(store): State<Store>,
    Path(id): Path<String>,
) -> Result<Json<Account>, BankError> {
    let id = AccountId::new(id);
    store.get(&id).map(Json).ok_or(BankError::AccountNotFound(id))
}

/// `POST /deposit` — credit an account, opening it if needed.
///
/// # Errors
/// Returns [`BankError::InvalidRequest`] if the body is not a valid transaction.
pub async fn deposit(
    State(store): State<Store>,
    body: Result<Json<Transaction>, JsonRejection>,
) -> Result<Json<Account>, BankError> {
    let tx = parse_transaction(body)?;
    let account = store.deposit(&tx);
    tracing::info!(account = %account.id, amount = %tx.amount, balance = account.balance, "deposit");
    Ok(Json(account))
}

/// `POST /withdraw` — debit an existing account.
///
/// # Errors
/// Returns [`BankError::AccountNotFound`] for an unknown account,
/// [`BankError::InsufficientFunds`] if the balance would go negative, or
/// [`BankError::InvalidRequest`] if the body is not a valid transaction.
pub async fn withdraw(
    State(store): State<Store>,
    body: Result<Json<Transaction>, JsonRejection>,
) -> Result<Json<Account>, BankError> {
    let tx = parse_transaction(body)?;
    match store.withdraw(&tx) {
        Ok(account) => {
            tracing::info!(account = %account.id, amount = %tx.amount, balance = account.balance, "withdraw");
            Ok(Json(account))
        }
        Err(e) => {
            tracing::warn!(account = %tx.id, amount = %tx.amount, error = %e, "withdraw rejected");
            Err(e)
        }
    }
}

fn parse_transaction(body: Result<Json<Transaction>, JsonRejection>) -> Result<Transaction, BankError> {
    let Json(tx) = body.map_err(|e| BankError::InvalidRequest(e.body_text()))?;
    AccountId::parse(tx.id.as_str()).map_err(|e| BankError::InvalidRequest(e.to_string()))?;
    Ok(tx)
}
