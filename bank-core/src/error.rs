/// Errors produced by the `bank-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A transaction amount was negative or not a finite number.
    #[error("invalid amount {value}: must be a finite, non-negative number")]
    InvalidAmount { value: f64 },

    /// An account id was empty.
    #[error("invalid account id: {reason}")]
    InvalidAccountId { reason: String },

    /// A withdrawal would leave the account with a negative balance.
    #[error("not enough funds available in account '{id}': balance {balance}, requested {requested}")]
    InsufficientFunds { id: String, balance: f64, requested: f64 },
}
