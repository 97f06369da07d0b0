use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::AccountId;

/// A non-negative, finite amount of money moved by a [`Transaction`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
#[non_exhaustive]
pub struct Amount(f64);

impl Amount {
    /// Creates an `Amount` from a finite value `>= 0`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidAmount`] if `value` is negative, NaN or infinite.
    pub fn new(value: f64) -> Result<Self, CoreError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidAmount { value });
        }
        Ok(Self(value))
    }

    /// Returns the inner `f64` value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request body for `POST /deposit` and `POST /withdraw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Transaction {
    /// Account the money moves in or out of.
    pub id: AccountId,
    /// How much money moves.
    pub amount: Amount,
}

impl Transaction {
    /// Creates a new transaction.
    #[must_use]
    pub fn new(id: AccountId, amount: Amount) -> Self {
        Self { id, amount }
    }
}

/// Account state as returned by the bank service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Account {
    /// Account identifier.
    pub id: AccountId,
    /// Current balance; never negative once stored.
    ///
    /// Binary floating point, so fractional amounts accumulate rounding error
    /// (`0.1 + 0.2` is not exactly `0.3`). Good enough for a demo service;
    /// compare with a tolerance.
    pub balance: f64,
}

impl Account {
    /// Creates an empty account.
    #[must_use]
    pub fn new(id: AccountId) -> Self {
        Self { id, balance: 0.0 }
    }

    /// Adds `amount` to the balance.
    pub fn deposit(&mut self, amount: Amount) {
        self.balance += amount.value();
    }

    /// Removes `amount` from the balance.
    ///
    /// The balance is left untouched when the withdrawal fails.
    ///
    /// # Errors
    /// Returns [`CoreError::InsufficientFunds`] if the balance would go negative.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), CoreError> {
        let remaining = self.balance - amount.value();
        if remaining < 0.0 {
            return Err(CoreError::InsufficientFunds {
                id: self.id.to_string(),
                balance: self.balance,
                requested: amount.value(),
            });
        }
        self.balance = remaining;
        Ok(())
    }
}
