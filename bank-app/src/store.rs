//! In-memory account store.
//!
//! Stands in for the sidecar's state store. Each operation runs under a
//! single lock, so a rejected withdrawal never leaves a partial update.

use std::{collections::HashMap, sync::RwLock};

use bank_core::{Account, AccountId, CoreError, Transaction};

use crate::error::BankError;

/// Thread-safe map of account id to account state.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl AccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an account.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn get(&self, id: &AccountId) -> Option<Account> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.accounts
            .read()
            .expect("account store read lock poisoned")
            .get(id)
            .cloned()
    }

    /// Credit an account, opening it first if it does not exist.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn deposit(&self, tx: &Transaction) -> Account {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut accounts = self.accounts.write().expect("account store write lock poisoned");
        let account = accounts
            .entry(tx.id.clone())
            .or_insert_with(|| Account::new(tx.id.clone()));
        account.deposit(tx.amount);
        account.clone()
    }

    /// Debit an existing account.
    ///
    /// # Errors
    /// Returns [`BankError::AccountNotFound`] for an unknown account, or
    /// [`BankError::InsufficientFunds`] if the balance would go negative; the
    /// stored balance is unchanged in both cases.
    ///
    /// # Panics
    /// Panics if the internal `RwLock` is poisoned.
    pub fn withdraw(&self, tx: &Transaction) -> Result<Account, BankError> {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut accounts = self.accounts.write().expect("account store write lock poisoned");
        let account = accounts
            .get_mut(&tx.id)
            .ok_or_else(|| BankError::AccountNotFound(tx.id.clone()))?;
        account.withdraw(tx.amount).map_err(|e| match e {
            CoreError::InsufficientFunds { .. } => BankError::InsufficientFunds(e),
            other => BankError::InvalidRequest(other.to_string()),
        })?;
        Ok(account.clone())
    }
}
