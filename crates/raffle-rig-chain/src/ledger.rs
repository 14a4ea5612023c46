// crates/raffle-rig-chain/src/ledger.rs
// ============================================================================
// Module: Mock Balance Ledger
// Description: In-memory account balances for entry fees and payouts.
// Purpose: Move value between accounts with fail-closed balance checks.
// Dependencies: raffle-rig-core, thiserror, std
// ============================================================================

//! ## Overview
//! The ledger tracks every account balance in the mock chain: player
//! wallets, the raffle pot, and the deployer. Transfers are atomic and fail
//! closed; a debit that exceeds the sender's balance leaves both accounts
//! untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use raffle_rig_core::AccountId;
use raffle_rig_core::Wei;
use thiserror::Error;

// ============================================================================
// SECTION: Ledger Errors
// ============================================================================

/// Errors raised by ledger operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Debit exceeds the account balance.
    #[error("insufficient funds for {account} (balance {balance}, needed {needed})")]
    InsufficientFunds {
        /// Account being debited.
        account: AccountId,
        /// Balance at the time of the debit.
        balance: Wei,
        /// Amount the debit required.
        needed: Wei,
    },
    /// Credit would overflow the account balance.
    #[error("balance overflow for {0}")]
    Overflow(AccountId),
}

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// In-memory balance ledger.
///
/// # Invariants
/// - Total supply only changes through `fund`.
/// - A failed transfer leaves all balances unchanged.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Balances keyed by account.
    balances: Mutex<BTreeMap<AccountId, Wei>>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the balance map, recovering the guard if a holder panicked.
    /// The map stays structurally valid across panics.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<AccountId, Wei>> {
        match self.balances.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Credits `amount` to `account`, minting new supply.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] when the credit would overflow.
    pub fn fund(&self, account: &AccountId, amount: Wei) -> Result<(), LedgerError> {
        let mut balances = self.lock();
        let current = balances.get(account).copied().unwrap_or(Wei::ZERO);
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(account.clone()))?;
        balances.insert(account.clone(), updated);
        Ok(())
    }

    /// Returns the balance of `account` (zero when unknown).
    pub fn balance_of(&self, account: &AccountId) -> Wei {
        self.lock().get(account).copied().unwrap_or(Wei::ZERO)
    }

    /// Moves `value` from `from` to `to` atomically.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] when the sender balance is
    /// too low and [`LedgerError::Overflow`] when the credit would overflow.
    pub fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        value: Wei,
    ) -> Result<(), LedgerError> {
        let mut balances = self.lock();
        let sender = balances.get(from).copied().unwrap_or(Wei::ZERO);
        let debited = sender.checked_sub(value).ok_or_else(|| LedgerError::InsufficientFunds {
            account: from.clone(),
            balance: sender,
            needed: value,
        })?;
        let receiver = balances.get(to).copied().unwrap_or(Wei::ZERO);
        let credited =
            receiver.checked_add(value).ok_or_else(|| LedgerError::Overflow(to.clone()))?;
        balances.insert(from.clone(), debited);
        balances.insert(to.clone(), credited);
        Ok(())
    }
}
