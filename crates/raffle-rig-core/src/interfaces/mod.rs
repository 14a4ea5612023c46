// crates/raffle-rig-core/src/interfaces/mod.rs
// ============================================================================
// Module: Raffle Rig Interfaces
// Description: Backend-agnostic interfaces for the raffle and the coordinator.
// Purpose: Define the external contract surfaces the rig consumes.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the rig talks to the raffle contract and the
//! randomness coordinator without embedding backend-specific details. The
//! raffle's own logic is external to the rig; these traits capture only the
//! call surface scenarios exercise. Implementations must fail closed on
//! invalid input.
//! Invariants:
//! - Error variants are stable for programmatic handling.
//! - `perform_upkeep` is the only state-mutating upkeep operation;
//!   `check_upkeep` is a read-only simulation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::AccountId;
use crate::core::identifiers::RequestId;
use crate::core::state::RaffleState;
use crate::core::state::UpkeepCheck;
use crate::core::time::Timestamp;
use crate::core::units::Wei;

// ============================================================================
// SECTION: Raffle Errors
// ============================================================================

/// Errors surfaced by the raffle contract surface.
///
/// # Invariants
/// - Variants are stable for programmatic handling and map 1:1 to the
///   contract's revert reasons.
#[derive(Debug, Error)]
pub enum RaffleError {
    /// Entry value is below the entrance fee.
    #[error("not enough funds to enter (provided {provided}, required {required})")]
    NotEnoughFunds {
        /// Value provided with the entry.
        provided: Wei,
        /// Configured entrance fee.
        required: Wei,
    },
    /// Raffle is calculating and rejects new entries.
    #[error("raffle is not open")]
    NotOpen,
    /// Upkeep was performed while its conditions do not hold.
    #[error("upkeep not needed (balance {balance}, players {players}, state {})", .state.code())]
    UpkeepNotNeeded {
        /// Pot balance at the time of the call.
        balance: Wei,
        /// Number of entered players.
        players: usize,
        /// Raffle state at the time of the call.
        state: RaffleState,
    },
    /// Player index is out of range.
    #[error("no player at index {index} (count {count})")]
    NoSuchPlayer {
        /// Requested player index.
        index: usize,
        /// Number of entered players.
        count: usize,
    },
    /// Entry payment could not be collected from the player.
    #[error("entry payment failed: {0}")]
    Payment(String),
    /// Randomness request or fulfillment plumbing failed.
    #[error("randomness failure: {0}")]
    Randomness(String),
    /// Winner payout failed.
    #[error("winner payout failed: {0}")]
    Payout(String),
}

// ============================================================================
// SECTION: Coordinator Errors
// ============================================================================

/// Errors surfaced by the randomness coordinator surface.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `NonexistentRequest` is returned for any request id that was never
///   issued or was already fulfilled.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Request id is unknown to the coordinator.
    #[error("nonexistent request: {0}")]
    NonexistentRequest(RequestId),
    /// Consumer callback rejected the fulfillment.
    #[error("consumer rejected fulfillment: {0}")]
    Consumer(String),
    /// Coordinator internal failure.
    #[error("coordinator failure: {0}")]
    Coordinator(String),
}

// ============================================================================
// SECTION: Raffle Surface
// ============================================================================

/// External raffle contract surface consumed by scenarios.
pub trait RaffleHandle: Send + Sync {
    /// Enters the raffle, paying `value` from `player`.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::NotEnoughFunds`] when `value` is below the
    /// entrance fee and [`RaffleError::NotOpen`] while a draw is calculating.
    fn enter(&self, player: &AccountId, value: Wei) -> Result<(), RaffleError>;

    /// Returns the configured entrance fee.
    fn entrance_fee(&self) -> Wei;

    /// Returns the player recorded at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::NoSuchPlayer`] when `index` is out of range.
    fn player(&self, index: usize) -> Result<AccountId, RaffleError>;

    /// Returns the current raffle state.
    fn raffle_state(&self) -> RaffleState;

    /// Returns the most recent winner, if a draw has completed.
    fn recent_winner(&self) -> Option<AccountId>;

    /// Returns the timestamp of the last completed draw (or deployment).
    fn latest_timestamp(&self) -> Timestamp;

    /// Returns the number of entered players.
    fn number_of_players(&self) -> usize;

    /// Returns the configured draw interval in seconds.
    fn interval_secs(&self) -> u64;

    /// Simulates upkeep without mutating state.
    fn check_upkeep(&self, data: &[u8]) -> UpkeepCheck;

    /// Performs upkeep: flips the raffle to calculating and requests
    /// randomness, returning the issued request id.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError::UpkeepNotNeeded`] when the upkeep conditions
    /// do not hold at the time of the call.
    fn perform_upkeep(&self, data: &[u8]) -> Result<RequestId, RaffleError>;
}

// ============================================================================
// SECTION: Randomness Surfaces
// ============================================================================

/// Consumer callback surface invoked by a coordinator on fulfillment.
pub trait RandomnessConsumer: Send + Sync {
    /// Returns the consumer's contract address.
    fn address(&self) -> AccountId;

    /// Delivers random words for a previously issued request.
    ///
    /// # Errors
    ///
    /// Returns [`RaffleError`] when the consumer cannot complete the draw.
    fn raw_fulfill_random_words(
        &self,
        request_id: RequestId,
        words: &[u64],
    ) -> Result<(), RaffleError>;
}

/// External randomness coordinator surface.
pub trait RandomnessCoordinator: Send + Sync {
    /// Registers a randomness request for `consumer` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError`] when the request cannot be registered.
    fn request_random_words(&self, consumer: &AccountId) -> Result<RequestId, CoordinatorError>;

    /// Fulfills a pending request by invoking the consumer callback.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::NonexistentRequest`] for unknown request
    /// ids and [`CoordinatorError::Consumer`] when the callback rejects.
    fn fulfill_random_words(
        &self,
        request_id: RequestId,
        consumer: &dyn RandomnessConsumer,
    ) -> Result<(), CoordinatorError>;
}
