// crates/raffle-rig-core/src/core/state.rs
// ============================================================================
// Module: Raffle Rig State and Events
// Description: Raffle lifecycle state, upkeep checks, and emitted events.
// Purpose: Capture the externally observable raffle state machine.
// Dependencies: crate::core::{identifiers, units}, serde
// ============================================================================

//! ## Overview
//! The raffle exposes a two-state lifecycle gating entry acceptance, a
//! read-only upkeep check describing whether a draw is due, and a small
//! event vocabulary. [`EventKind::WinnerPicked`] is the completion event
//! scenario code awaits; the other kinds cover entry and request tracking.
//! Invariants:
//! - Variants are stable for serialization and scenario matching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::AccountId;
use crate::core::identifiers::RequestId;
use crate::core::units::Wei;

// ============================================================================
// SECTION: Raffle State
// ============================================================================

/// Raffle lifecycle state gating whether new entries are accepted.
///
/// # Invariants
/// - Variants are stable for serialization and scenario matching.
/// - `code` values match the on-chain enum encoding (0 = open, 1 = calculating).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaffleState {
    /// Raffle is accepting entries.
    Open,
    /// Raffle is waiting for a randomness fulfillment; entries are rejected.
    Calculating,
}

impl RaffleState {
    /// Returns the stable numeric encoding for the state.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Calculating => 1,
        }
    }
}

// ============================================================================
// SECTION: Upkeep Check
// ============================================================================

/// Result of a read-only upkeep simulation.
///
/// # Invariants
/// - `upkeep_needed` is the conjunction of the four condition fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpkeepCheck {
    /// True when a winner draw should be performed now.
    pub upkeep_needed: bool,
    /// Raffle is in the open state.
    pub is_open: bool,
    /// The configured interval has elapsed since the last draw.
    pub time_passed: bool,
    /// At least one player has entered.
    pub has_players: bool,
    /// The pot holds a non-zero balance.
    pub has_balance: bool,
}

impl UpkeepCheck {
    /// Builds a check result from the four gating conditions.
    #[must_use]
    pub const fn from_conditions(
        is_open: bool,
        time_passed: bool,
        has_players: bool,
        has_balance: bool,
    ) -> Self {
        Self {
            upkeep_needed: is_open && time_passed && has_players && has_balance,
            is_open,
            time_passed,
            has_players,
            has_balance,
        }
    }
}

// ============================================================================
// SECTION: Events
// ============================================================================

/// Event kinds emitted by the raffle.
///
/// # Invariants
/// - Variants are stable for subscription matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A player entered the raffle.
    Entered,
    /// Upkeep requested a randomness draw.
    WinnerRequested,
    /// A winner was selected and paid.
    WinnerPicked,
}

/// Events emitted by the raffle over its lifecycle.
///
/// # Invariants
/// - Payload fields describe the state transition that emitted the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RaffleEvent {
    /// A player entered the raffle.
    Entered {
        /// Entering player.
        player: AccountId,
        /// Value paid with the entry.
        value: Wei,
    },
    /// Upkeep flipped the raffle to calculating and requested randomness.
    WinnerRequested {
        /// Randomness request identifier issued by the coordinator.
        request_id: RequestId,
    },
    /// A winner was selected, paid, and the raffle reopened.
    WinnerPicked {
        /// Winning player.
        winner: AccountId,
    },
}

impl RaffleEvent {
    /// Returns the kind discriminant for subscription matching.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Entered {
                ..
            } => EventKind::Entered,
            Self::WinnerRequested {
                ..
            } => EventKind::WinnerRequested,
            Self::WinnerPicked {
                ..
            } => EventKind::WinnerPicked,
        }
    }
}
