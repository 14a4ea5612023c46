// crates/raffle-rig-core/src/lib.rs
// ============================================================================
// Module: Raffle Rig Core
// Description: Canonical types and interfaces for the raffle test rig.
// Purpose: Define the contract surfaces and wire-stable types shared by the rig.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! `raffle-rig-core` defines the canonical identifiers, value units, chain
//! time model, raffle state machine, and the interfaces the rig consumes:
//! the raffle contract surface and the randomness coordinator surface.
//! The core is backend-agnostic and never reads wall-clock time; hosts supply
//! timestamps through the simulated clock.
//! Invariants:
//! - Types with serde derives are wire-stable for fixtures and logs.
//! - Interface implementations must fail closed on invalid input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use crate::core::identifiers::AccountId;
pub use crate::core::identifiers::ChainId;
pub use crate::core::identifiers::RequestId;
pub use crate::core::state::EventKind;
pub use crate::core::state::RaffleEvent;
pub use crate::core::state::RaffleState;
pub use crate::core::state::UpkeepCheck;
pub use crate::core::time::Timestamp;
pub use crate::core::units::Wei;
pub use crate::interfaces::CoordinatorError;
pub use crate::interfaces::RaffleError;
pub use crate::interfaces::RaffleHandle;
pub use crate::interfaces::RandomnessConsumer;
pub use crate::interfaces::RandomnessCoordinator;
