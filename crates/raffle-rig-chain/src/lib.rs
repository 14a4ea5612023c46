// crates/raffle-rig-chain/src/lib.rs
// ============================================================================
// Module: Raffle Rig Chain Mocks
// Description: Mock chain infrastructure for local raffle scenarios.
// Purpose: Provide the clock, ledger, event bus, coordinator, and raffle mocks.
// Dependencies: raffle-rig-config, raffle-rig-core, raffle-rig-harness, sha2,
// thiserror, tokio
// ============================================================================

//! ## Overview
//! `raffle-rig-chain` is the mock infrastructure scenarios run against on
//! development networks: a simulated chain clock, an in-memory balance
//! ledger, an event bus implementing the harness subscription seam, a mock
//! randomness coordinator, and an in-memory raffle realizing the external
//! contract surface. [`bench::Bench`] wires all of it from a network
//! profile; mocks are never deployed for non-development profiles.
//! Invariants:
//! - All time comes from the simulated clock; nothing reads wall-clock time.
//! - Value moves only through the ledger, which fails closed on
//!   insufficient funds.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bench;
pub mod bus;
pub mod clock;
pub mod coordinator;
pub mod keeper;
pub mod ledger;
pub mod raffle;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use bench::Bench;
pub use bench::BenchObserver;
pub use bench::DeployError;
pub use bench::DeployStage;
pub use bench::NullObserver;
pub use bench::RecordingObserver;
pub use bus::EventBus;
pub use clock::SimClock;
pub use coordinator::CoordinatorFees;
pub use coordinator::MockVrfCoordinator;
pub use keeper::KeeperHandle;
pub use keeper::spawn_keeper;
pub use ledger::Ledger;
pub use ledger::LedgerError;
pub use raffle::MockRaffle;
pub use raffle::RaffleParams;
