// crates/raffle-rig-chain/src/clock.rs
// ============================================================================
// Module: Simulated Chain Clock
// Description: Explicit chain time for deterministic scenarios.
// Purpose: Replace wall-clock reads with caller-driven time travel.
// Dependencies: raffle-rig-core, std
// ============================================================================

//! ## Overview
//! [`SimClock`] is the only time source in the mock chain. Scenarios advance
//! it explicitly (the analogue of `evm_increaseTime`) and seal blocks with
//! [`SimClock::mine_block`] (the analogue of `evm_mine`), which keeps every
//! time-gated raffle transition replayable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use raffle_rig_core::Timestamp;

// ============================================================================
// SECTION: Clock
// ============================================================================

/// Simulated chain clock with explicit time travel.
///
/// # Invariants
/// - Time only moves forward; there is no rewind operation.
/// - Block numbers increase by exactly one per mined block.
#[derive(Debug)]
pub struct SimClock {
    /// Current chain time in unix seconds.
    seconds: AtomicU64,
    /// Current block number.
    block: AtomicU64,
}

impl SimClock {
    /// Creates a clock starting at the provided genesis time.
    #[must_use]
    pub const fn new(genesis: Timestamp) -> Self {
        Self {
            seconds: AtomicU64::new(genesis.as_secs()),
            block: AtomicU64::new(0),
        }
    }

    /// Returns the current chain time.
    pub fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.seconds.load(Ordering::SeqCst))
    }

    /// Returns the current block number.
    pub fn block_number(&self) -> u64 {
        self.block.load(Ordering::SeqCst)
    }

    /// Advances chain time by `secs` without sealing a block.
    pub fn increase_time(&self, secs: u64) {
        self.seconds.fetch_add(secs, Ordering::SeqCst);
    }

    /// Seals a block, bumping the block number and ticking time by one
    /// second the way a local node does.
    pub fn mine_block(&self) {
        self.block.fetch_add(1, Ordering::SeqCst);
        self.seconds.fetch_add(1, Ordering::SeqCst);
    }
}
