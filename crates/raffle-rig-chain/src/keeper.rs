// crates/raffle-rig-chain/src/keeper.rs
// ============================================================================
// Module: Simulated Keeper
// Description: Background task driving upkeep and fulfillment automatically.
// Purpose: Stand in for live keeper and oracle automation in staging runs.
// Dependencies: crate::{clock, coordinator, raffle}, raffle-rig-core, tokio
// ============================================================================

//! ## Overview
//! On a live network the upkeep call and the randomness fulfillment arrive
//! from external automation; the scenario only enters and waits. The
//! simulated keeper reproduces that shape locally: a spawned task ticks the
//! chain clock, polls the upkeep check, performs upkeep when it is due, and
//! immediately fulfills the issued request. Scenario code never calls
//! upkeep or fulfillment itself in staging runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use raffle_rig_core::RaffleHandle;
use raffle_rig_core::RandomnessCoordinator;
use tokio::task::JoinHandle;
use tokio::time;

use crate::clock::SimClock;
use crate::coordinator::MockVrfCoordinator;
use crate::raffle::MockRaffle;

// ============================================================================
// SECTION: Keeper
// ============================================================================

/// Handle to a running keeper task; dropping it stops the keeper.
#[derive(Debug)]
pub struct KeeperHandle {
    /// Spawned keeper task.
    task: JoinHandle<()>,
}

impl KeeperHandle {
    /// Stops the keeper task.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for KeeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a keeper driving the raffle on the current runtime.
///
/// Each poll tick advances chain time by `tick_secs`, seals a block, and
/// performs upkeep plus fulfillment when the check comes back due. Upkeep
/// races with scenario activity are expected; a failed attempt is retried
/// on the next tick.
#[must_use]
pub fn spawn_keeper(
    clock: Arc<SimClock>,
    raffle: Arc<MockRaffle>,
    coordinator: Arc<MockVrfCoordinator>,
    poll: Duration,
    tick_secs: u64,
) -> KeeperHandle {
    let task = tokio::spawn(async move {
        loop {
            clock.increase_time(tick_secs);
            clock.mine_block();
            let check = raffle.check_upkeep(&[]);
            if check.upkeep_needed
                && let Ok(request_id) = raffle.perform_upkeep(&[])
            {
                let _ = coordinator.fulfill_random_words(request_id, &*raffle);
            }
            time::sleep(poll).await;
        }
    });
    KeeperHandle {
        task,
    }
}
