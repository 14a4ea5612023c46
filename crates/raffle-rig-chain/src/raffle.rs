// crates/raffle-rig-chain/src/raffle.rs
// ============================================================================
// Module: Mock Raffle
// Description: In-memory raffle realizing the external contract surface.
// Purpose: Drive entry, upkeep, and winner-draw transitions for scenarios.
// Dependencies: crate::{bus, clock, ledger}, raffle-rig-core, std
// ============================================================================

//! ## Overview
//! [`MockRaffle`] realizes the raffle contract surface scenarios exercise:
//! players enter while the raffle is open, upkeep flips it to calculating
//! and requests randomness, and the fulfillment callback draws a winner,
//! pays out the whole pot, and reopens the raffle. The contract's real
//! implementation stays external to the rig; this mock reproduces only the
//! externally observable behavior the test suites depend on.
//! Invariants:
//! - Entries are accepted only in the open state and only at or above the
//!   entrance fee.
//! - A draw resets the player list, refreshes the draw timestamp, and moves
//!   the entire pot to the winner.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use raffle_rig_core::AccountId;
use raffle_rig_core::RaffleError;
use raffle_rig_core::RaffleEvent;
use raffle_rig_core::RaffleHandle;
use raffle_rig_core::RaffleState;
use raffle_rig_core::RandomnessConsumer;
use raffle_rig_core::RandomnessCoordinator;
use raffle_rig_core::RequestId;
use raffle_rig_core::Timestamp;
use raffle_rig_core::UpkeepCheck;
use raffle_rig_core::Wei;

use crate::bus::EventBus;
use crate::clock::SimClock;
use crate::ledger::Ledger;

// ============================================================================
// SECTION: Parameters
// ============================================================================

/// Deployment parameters for a mock raffle.
///
/// # Invariants
/// - `entrance_fee` and `interval_secs` are non-zero; the config layer
///   validates them before deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaffleParams {
    /// Contract address holding the pot.
    pub address: AccountId,
    /// Fee required to enter.
    pub entrance_fee: Wei,
    /// Seconds between eligible draws.
    pub interval_secs: u64,
}

// ============================================================================
// SECTION: Mock Raffle
// ============================================================================

/// Mutable raffle state guarded behind one lock.
#[derive(Debug)]
struct RaffleCell {
    /// Lifecycle state gating entries.
    state: RaffleState,
    /// Players entered since the last draw.
    players: Vec<AccountId>,
    /// Winner of the most recent completed draw.
    recent_winner: Option<AccountId>,
    /// Timestamp of the last draw (or deployment).
    last_draw: Timestamp,
}

/// In-memory raffle bound to the mock chain services.
///
/// # Invariants
/// - All value movement goes through the ledger; the pot lives at the
///   raffle's own address.
/// - Events are emitted after the state transition they describe.
pub struct MockRaffle {
    /// Deployment parameters.
    params: RaffleParams,
    /// Simulated chain clock.
    clock: Arc<SimClock>,
    /// Balance ledger.
    ledger: Arc<Ledger>,
    /// Randomness coordinator used by upkeep.
    coordinator: Arc<dyn RandomnessCoordinator>,
    /// Event bus scenarios subscribe on.
    bus: Arc<EventBus>,
    /// Guarded mutable state.
    cell: Mutex<RaffleCell>,
}

impl std::fmt::Debug for MockRaffle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRaffle")
            .field("params", &self.params)
            .field("clock", &self.clock)
            .field("ledger", &self.ledger)
            .field("coordinator", &"<dyn RandomnessCoordinator>")
            .field("bus", &self.bus)
            .field("cell", &self.cell)
            .finish()
    }
}

impl MockRaffle {
    /// Deploys a raffle against the provided chain services.
    #[must_use]
    pub fn deploy(
        params: RaffleParams,
        clock: Arc<SimClock>,
        ledger: Arc<Ledger>,
        coordinator: Arc<dyn RandomnessCoordinator>,
        bus: Arc<EventBus>,
    ) -> Self {
        let last_draw = clock.now();
        Self {
            params,
            clock,
            ledger,
            coordinator,
            bus,
            cell: Mutex::new(RaffleCell {
                state: RaffleState::Open,
                players: Vec::new(),
                recent_winner: None,
                last_draw,
            }),
        }
    }

    /// Returns the event bus the raffle emits on.
    #[must_use]
    pub fn bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    /// Returns the pot balance held at the raffle address.
    pub fn pot(&self) -> Wei {
        self.ledger.balance_of(&self.params.address)
    }

    /// Locks the state cell, recovering the guard if a holder panicked.
    /// The cell stays structurally valid across panics.
    fn lock(&self) -> MutexGuard<'_, RaffleCell> {
        match self.cell.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Computes the upkeep conditions from a state snapshot.
    fn upkeep_from_cell(&self, cell: &RaffleCell) -> UpkeepCheck {
        let is_open = cell.state == RaffleState::Open;
        let elapsed = self.clock.now().saturating_elapsed_since(cell.last_draw);
        let time_passed = elapsed > self.params.interval_secs;
        let has_players = !cell.players.is_empty();
        let has_balance = !self.pot().is_zero();
        UpkeepCheck::from_conditions(is_open, time_passed, has_players, has_balance)
    }
}

impl RaffleHandle for MockRaffle {
    fn enter(&self, player: &AccountId, value: Wei) -> Result<(), RaffleError> {
        if value < self.params.entrance_fee {
            return Err(RaffleError::NotEnoughFunds {
                provided: value,
                required: self.params.entrance_fee,
            });
        }
        let mut cell = self.lock();
        if cell.state != RaffleState::Open {
            return Err(RaffleError::NotOpen);
        }
        self.ledger
            .transfer(player, &self.params.address, value)
            .map_err(|err| RaffleError::Payment(err.to_string()))?;
        cell.players.push(player.clone());
        drop(cell);
        self.bus.emit(&RaffleEvent::Entered {
            player: player.clone(),
            value,
        });
        Ok(())
    }

    fn entrance_fee(&self) -> Wei {
        self.params.entrance_fee
    }

    fn player(&self, index: usize) -> Result<AccountId, RaffleError> {
        let cell = self.lock();
        cell.players.get(index).cloned().ok_or(RaffleError::NoSuchPlayer {
            index,
            count: cell.players.len(),
        })
    }

    fn raffle_state(&self) -> RaffleState {
        self.lock().state
    }

    fn recent_winner(&self) -> Option<AccountId> {
        self.lock().recent_winner.clone()
    }

    fn latest_timestamp(&self) -> Timestamp {
        self.lock().last_draw
    }

    fn number_of_players(&self) -> usize {
        self.lock().players.len()
    }

    fn interval_secs(&self) -> u64 {
        self.params.interval_secs
    }

    fn check_upkeep(&self, _data: &[u8]) -> UpkeepCheck {
        let cell = self.lock();
        self.upkeep_from_cell(&cell)
    }

    fn perform_upkeep(&self, _data: &[u8]) -> Result<RequestId, RaffleError> {
        {
            let mut cell = self.lock();
            let check = self.upkeep_from_cell(&cell);
            if !check.upkeep_needed {
                return Err(RaffleError::UpkeepNotNeeded {
                    balance: self.pot(),
                    players: cell.players.len(),
                    state: cell.state,
                });
            }
            cell.state = RaffleState::Calculating;
        }
        let request_id = match self.coordinator.request_random_words(&self.params.address) {
            Ok(request_id) => request_id,
            Err(err) => {
                // The request never left the coordinator; reopen so the
                // raffle is not wedged in calculating.
                self.lock().state = RaffleState::Open;
                return Err(RaffleError::Randomness(err.to_string()));
            }
        };
        self.bus.emit(&RaffleEvent::WinnerRequested {
            request_id,
        });
        Ok(request_id)
    }
}

impl RandomnessConsumer for MockRaffle {
    fn address(&self) -> AccountId {
        self.params.address.clone()
    }

    fn raw_fulfill_random_words(
        &self,
        _request_id: RequestId,
        words: &[u64],
    ) -> Result<(), RaffleError> {
        let first_word = words
            .first()
            .copied()
            .ok_or_else(|| RaffleError::Randomness("fulfillment carried no words".into()))?;
        let (winner, pot) = {
            let cell = self.lock();
            let count = u64::try_from(cell.players.len())
                .map_err(|_| RaffleError::Randomness("player count exceeds draw range".into()))?;
            if count == 0 {
                return Err(RaffleError::Randomness("no players to draw from".into()));
            }
            let index = usize::try_from(first_word % count)
                .map_err(|_| RaffleError::Randomness("draw index exceeds platform range".into()))?;
            let winner = cell.players.get(index).cloned().ok_or(RaffleError::NoSuchPlayer {
                index,
                count: cell.players.len(),
            })?;
            (winner, self.pot())
        };
        self.ledger
            .transfer(&self.params.address, &winner, pot)
            .map_err(|err| RaffleError::Payout(err.to_string()))?;
        {
            let mut cell = self.lock();
            cell.players.clear();
            cell.state = RaffleState::Open;
            cell.recent_winner = Some(winner.clone());
            cell.last_draw = self.clock.now();
        }
        self.bus.emit(&RaffleEvent::WinnerPicked {
            winner,
        });
        Ok(())
    }
}
