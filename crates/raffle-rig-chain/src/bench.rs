// crates/raffle-rig-chain/src/bench.rs
// ============================================================================
// Module: Deployment Bench
// Description: Deployment fixture wiring the mock chain for one scenario.
// Purpose: Build clock, ledger, bus, coordinator, and raffle from a profile.
// Dependencies: crate::*, raffle-rig-config, raffle-rig-core, thiserror, std
// ============================================================================

//! ## Overview
//! [`Bench`] is the per-scenario deployment fixture: every test constructs
//! its own bench instead of sharing ambient state through setup hooks.
//! Mocks are deployed only for development profiles; deployment against a
//! live profile fails closed. Deployment progress is reported through
//! [`BenchObserver`] so suites can assert or surface the stages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use raffle_rig_config::NetworkProfile;
use raffle_rig_core::AccountId;
use raffle_rig_core::RaffleHandle;
use raffle_rig_core::RandomnessCoordinator;
use raffle_rig_core::Timestamp;
use raffle_rig_core::Wei;
use thiserror::Error;

use crate::bus::EventBus;
use crate::clock::SimClock;
use crate::coordinator::CoordinatorFees;
use crate::coordinator::MockVrfCoordinator;
use crate::ledger::Ledger;
use crate::raffle::MockRaffle;
use crate::raffle::RaffleParams;

// ============================================================================
// SECTION: Deploy Errors
// ============================================================================

/// Errors raised while deploying the bench.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Mocks were requested for a live network profile.
    #[error("network {0} is not a development chain; mocks stay undeployed")]
    NotDevelopmentChain(String),
    /// Funding the scenario accounts failed.
    #[error("account funding failed: {0}")]
    Funding(String),
}

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Deployment stages reported while the bench is built.
///
/// # Invariants
/// - Stages are reported in deployment order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployStage {
    /// A development network was detected and mocks are being deployed.
    DeployingMocks {
        /// Network name the bench deploys for.
        network: String,
    },
    /// The mock coordinator is live.
    MocksDeployed,
    /// The raffle is live at the carried address.
    RaffleDeployed {
        /// Raffle contract address.
        address: AccountId,
    },
    /// Scenario accounts were funded.
    AccountsFunded {
        /// Number of funded accounts.
        count: usize,
    },
}

/// Observer for deployment progress.
pub trait BenchObserver: Send + Sync {
    /// Receives one deployment stage.
    fn on_stage(&self, stage: &DeployStage);
}

/// Observer that discards every stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl BenchObserver for NullObserver {
    fn on_stage(&self, _stage: &DeployStage) {}
}

/// Observer that records stages for assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// Stages received so far.
    stages: Mutex<Vec<DeployStage>>,
}

impl RecordingObserver {
    /// Creates an empty recording observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the stage list, recovering the guard if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, Vec<DeployStage>> {
        match self.stages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns a copy of the stages received so far.
    pub fn stages(&self) -> Vec<DeployStage> {
        self.lock().clone()
    }
}

impl BenchObserver for RecordingObserver {
    fn on_stage(&self, stage: &DeployStage) {
        self.lock().push(stage.clone());
    }
}

// ============================================================================
// SECTION: Bench
// ============================================================================

/// Number of funded scenario accounts.
pub const ACCOUNT_COUNT: usize = 10;

/// Starting balance per scenario account.
pub const STARTING_BALANCE: Wei = Wei::new(100_000_000_000_000_000_000);

/// Genesis chain time for a fresh bench.
const GENESIS_SECS: u64 = 1_000_000;

/// Per-scenario deployment of the mock chain.
///
/// # Invariants
/// - Deployed only for development profiles.
/// - `accounts[0]` is the deployer.
#[derive(Debug)]
pub struct Bench {
    /// Simulated chain clock.
    pub clock: Arc<SimClock>,
    /// Balance ledger.
    pub ledger: Arc<Ledger>,
    /// Event bus the raffle emits on.
    pub bus: Arc<EventBus>,
    /// Mock randomness coordinator.
    pub coordinator: Arc<MockVrfCoordinator>,
    /// Deployed raffle.
    pub raffle: Arc<MockRaffle>,
    /// Funded scenario accounts; index 0 is the deployer.
    pub accounts: Vec<AccountId>,
}

impl Bench {
    /// Deploys the mock chain for a development profile.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::NotDevelopmentChain`] for live profiles and
    /// [`DeployError::Funding`] when account funding fails.
    pub fn deploy(
        network: &str,
        profile: &NetworkProfile,
        fees: CoordinatorFees,
        observer: &dyn BenchObserver,
    ) -> Result<Self, DeployError> {
        if !profile.development {
            return Err(DeployError::NotDevelopmentChain(network.to_string()));
        }
        observer.on_stage(&DeployStage::DeployingMocks {
            network: network.to_string(),
        });

        let clock = Arc::new(SimClock::new(Timestamp::from_secs(GENESIS_SECS)));
        let ledger = Arc::new(Ledger::new());
        let bus = Arc::new(EventBus::new());
        let coordinator = Arc::new(MockVrfCoordinator::new(fees));
        observer.on_stage(&DeployStage::MocksDeployed);

        let address = AccountId::new(format!("raffle-{}", profile.chain_id));
        let raffle = Arc::new(MockRaffle::deploy(
            RaffleParams {
                address: address.clone(),
                entrance_fee: profile.entrance_fee,
                interval_secs: profile.interval_secs,
            },
            Arc::clone(&clock),
            Arc::clone(&ledger),
            Arc::clone(&coordinator) as Arc<dyn RandomnessCoordinator>,
            Arc::clone(&bus),
        ));
        observer.on_stage(&DeployStage::RaffleDeployed {
            address,
        });

        let mut accounts = Vec::with_capacity(ACCOUNT_COUNT);
        for index in 0..ACCOUNT_COUNT {
            let account = AccountId::new(format!("acct-{index}"));
            ledger
                .fund(&account, STARTING_BALANCE)
                .map_err(|err| DeployError::Funding(err.to_string()))?;
            accounts.push(account);
        }
        observer.on_stage(&DeployStage::AccountsFunded {
            count: accounts.len(),
        });

        Ok(Self {
            clock,
            ledger,
            bus,
            coordinator,
            raffle,
            accounts,
        })
    }

    /// Returns the deployer account.
    ///
    /// # Panics
    ///
    /// Never panics; the deploy path always funds at least one account.
    #[must_use]
    pub fn deployer(&self) -> &AccountId {
        &self.accounts[0]
    }

    /// Advances chain time past the raffle interval and seals a block, the
    /// usual precondition for upkeep to become due.
    pub fn pass_interval(&self) {
        self.clock.increase_time(self.raffle.interval_secs().saturating_add(1));
        self.clock.mine_block();
    }
}
