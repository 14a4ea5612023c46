// crates/raffle-rig-chain/src/coordinator.rs
// ============================================================================
// Module: Mock VRF Coordinator
// Description: Mock randomness coordinator with a pending-request registry.
// Purpose: Issue sequential request ids and fulfill them deterministically.
// Dependencies: raffle-rig-core, sha2, std
// ============================================================================

//! ## Overview
//! [`MockVrfCoordinator`] stands in for the external randomness oracle on
//! development networks. Requests get sequential ids starting at 1 and stay
//! pending until fulfilled exactly once; fulfilling an id that was never
//! issued (or was already consumed) fails with a nonexistent-request error.
//! Random words are derived from the request id with a hash, so every draw
//! is reproducible without modelling the real oracle's internals.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use raffle_rig_core::AccountId;
use raffle_rig_core::CoordinatorError;
use raffle_rig_core::RandomnessConsumer;
use raffle_rig_core::RandomnessCoordinator;
use raffle_rig_core::RequestId;
use raffle_rig_core::Wei;
use sha2::Digest;
use sha2::Sha256;

// ============================================================================
// SECTION: Fees
// ============================================================================

/// Fee parameters the mock coordinator is deployed with.
///
/// # Invariants
/// - Values are carried for parity with live coordinator deployments; the
///   mock never debits them from a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorFees {
    /// Flat premium charged per randomness request.
    pub base_fee: Wei,
    /// Link-denominated gas price used to cost fulfillment callbacks.
    pub gas_price_link: Wei,
}

// ============================================================================
// SECTION: Coordinator
// ============================================================================

/// Number of random words delivered per fulfillment.
const NUM_WORDS: usize = 1;

/// Mock randomness coordinator.
///
/// # Invariants
/// - Request ids are sequential and start at 1.
/// - A pending request is consumed by exactly one fulfillment.
#[derive(Debug)]
pub struct MockVrfCoordinator {
    /// Deployment fee parameters.
    fees: CoordinatorFees,
    /// Next request id to issue.
    next_request: AtomicU64,
    /// Pending requests keyed by id, holding the registered consumer.
    pending: Mutex<BTreeMap<RequestId, AccountId>>,
}

impl MockVrfCoordinator {
    /// Creates a coordinator with the provided fee parameters.
    #[must_use]
    pub const fn new(fees: CoordinatorFees) -> Self {
        Self {
            fees,
            next_request: AtomicU64::new(1),
            pending: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the deployment fee parameters.
    #[must_use]
    pub const fn fees(&self) -> CoordinatorFees {
        self.fees
    }

    /// Returns the number of requests awaiting fulfillment.
    pub fn pending_requests(&self) -> usize {
        self.lock().len()
    }

    /// Locks the pending map, recovering the guard if a holder panicked.
    /// The map stays structurally valid across panics.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<RequestId, AccountId>> {
        match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Derives the deterministic random words for a request id.
    fn derive_words(request_id: RequestId) -> Vec<u64> {
        let mut words = Vec::with_capacity(NUM_WORDS);
        for index in 0..NUM_WORDS {
            let mut hasher = Sha256::new();
            hasher.update(request_id.get().to_be_bytes());
            hasher.update(u64::try_from(index).unwrap_or(u64::MAX).to_be_bytes());
            let digest = hasher.finalize();
            let mut bytes = [0_u8; 8];
            bytes.copy_from_slice(&digest[..8]);
            words.push(u64::from_be_bytes(bytes));
        }
        words
    }
}

impl RandomnessCoordinator for MockVrfCoordinator {
    fn request_random_words(&self, consumer: &AccountId) -> Result<RequestId, CoordinatorError> {
        let raw = self.next_request.fetch_add(1, Ordering::SeqCst);
        let request_id = RequestId::from_raw(raw)
            .ok_or_else(|| CoordinatorError::Coordinator("request id space exhausted".into()))?;
        self.lock().insert(request_id, consumer.clone());
        Ok(request_id)
    }

    fn fulfill_random_words(
        &self,
        request_id: RequestId,
        consumer: &dyn RandomnessConsumer,
    ) -> Result<(), CoordinatorError> {
        {
            let mut pending = self.lock();
            // A request registered for a different consumer is treated as
            // unknown.
            let known = pending
                .get(&request_id)
                .is_some_and(|account| *account == consumer.address());
            if !known {
                return Err(CoordinatorError::NonexistentRequest(request_id));
            }
            pending.remove(&request_id);
        }
        let words = Self::derive_words(request_id);
        consumer
            .raw_fulfill_random_words(request_id, &words)
            .map_err(|err| CoordinatorError::Consumer(err.to_string()))?;
        Ok(())
    }
}
