// crates/raffle-rig-chain/tests/coordinator_unit_tests.rs
// ============================================================================
// Module: Mock Coordinator Unit Tests
// Description: Unit tests for the pending-request registry and fulfillment.
// Purpose: Validate id issuance, nonexistent-request handling, determinism.
// Dependencies: raffle-rig-chain, raffle-rig-core
// ============================================================================

//! ## Overview
//! Exercises [`raffle_rig_chain::MockVrfCoordinator`]: sequential request
//! ids, exactly-once fulfillment, nonexistent-request failures, and
//! deterministic word derivation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Mutex;

use raffle_rig_chain::CoordinatorFees;
use raffle_rig_chain::MockVrfCoordinator;
use raffle_rig_core::AccountId;
use raffle_rig_core::CoordinatorError;
use raffle_rig_core::RaffleError;
use raffle_rig_core::RandomnessConsumer;
use raffle_rig_core::RandomnessCoordinator;
use raffle_rig_core::RequestId;
use raffle_rig_core::Wei;

// ============================================================================
// SECTION: Stub Consumer
// ============================================================================

/// Consumer stub capturing every fulfillment it receives.
struct StubConsumer {
    address: AccountId,
    seen: Mutex<Vec<(RequestId, Vec<u64>)>>,
    reject: bool,
}

impl StubConsumer {
    fn new(address: &str) -> Self {
        Self {
            address: AccountId::new(address),
            seen: Mutex::new(Vec::new()),
            reject: false,
        }
    }

    fn rejecting(address: &str) -> Self {
        Self {
            reject: true,
            ..Self::new(address)
        }
    }

    fn seen(&self) -> Vec<(RequestId, Vec<u64>)> {
        self.seen.lock().unwrap().clone()
    }
}

impl RandomnessConsumer for StubConsumer {
    fn address(&self) -> AccountId {
        self.address.clone()
    }

    fn raw_fulfill_random_words(
        &self,
        request_id: RequestId,
        words: &[u64],
    ) -> Result<(), RaffleError> {
        self.seen.lock().unwrap().push((request_id, words.to_vec()));
        if self.reject {
            return Err(RaffleError::Randomness("stub rejected".into()));
        }
        Ok(())
    }
}

fn coordinator() -> MockVrfCoordinator {
    MockVrfCoordinator::new(CoordinatorFees {
        base_fee: Wei::new(250_000_000_000_000_000),
        gas_price_link: Wei::new(1_000_000_000),
    })
}

fn request_id(raw: u64) -> RequestId {
    RequestId::from_raw(raw).unwrap()
}

// ============================================================================
// SECTION: Request Tests
// ============================================================================

/// Tests request ids are sequential starting at 1.
#[test]
fn coordinator_issues_sequential_ids_from_one() {
    let coordinator = coordinator();
    let consumer = AccountId::new("raffle-31337");

    assert_eq!(coordinator.request_random_words(&consumer).unwrap(), request_id(1));
    assert_eq!(coordinator.request_random_words(&consumer).unwrap(), request_id(2));
    assert_eq!(coordinator.pending_requests(), 2);
}

// ============================================================================
// SECTION: Fulfillment Tests
// ============================================================================

/// Tests fulfilling an id that was never issued fails as nonexistent.
#[test]
fn coordinator_rejects_unissued_request() {
    let coordinator = coordinator();
    let consumer = StubConsumer::new("raffle-31337");

    let err = coordinator.fulfill_random_words(request_id(999), &consumer).unwrap_err();
    match err {
        CoordinatorError::NonexistentRequest(id) => assert_eq!(id, request_id(999)),
        other => panic!("expected NonexistentRequest, got: {other}"),
    }
    assert!(consumer.seen().is_empty(), "callback ran for a nonexistent request");
}

/// Tests a pending request is consumed by exactly one fulfillment.
#[test]
fn coordinator_fulfills_pending_request_exactly_once() {
    let coordinator = coordinator();
    let consumer = StubConsumer::new("raffle-31337");
    let id = coordinator.request_random_words(&consumer.address()).unwrap();

    coordinator.fulfill_random_words(id, &consumer).unwrap();
    assert_eq!(coordinator.pending_requests(), 0);
    assert_eq!(consumer.seen().len(), 1);

    let err = coordinator.fulfill_random_words(id, &consumer).unwrap_err();
    assert!(matches!(err, CoordinatorError::NonexistentRequest(_)));
}

/// Tests a request registered for another consumer is treated as unknown.
#[test]
fn coordinator_rejects_mismatched_consumer() {
    let coordinator = coordinator();
    let registered = AccountId::new("raffle-31337");
    let id = coordinator.request_random_words(&registered).unwrap();

    let other = StubConsumer::new("raffle-11155111");
    let err = coordinator.fulfill_random_words(id, &other).unwrap_err();
    assert!(matches!(err, CoordinatorError::NonexistentRequest(_)));
    // The mismatch does not consume the pending request.
    assert_eq!(coordinator.pending_requests(), 1);
}

/// Tests a consumer rejection surfaces as a consumer error.
#[test]
fn coordinator_surfaces_consumer_rejection() {
    let coordinator = coordinator();
    let consumer = StubConsumer::rejecting("raffle-31337");
    let id = coordinator.request_random_words(&consumer.address()).unwrap();

    let err = coordinator.fulfill_random_words(id, &consumer).unwrap_err();
    match err {
        CoordinatorError::Consumer(message) => assert!(message.contains("stub rejected")),
        other => panic!("expected Consumer, got: {other}"),
    }
}

/// Tests word derivation depends only on the request id.
#[test]
fn coordinator_derives_words_deterministically() {
    let first = coordinator();
    let second = coordinator();
    let consumer_a = StubConsumer::new("raffle-31337");
    let consumer_b = StubConsumer::new("raffle-31337");

    let id_a = first.request_random_words(&consumer_a.address()).unwrap();
    let id_b = second.request_random_words(&consumer_b.address()).unwrap();
    first.fulfill_random_words(id_a, &consumer_a).unwrap();
    second.fulfill_random_words(id_b, &consumer_b).unwrap();

    assert_eq!(consumer_a.seen(), consumer_b.seen());
}
