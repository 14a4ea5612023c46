// crates/raffle-rig-harness/tests/watch_unit_tests.rs
// ============================================================================
// Module: Event Watch Unit Tests
// Description: Unit tests for the subscribe-then-settle completion protocol.
// Purpose: Validate ordering, failure propagation, and timeout behavior.
// Dependencies: raffle-rig-core, raffle-rig-harness, tokio
// ============================================================================

//! ## Overview
//! Exercises [`raffle_rig_harness::EventWatch`] and
//! [`raffle_rig_harness::await_completion`] against a stub emitter: event
//! resolution, post-condition rejection, per-watch timeouts under a paused
//! clock, duplicate fires, and triggering-action failures.

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

use std::io;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use raffle_rig_core::AccountId;
use raffle_rig_core::EventKind;
use raffle_rig_core::RaffleEvent;
use raffle_rig_harness::AwaitError;
use raffle_rig_harness::CheckFailure;
use raffle_rig_harness::EventSource;
use raffle_rig_harness::EventSubscription;
use raffle_rig_harness::EventWatch;
use raffle_rig_harness::OutcomeState;
use raffle_rig_harness::ScenarioError;
use raffle_rig_harness::await_completion;
use raffle_rig_harness::ensure;
use tokio::sync::mpsc;
use tokio::time::Instant;

// ============================================================================
// SECTION: Stub Emitter
// ============================================================================

/// Minimal in-test emitter delivering events to matching subscriptions.
struct StubBus {
    senders: Mutex<Vec<(EventKind, mpsc::UnboundedSender<RaffleEvent>)>>,
}

impl StubBus {
    fn new() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }

    fn emit(&self, event: &RaffleEvent) {
        let senders = self.senders.lock().unwrap();
        for (kind, sender) in senders.iter() {
            if *kind == event.kind() {
                let _ = sender.send(event.clone());
            }
        }
    }
}

impl EventSource for StubBus {
    fn subscribe(&self, kind: EventKind) -> EventSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.senders.lock().unwrap().push((kind, sender));
        EventSubscription::new(kind, receiver)
    }
}

fn winner_picked(winner: &str) -> RaffleEvent {
    RaffleEvent::WinnerPicked {
        winner: AccountId::new(winner),
    }
}

// ============================================================================
// SECTION: Resolution Tests
// ============================================================================

/// Tests a watch resolves when the completion event fires and checks pass.
#[tokio::test]
async fn watch_resolves_on_completion_event() {
    let bus = StubBus::new();
    let watch = EventWatch::subscribe(&bus, EventKind::WinnerPicked);
    let outcome = watch.outcome();

    bus.emit(&winner_picked("acct-1"));

    let event = watch
        .settle(|event| ensure(event.kind() == EventKind::WinnerPicked, "wrong kind"))
        .await
        .unwrap();
    assert_eq!(event, winner_picked("acct-1"));
    assert_eq!(outcome.state(), OutcomeState::Resolved);
}

/// Tests an event fired before settle is buffered, not lost.
#[tokio::test]
async fn watch_buffers_fast_firing_event() {
    let bus = StubBus::new();
    let watch = EventWatch::subscribe(&bus, EventKind::WinnerPicked);

    // Trigger fires before the scenario reaches the await point.
    bus.emit(&winner_picked("acct-2"));
    bus.emit(&RaffleEvent::Entered {
        player: AccountId::new("acct-3"),
        value: raffle_rig_core::Wei::new(1),
    });

    let event = watch.settle(|_| Ok(())).await.unwrap();
    assert_eq!(event, winner_picked("acct-2"));
}

/// Tests only the subscribed kind is delivered to a watch.
#[tokio::test]
async fn watch_receives_only_matching_kind() {
    let bus = StubBus::new();
    let watch = EventWatch::subscribe(&bus, EventKind::WinnerPicked);

    bus.emit(&RaffleEvent::Entered {
        player: AccountId::new("acct-4"),
        value: raffle_rig_core::Wei::new(5),
    });
    bus.emit(&winner_picked("acct-5"));

    let event = watch.settle(|_| Ok(())).await.unwrap();
    assert_eq!(event, winner_picked("acct-5"));
}

/// Tests the outcome stays resolved when the event fires again afterwards.
#[tokio::test]
async fn watch_resolves_exactly_once_despite_extra_fires() {
    let bus = StubBus::new();
    let watch = EventWatch::subscribe(&bus, EventKind::WinnerPicked);
    let outcome = watch.outcome();

    bus.emit(&winner_picked("acct-6"));
    bus.emit(&winner_picked("acct-7"));

    let event = watch.settle(|_| Ok(())).await.unwrap();
    assert_eq!(event, winner_picked("acct-6"));
    assert_eq!(outcome.state(), OutcomeState::Resolved);

    // A late rejection attempt must not move a settled outcome.
    assert!(!outcome.try_reject(AwaitError::ChannelClosed));
    assert_eq!(outcome.state(), OutcomeState::Resolved);

    // The emitter may keep firing; the settled scenario is unaffected.
    bus.emit(&winner_picked("acct-8"));
    assert_eq!(outcome.resolution(), Some(winner_picked("acct-6")));
}

// ============================================================================
// SECTION: Failure Tests
// ============================================================================

/// Tests a post-condition failure is carried in the outcome, not swallowed.
#[tokio::test]
async fn watch_rejects_on_post_condition_failure() {
    let bus = StubBus::new();
    let watch = EventWatch::subscribe(&bus, EventKind::WinnerPicked);
    let outcome = watch.outcome();

    bus.emit(&winner_picked("acct-9"));

    let err = watch
        .settle(|_| Err(CheckFailure::new("player count should be zero")))
        .await
        .unwrap_err();
    match err {
        AwaitError::PostCondition(failure) => {
            assert_eq!(failure.to_string(), "player count should be zero");
        }
        other => panic!("expected PostCondition, got: {other}"),
    }
    assert_eq!(outcome.state(), OutcomeState::Rejected);
}

/// Tests a watch rejects with a channel error when the emitter goes away.
#[tokio::test]
async fn watch_rejects_when_emitter_goes_away() {
    let bus = StubBus::new();
    let watch = EventWatch::subscribe(&bus, EventKind::WinnerPicked);
    drop(bus);

    let err = watch.settle(|_| Ok(())).await.unwrap_err();
    assert!(matches!(err, AwaitError::ChannelClosed));
}

// ============================================================================
// SECTION: Timeout Tests
// ============================================================================

/// Tests the timeout fires after the configured interval and not before.
#[tokio::test(start_paused = true)]
async fn watch_times_out_after_configured_interval() {
    let bus = StubBus::new();
    let timeout = Duration::from_secs(2);
    let watch = EventWatch::subscribe(&bus, EventKind::WinnerPicked).with_timeout(timeout);
    let outcome = watch.outcome();

    let start = Instant::now();
    let err = watch.settle(|_| Ok(())).await.unwrap_err();
    let elapsed = start.elapsed();

    match err {
        AwaitError::Timeout {
            waited,
        } => assert_eq!(waited, timeout),
        other => panic!("expected Timeout, got: {other}"),
    }
    assert!(elapsed >= timeout, "timed out early: {} ms", elapsed.as_millis());
    assert_eq!(outcome.state(), OutcomeState::Rejected);
}

/// Tests an event arriving inside the timeout window resolves normally.
#[tokio::test(start_paused = true)]
async fn watch_resolves_within_timeout_window() {
    let bus = StubBus::new();
    let watch =
        EventWatch::subscribe(&bus, EventKind::WinnerPicked).with_timeout(Duration::from_secs(60));

    bus.emit(&winner_picked("acct-10"));

    let event = watch.settle(|_| Ok(())).await.unwrap();
    assert_eq!(event, winner_picked("acct-10"));
}

// ============================================================================
// SECTION: Scenario Runner Tests
// ============================================================================

/// Tests a failing trigger propagates before the callback can run.
#[tokio::test]
async fn await_completion_propagates_trigger_failure_without_checks() {
    let bus = StubBus::new();
    let fired = AtomicBool::new(false);

    let result = await_completion(
        &bus,
        EventKind::WinnerPicked,
        Some(Duration::from_secs(1)),
        || Err(io::Error::other("upkeep reverted")),
        |_| {
            fired.store(true, Ordering::SeqCst);
            Ok(())
        },
    )
    .await;

    match result {
        Err(ScenarioError::Trigger(err)) => assert_eq!(err.to_string(), "upkeep reverted"),
        Err(other) => panic!("expected Trigger, got: {other}"),
        Ok(event) => panic!("expected failure, got event: {event:?}"),
    }
    assert!(!fired.load(Ordering::SeqCst), "post-condition callback ran after trigger failure");
}

/// Tests the runner subscribes before running the triggering action.
#[tokio::test]
async fn await_completion_sees_event_fired_by_trigger() {
    let bus = StubBus::new();

    let event = await_completion(
        &bus,
        EventKind::WinnerPicked,
        Some(Duration::from_secs(1)),
        || {
            // The trigger itself fires the completion event immediately.
            bus.emit(&winner_picked("acct-11"));
            Ok::<(), io::Error>(())
        },
        |event| ensure(matches!(event, RaffleEvent::WinnerPicked { .. }), "wrong event"),
    )
    .await
    .unwrap();

    assert_eq!(event, winner_picked("acct-11"));
}
