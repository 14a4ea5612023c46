// crates/raffle-rig-harness/src/watch.rs
// ============================================================================
// Module: Event Watch
// Description: Subscribe-then-settle completion protocol for scenarios.
// Purpose: Await one completion event with post-condition checks and timeout.
// Dependencies: crate::{outcome, source}, raffle-rig-core, thiserror, tokio
// ============================================================================

//! ## Overview
//! [`EventWatch`] carries one scenario wait from subscription to terminal
//! outcome. The protocol is strict about ordering: the subscription is
//! registered when the watch is created, and the caller performs the
//! triggering action only afterwards, so an event that fires immediately is
//! buffered rather than lost.
//!
//! Settling consumes the watch. The first matching event runs the scenario's
//! post-condition callback; a check failure becomes the rejection value
//! instead of unwinding into the emission context. When no event arrives
//! within the configured timeout, the outcome rejects with a timeout error
//! that is distinguishable from a post-condition failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use raffle_rig_core::EventKind;
use raffle_rig_core::RaffleEvent;
use thiserror::Error as ThisError;
use tokio::time;

use crate::outcome::OutcomeCell;
use crate::source::EventSource;
use crate::source::EventSubscription;

// ============================================================================
// SECTION: Await Errors
// ============================================================================

/// Post-condition check failure raised by a scenario callback.
///
/// # Invariants
/// - Carries the human-readable reason verbatim; no retry semantics.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{reason}")]
pub struct CheckFailure {
    /// Human-readable failure reason.
    reason: String,
}

impl CheckFailure {
    /// Creates a check failure with the provided reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Returns a check failure unless the condition holds.
///
/// # Errors
///
/// Returns [`CheckFailure`] carrying `reason` when `condition` is false.
pub fn ensure(condition: bool, reason: impl Into<String>) -> Result<(), CheckFailure> {
    if condition {
        Ok(())
    } else {
        Err(CheckFailure::new(reason))
    }
}

/// Errors terminating a watch without a successful resolution.
///
/// # Invariants
/// - Variants are stable for programmatic handling; timeout and
///   post-condition failures are distinct for diagnosability.
#[derive(Debug, Clone, ThisError)]
pub enum AwaitError {
    /// The completion event did not fire within the configured timeout.
    #[error("completion event did not fire within {} ms", .waited.as_millis())]
    Timeout {
        /// Timeout interval that elapsed.
        waited: Duration,
    },
    /// The post-condition callback rejected the completion event.
    #[error("post-condition failed: {0}")]
    PostCondition(#[source] CheckFailure),
    /// The emitter dropped the subscription before the event fired.
    #[error("event channel closed before the completion event fired")]
    ChannelClosed,
}

/// Errors surfaced by a full subscribe-trigger-settle scenario run.
///
/// # Invariants
/// - A triggering-action failure means the post-condition callback was never
///   invoked.
#[derive(Debug, ThisError)]
pub enum ScenarioError<E>
where
    E: Error + 'static,
{
    /// The triggering action failed before the event could fire.
    #[error("triggering action failed: {0}")]
    Trigger(#[source] E),
    /// The watch terminated without a successful resolution.
    #[error(transparent)]
    Await(#[from] AwaitError),
}

// ============================================================================
// SECTION: Event Watch
// ============================================================================

/// Pending wait for one completion event.
///
/// # Invariants
/// - The subscription is registered at construction, before any triggering
///   action the caller performs.
/// - The outcome cell transitions to exactly one terminal state; settling
///   consumes the watch and releases the subscription on every path.
#[derive(Debug)]
pub struct EventWatch {
    /// One-shot subscription registered at construction.
    subscription: EventSubscription,
    /// Optional per-watch timeout for the event wait.
    timeout: Option<Duration>,
    /// Pending outcome observable by the scenario.
    outcome: Arc<OutcomeCell<RaffleEvent, AwaitError>>,
}

impl EventWatch {
    /// Subscribes to `kind` on `source` and returns the pending watch.
    ///
    /// Callers must create the watch before performing the action expected
    /// to fire the event.
    #[must_use]
    pub fn subscribe(source: &dyn EventSource, kind: EventKind) -> Self {
        Self {
            subscription: source.subscribe(kind),
            timeout: None,
            outcome: Arc::new(OutcomeCell::new()),
        }
    }

    /// Sets an explicit timeout for the event wait.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns a handle to the pending outcome for state observation.
    #[must_use]
    pub fn outcome(&self) -> Arc<OutcomeCell<RaffleEvent, AwaitError>> {
        Arc::clone(&self.outcome)
    }

    /// Waits for the completion event and settles the outcome exactly once.
    ///
    /// `on_fired` runs the scenario's post-condition checks against the
    /// received event. The subscription is consumed and deregistered whether
    /// the watch resolves, rejects, or times out.
    ///
    /// # Errors
    ///
    /// Returns [`AwaitError::Timeout`] when no event arrives in time,
    /// [`AwaitError::PostCondition`] when `on_fired` rejects, and
    /// [`AwaitError::ChannelClosed`] when the emitter goes away first.
    pub async fn settle<F>(mut self, on_fired: F) -> Result<RaffleEvent, AwaitError>
    where
        F: FnOnce(&RaffleEvent) -> Result<(), CheckFailure>,
    {
        let received = match self.timeout {
            Some(waited) => match time::timeout(waited, self.subscription.recv()).await {
                Ok(received) => received,
                Err(_elapsed) => {
                    return Err(self.reject(AwaitError::Timeout {
                        waited,
                    }));
                }
            },
            None => self.subscription.recv().await,
        };
        let Some(event) = received else {
            return Err(self.reject(AwaitError::ChannelClosed));
        };
        match on_fired(&event) {
            Ok(()) => {
                self.outcome.try_resolve(event.clone());
                Ok(event)
            }
            Err(failure) => Err(self.reject(AwaitError::PostCondition(failure))),
        }
    }

    /// Records a rejection on the outcome cell and returns the error.
    fn reject(&self, error: AwaitError) -> AwaitError {
        self.outcome.try_reject(error.clone());
        error
    }
}

// ============================================================================
// SECTION: Scenario Runner
// ============================================================================

/// Runs one subscribe-trigger-settle scenario against an event source.
///
/// The subscription is registered before `trigger` executes, preserving the
/// subscribe-before-trigger ordering. A triggering failure propagates
/// immediately and `on_fired` is never invoked for it.
///
/// # Errors
///
/// Returns [`ScenarioError::Trigger`] when the triggering action fails and
/// [`ScenarioError::Await`] when the watch rejects or times out.
pub async fn await_completion<E, T, F>(
    source: &dyn EventSource,
    kind: EventKind,
    timeout: Option<Duration>,
    trigger: T,
    on_fired: F,
) -> Result<RaffleEvent, ScenarioError<E>>
where
    E: Error + 'static,
    T: FnOnce() -> Result<(), E>,
    F: FnOnce(&RaffleEvent) -> Result<(), CheckFailure>,
{
    let mut watch = EventWatch::subscribe(source, kind);
    if let Some(timeout) = timeout {
        watch = watch.with_timeout(timeout);
    }
    trigger().map_err(ScenarioError::Trigger)?;
    Ok(watch.settle(on_fired).await?)
}
