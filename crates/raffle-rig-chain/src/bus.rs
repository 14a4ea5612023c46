// crates/raffle-rig-chain/src/bus.rs
// ============================================================================
// Module: Mock Event Bus
// Description: Event emitter implementing the harness subscription seam.
// Purpose: Deliver raffle events to live per-kind subscriptions.
// Dependencies: raffle-rig-core, raffle-rig-harness, tokio, std
// ============================================================================

//! ## Overview
//! [`EventBus`] is the emitter side of the harness subscription seam. Each
//! subscription gets its own unbounded channel; emission delivers to every
//! live subscription of the matching kind and prunes channels whose
//! receivers were dropped, so a disposed scenario context can never be
//! fired into and handlers do not leak across scenarios.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::MutexGuard;

use raffle_rig_core::EventKind;
use raffle_rig_core::RaffleEvent;
use raffle_rig_harness::EventSource;
use raffle_rig_harness::EventSubscription;
use tokio::sync::mpsc;

// ============================================================================
// SECTION: Event Bus
// ============================================================================

/// Registered sender half of one subscription.
#[derive(Debug)]
struct Registration {
    /// Event kind the subscription is bound to.
    kind: EventKind,
    /// Sender half of the subscription channel.
    sender: mpsc::UnboundedSender<RaffleEvent>,
}

/// Mock chain event emitter.
///
/// # Invariants
/// - Events are delivered only to subscriptions of the matching kind.
/// - Closed subscriptions are pruned on every emission and count query.
#[derive(Debug, Default)]
pub struct EventBus {
    /// Live subscription registrations.
    registrations: Mutex<Vec<Registration>>,
}

impl EventBus {
    /// Creates a bus with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the registration list, recovering the guard if a holder
    /// panicked. The list stays structurally valid across panics.
    fn lock(&self) -> MutexGuard<'_, Vec<Registration>> {
        match self.registrations.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Emits an event to every live subscription of the matching kind.
    pub fn emit(&self, event: &RaffleEvent) {
        let mut registrations = self.lock();
        registrations.retain(|registration| !registration.sender.is_closed());
        for registration in registrations.iter() {
            if registration.kind == event.kind() {
                // A receiver dropped between the retain and this send is
                // pruned on the next emission.
                let _ = registration.sender.send(event.clone());
            }
        }
    }

    /// Returns the number of live subscriptions, pruning closed ones first.
    pub fn subscriber_count(&self) -> usize {
        let mut registrations = self.lock();
        registrations.retain(|registration| !registration.sender.is_closed());
        registrations.len()
    }
}

impl EventSource for EventBus {
    fn subscribe(&self, kind: EventKind) -> EventSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock().push(Registration {
            kind,
            sender,
        });
        EventSubscription::new(kind, receiver)
    }
}
