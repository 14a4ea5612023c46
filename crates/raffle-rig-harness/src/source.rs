// crates/raffle-rig-harness/src/source.rs
// ============================================================================
// Module: Event Source Seam
// Description: Subscription interface between scenarios and event emitters.
// Purpose: Decouple the await harness from any concrete emitter.
// Dependencies: raffle-rig-core, tokio
// ============================================================================

//! ## Overview
//! [`EventSource`] is the seam between the harness and whatever emits raffle
//! events (the mock chain's event bus in this workspace). A subscription is
//! bound to a single [`EventKind`] and carries its own receiver; dropping the
//! subscription deregisters the listener, so a disposed scenario context can
//! never be fired into. The harness does not own the emitter's lifecycle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use raffle_rig_core::EventKind;
use raffle_rig_core::RaffleEvent;
use tokio::sync::mpsc;

// ============================================================================
// SECTION: Event Source
// ============================================================================

/// Emits raffle events to per-kind subscriptions.
pub trait EventSource: Send + Sync {
    /// Registers a listener for a single event kind.
    fn subscribe(&self, kind: EventKind) -> EventSubscription;
}

// ============================================================================
// SECTION: Event Subscription
// ============================================================================

/// One-shot listener bound to a named event kind.
///
/// # Invariants
/// - Only events of the subscribed kind are delivered.
/// - Dropping the subscription closes the channel and deregisters the
///   listener at the emitter.
#[derive(Debug)]
pub struct EventSubscription {
    /// Subscribed event kind.
    kind: EventKind,
    /// Receiver half of the emitter's delivery channel.
    receiver: mpsc::UnboundedReceiver<RaffleEvent>,
}

impl EventSubscription {
    /// Creates a subscription from a delivery channel receiver.
    ///
    /// Emitters create the channel, retain the sender, and hand the receiver
    /// to the subscriber through this constructor.
    #[must_use]
    pub const fn new(kind: EventKind, receiver: mpsc::UnboundedReceiver<RaffleEvent>) -> Self {
        Self {
            kind,
            receiver,
        }
    }

    /// Returns the subscribed event kind.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Waits for the next delivered event.
    ///
    /// Returns `None` when the emitter dropped the sending half without
    /// delivering an event.
    pub async fn recv(&mut self) -> Option<RaffleEvent> {
        self.receiver.recv().await
    }
}
