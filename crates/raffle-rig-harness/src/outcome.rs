// crates/raffle-rig-harness/src/outcome.rs
// ============================================================================
// Module: Pending Outcome Cell
// Description: Single-resolution state machine for scenario outcomes.
// Purpose: Guarantee exactly-once transition from pending to a terminal state.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`OutcomeCell`] is the pending outcome of one scenario wait: it starts
//! pending and transitions to exactly one terminal state (resolved or
//! rejected) exactly once. Any later transition attempt is ignored and
//! reported as not applied, which makes duplicate event fires harmless.
//! Mutual exclusion between the event path and the timeout path is provided
//! by the single-threaded scheduling model; the internal lock only protects
//! the slot against observer reads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::MutexGuard;

// ============================================================================
// SECTION: Outcome State
// ============================================================================

/// Externally observable state of a pending outcome.
///
/// # Invariants
/// - `Resolved` and `Rejected` are terminal; a cell never leaves a terminal
///   state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeState {
    /// No terminal transition has happened yet.
    Pending,
    /// The scenario completed and its post-conditions held.
    Resolved,
    /// The scenario failed (post-condition, timeout, or lost channel).
    Rejected,
}

// ============================================================================
// SECTION: Outcome Cell
// ============================================================================

/// Internal slot tracking the first terminal transition.
#[derive(Debug)]
enum Slot<V, E> {
    /// No transition applied yet.
    Pending,
    /// First transition was a resolution carrying the completion value.
    Resolved(V),
    /// First transition was a rejection carrying the failure.
    Rejected(E),
}

/// Single-resolution outcome cell.
///
/// # Invariants
/// - Transitions from pending to exactly one terminal state exactly once.
/// - `try_resolve` / `try_reject` return whether the transition was applied;
///   attempts after the first transition are ignored.
#[derive(Debug)]
pub struct OutcomeCell<V, E> {
    /// Terminal slot guarded for observer reads.
    slot: Mutex<Slot<V, E>>,
}

impl<V, E> OutcomeCell<V, E> {
    /// Creates a pending outcome cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Pending),
        }
    }

    /// Locks the slot, recovering the guard if a previous holder panicked.
    /// The slot is a plain enum and stays structurally valid across panics.
    fn lock(&self) -> MutexGuard<'_, Slot<V, E>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Applies a resolution if the cell is still pending.
    ///
    /// Returns true when this call performed the transition.
    pub fn try_resolve(&self, value: V) -> bool {
        let mut slot = self.lock();
        if matches!(*slot, Slot::Pending) {
            *slot = Slot::Resolved(value);
            return true;
        }
        false
    }

    /// Applies a rejection if the cell is still pending.
    ///
    /// Returns true when this call performed the transition.
    pub fn try_reject(&self, error: E) -> bool {
        let mut slot = self.lock();
        if matches!(*slot, Slot::Pending) {
            *slot = Slot::Rejected(error);
            return true;
        }
        false
    }

    /// Returns the externally observable outcome state.
    pub fn state(&self) -> OutcomeState {
        match *self.lock() {
            Slot::Pending => OutcomeState::Pending,
            Slot::Resolved(_) => OutcomeState::Resolved,
            Slot::Rejected(_) => OutcomeState::Rejected,
        }
    }

    /// Returns true while no terminal transition has been applied.
    pub fn is_pending(&self) -> bool {
        self.state() == OutcomeState::Pending
    }
}

impl<V: Clone, E: Clone> OutcomeCell<V, E> {
    /// Returns a copy of the rejection, if the cell was rejected.
    pub fn rejection(&self) -> Option<E> {
        match &*self.lock() {
            Slot::Rejected(error) => Some(error.clone()),
            Slot::Pending | Slot::Resolved(_) => None,
        }
    }

    /// Returns a copy of the resolution value, if the cell was resolved.
    pub fn resolution(&self) -> Option<V> {
        match &*self.lock() {
            Slot::Resolved(value) => Some(value.clone()),
            Slot::Pending | Slot::Rejected(_) => None,
        }
    }
}

impl<V, E> Default for OutcomeCell<V, E> {
    fn default() -> Self {
        Self::new()
    }
}
