// crates/raffle-rig-harness/src/lib.rs
// ============================================================================
// Module: Raffle Rig Event-Await Harness
// Description: Bridges an asynchronous completion event into a linear scenario.
// Purpose: Provide exactly-once outcome resolution with explicit timeouts.
// Dependencies: raffle-rig-core, thiserror, tokio
// ============================================================================

//! ## Overview
//! `raffle-rig-harness` implements the event-await protocol scenarios use to
//! wait for an externally triggered completion event. A scenario subscribes
//! **before** performing the triggering action, so a fast-firing event is
//! never lost, then settles the watch: the first matching event runs the
//! scenario's post-condition checks and the pending outcome transitions to
//! exactly one terminal state.
//! Invariants:
//! - A pending outcome resolves or rejects exactly once; later event fires
//!   are ignored.
//! - Post-condition failures are carried in the outcome, never thrown into
//!   the emission context.
//! - Timeouts are explicit and configurable per watch; the subscription is
//!   released on every path (success, failure, or timeout).

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod outcome;
pub mod source;
pub mod watch;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use outcome::OutcomeCell;
pub use outcome::OutcomeState;
pub use source::EventSource;
pub use source::EventSubscription;
pub use watch::AwaitError;
pub use watch::CheckFailure;
pub use watch::EventWatch;
pub use watch::ScenarioError;
pub use watch::await_completion;
pub use watch::ensure;
