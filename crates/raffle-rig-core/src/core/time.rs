// crates/raffle-rig-core/src/core/time.rs
// ============================================================================
// Module: Raffle Rig Time Model
// Description: Canonical chain timestamp representation for raffle state.
// Purpose: Provide deterministic, replayable time values across rig records.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The rig uses explicit chain time embedded in state and events to keep
//! scenarios deterministic. The core never reads wall-clock time; the
//! simulated clock supplies every timestamp, and tests advance it explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Chain timestamp in unix seconds.
///
/// # Invariants
/// - Values are explicitly provided by the simulated clock; the core never
///   reads wall-clock time.
/// - Monotonicity is a clock responsibility, not enforced by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from unix seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the timestamp as unix seconds.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    /// Returns the timestamp advanced by the given number of seconds,
    /// saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_add_secs(self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Returns the elapsed seconds since an earlier timestamp, saturating
    /// at zero when `earlier` is in the future.
    #[must_use]
    pub const fn saturating_elapsed_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}
