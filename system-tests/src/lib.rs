// system-tests/src/lib.rs
// ============================================================================
// Module: Raffle Rig System Tests Library
// Description: Shared settings resolution for the system-test suites.
// Purpose: Resolve rig configuration and staging selection from the environment.
// Dependencies: raffle-rig-config, std
// ============================================================================

//! ## Overview
//! Shared library surface for the raffle rig system-test suites. The suites
//! resolve their configuration through [`settings`] so a config file or a
//! staging network can be injected from the environment without editing the
//! tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod settings;
