// crates/raffle-rig-config/src/lib.rs
// ============================================================================
// Module: Raffle Rig Configuration
// Description: Network-profile configuration model, loading, and validation.
// Purpose: Provide validated per-network parameters for deployments and tests.
// Dependencies: raffle-rig-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! `raffle-rig-config` owns the network-profile model the rig deploys and
//! tests against: per-network chain id, entrance fee, draw interval, VRF
//! request parameters, and the coordinator fee settings used when mocks are
//! deployed. Profiles are loaded from TOML and validated fail-closed before
//! use. A development profile is the only kind mocks may be deployed on.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod model;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use model::ConfigError;
pub use model::FeeSettings;
pub use model::NetworkProfile;
pub use model::RigConfig;
