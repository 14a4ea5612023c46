// system-tests/src/settings.rs
// ============================================================================
// Module: System Test Settings
// Description: Environment-driven configuration for the test suites.
// Purpose: Resolve the rig config and the staging network selection.
// Dependencies: raffle-rig-config, std
// ============================================================================

//! ## Overview
//! Suites take their configuration from the environment when provided and
//! fall back to the built-in profiles otherwise. `RAFFLE_RIG_CONFIG` points
//! at a TOML config file; `RAFFLE_RIG_STAGING_NETWORK` selects the profile
//! the staging suite runs against.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::path::PathBuf;

use raffle_rig_config::ConfigError;
use raffle_rig_config::RigConfig;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Environment variable pointing at a TOML config file.
pub const ENV_CONFIG_PATH: &str = "RAFFLE_RIG_CONFIG";

/// Environment variable selecting the staging network profile.
pub const ENV_STAGING_NETWORK: &str = "RAFFLE_RIG_STAGING_NETWORK";

/// Staging network used when no override is set.
pub const DEFAULT_STAGING_NETWORK: &str = "local";

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Loads the rig configuration, honoring `RAFFLE_RIG_CONFIG` when set.
///
/// # Errors
///
/// Returns [`ConfigError`] when the referenced file cannot be loaded or
/// fails validation.
pub fn load_config() -> Result<RigConfig, ConfigError> {
    match env::var_os(ENV_CONFIG_PATH) {
        Some(path) => RigConfig::load(&PathBuf::from(path)),
        None => Ok(RigConfig::builtin()),
    }
}

/// Returns the staging network name, honoring `RAFFLE_RIG_STAGING_NETWORK`.
#[must_use]
pub fn staging_network() -> String {
    env::var(ENV_STAGING_NETWORK).unwrap_or_else(|_| DEFAULT_STAGING_NETWORK.to_string())
}
