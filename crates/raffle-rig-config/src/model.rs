// crates/raffle-rig-config/src/model.rs
// ============================================================================
// Module: Configuration Model
// Description: Rig configuration types, TOML loading, and validation.
// Purpose: Fail closed on invalid or inconsistent network parameters.
// Dependencies: raffle-rig-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The configuration model mirrors the rig's deployment inputs: a map of
//! named network profiles, the default network, and the coordinator fee
//! settings applied when mocks are deployed. `load` and `from_toml_str`
//! always validate; a [`RigConfig`] in hand has passed every check.
//! Invariants:
//! - The default network names an existing profile.
//! - Entrance fees, intervals, and base fees are non-zero.
//! - Chain ids are unique across profiles.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use raffle_rig_core::ChainId;
use raffle_rig_core::Wei;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading or validating rig configuration.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Configuration file is not valid TOML for the model.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Configuration parsed but failed a validation rule.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Fee Settings
// ============================================================================

/// Coordinator fee settings used when deploying the mock coordinator.
///
/// # Invariants
/// - `base_fee` is the flat premium per randomness request and is non-zero
///   after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSettings {
    /// Flat premium charged per randomness request.
    pub base_fee: Wei,
    /// Link-denominated gas price used to cost fulfillment callbacks.
    pub gas_price_link: Wei,
}

// ============================================================================
// SECTION: Network Profiles
// ============================================================================

/// Per-network raffle deployment parameters.
///
/// # Invariants
/// - `development` selects whether mock infrastructure may be deployed.
/// - `entrance_fee` and `interval_secs` are non-zero after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Numeric chain identifier.
    pub chain_id: ChainId,
    /// True for local development chains where mocks are deployed.
    pub development: bool,
    /// Fee required to enter the raffle.
    pub entrance_fee: Wei,
    /// Seconds between eligible winner draws.
    pub interval_secs: u64,
    /// Gas lane key hash forwarded with randomness requests.
    pub gas_lane: String,
    /// Coordinator subscription funding the requests.
    pub subscription_id: u64,
    /// Gas limit for the fulfillment callback.
    pub callback_gas_limit: u64,
}

// ============================================================================
// SECTION: Rig Configuration
// ============================================================================

/// Validated rig configuration.
///
/// # Invariants
/// - `default_network` names a key of `networks`.
/// - Construction paths (`load`, `from_toml_str`) always validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RigConfig {
    /// Name of the profile used when no network is selected explicitly.
    pub default_network: String,
    /// Coordinator fee settings for mock deployments.
    pub fees: FeeSettings,
    /// Named network profiles.
    pub networks: BTreeMap<String, NetworkProfile>,
}

/// Chain id of the built-in local development profile.
pub const LOCAL_CHAIN_ID: u64 = 31_337;

/// Gas lane key hash used by the built-in profiles.
const DEFAULT_GAS_LANE: &str =
    "0x4b09e658ed251bcafeebbc69400383d49f344ace09b9576fe248bb02c003fe9f";

impl RigConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Parse`] on malformed TOML, and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_toml_str(&raw)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the built-in configuration: a local development profile with
    /// the standard mock fees, plus a non-development staging profile.
    #[must_use]
    pub fn builtin() -> Self {
        let mut networks = BTreeMap::new();
        if let Some(chain_id) = ChainId::from_raw(LOCAL_CHAIN_ID) {
            networks.insert(
                "local".to_string(),
                NetworkProfile {
                    chain_id,
                    development: true,
                    entrance_fee: Wei::new(10_000_000_000_000_000),
                    interval_secs: 30,
                    gas_lane: DEFAULT_GAS_LANE.to_string(),
                    subscription_id: 0,
                    callback_gas_limit: 500_000,
                },
            );
        }
        if let Some(chain_id) = ChainId::from_raw(11_155_111) {
            networks.insert(
                "sepolia".to_string(),
                NetworkProfile {
                    chain_id,
                    development: false,
                    entrance_fee: Wei::new(10_000_000_000_000_000),
                    interval_secs: 30,
                    gas_lane: DEFAULT_GAS_LANE.to_string(),
                    subscription_id: 588,
                    callback_gas_limit: 500_000,
                },
            );
        }
        Self {
            default_network: "local".to_string(),
            fees: FeeSettings {
                base_fee: Wei::new(250_000_000_000_000_000),
                gas_price_link: Wei::new(1_000_000_000),
            },
            networks,
        }
    }

    /// Returns the profile registered under `name`.
    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&NetworkProfile> {
        self.networks.get(name)
    }

    /// Returns the profile for the default network.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the default network is missing,
    /// which only happens for configurations built without validation.
    pub fn default_profile(&self) -> Result<&NetworkProfile, ConfigError> {
        self.profile(&self.default_network).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "default network {} has no profile",
                self.default_network
            ))
        })
    }

    /// Returns the profile registered for `chain_id`.
    #[must_use]
    pub fn profile_by_chain(&self, chain_id: ChainId) -> Option<(&str, &NetworkProfile)> {
        self.networks
            .iter()
            .find(|(_, profile)| profile.chain_id == chain_id)
            .map(|(name, profile)| (name.as_str(), profile))
    }

    /// Returns true when `name` is a development network.
    #[must_use]
    pub fn is_development(&self, name: &str) -> bool {
        self.profile(name).is_some_and(|profile| profile.development)
    }

    /// Validates the configuration, failing closed on the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.networks.is_empty() {
            return Err(ConfigError::Invalid("no network profiles configured".to_string()));
        }
        if !self.networks.contains_key(&self.default_network) {
            return Err(ConfigError::Invalid(format!(
                "default network {} has no profile",
                self.default_network
            )));
        }
        if self.fees.base_fee.is_zero() {
            return Err(ConfigError::Invalid("coordinator base fee must be non-zero".to_string()));
        }
        let mut seen_chains = BTreeSet::new();
        for (name, profile) in &self.networks {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid("network name must be non-empty".to_string()));
            }
            if profile.entrance_fee.is_zero() {
                return Err(ConfigError::Invalid(format!(
                    "network {name}: entrance fee must be non-zero"
                )));
            }
            if profile.interval_secs == 0 {
                return Err(ConfigError::Invalid(format!(
                    "network {name}: interval must be non-zero"
                )));
            }
            if profile.gas_lane.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "network {name}: gas lane must be non-empty"
                )));
            }
            if profile.callback_gas_limit == 0 {
                return Err(ConfigError::Invalid(format!(
                    "network {name}: callback gas limit must be non-zero"
                )));
            }
            if !seen_chains.insert(profile.chain_id) {
                return Err(ConfigError::Invalid(format!(
                    "network {name}: duplicate chain id {}",
                    profile.chain_id
                )));
            }
        }
        Ok(())
    }
}
