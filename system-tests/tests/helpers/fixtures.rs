// system-tests/tests/helpers/fixtures.rs
// ============================================================================
// Module: Bench Fixtures
// Description: Per-scenario bench construction from resolved settings.
// Purpose: Deploy a fresh mock chain for each test without shared state.
// Dependencies: raffle-rig-chain, raffle-rig-config, system-tests
// ============================================================================

use raffle_rig_chain::Bench;
use raffle_rig_chain::CoordinatorFees;
use raffle_rig_chain::NullObserver;
use raffle_rig_config::RigConfig;
use system_tests::settings;

/// Loads the rig configuration from the environment or built-ins.
pub fn load_config() -> RigConfig {
    settings::load_config().expect("rig config should load")
}

/// Maps config fee settings onto coordinator deployment fees.
pub fn fees(config: &RigConfig) -> CoordinatorFees {
    CoordinatorFees {
        base_fee: config.fees.base_fee,
        gas_price_link: config.fees.gas_price_link,
    }
}

/// Deploys a fresh bench for the default (development) network.
pub fn deploy_default_bench() -> (RigConfig, Bench) {
    let config = load_config();
    let network = config.default_network.clone();
    let profile = config.profile(&network).expect("default profile should exist").clone();
    let bench = Bench::deploy(&network, &profile, fees(&config), &NullObserver)
        .expect("bench should deploy on the default development network");
    (config, bench)
}
