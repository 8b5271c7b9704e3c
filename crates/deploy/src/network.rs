//! Network-dependent constants.

use alloy_core::primitives::{Address, address};

/// Network name that selects the rinkeby proxy registry.
pub const RINKEBY_NETWORK: &str = "rinkeby";

/// Marketplace proxy registry on rinkeby.
pub const RINKEBY_REGISTRY_ADDRESS: Address = address!("f57b2c51ded3a29e6891aba85459d600256cf317");

/// Marketplace proxy registry on mainnet. Used for every network other than rinkeby.
pub const MAINNET_REGISTRY_ADDRESS: Address = address!("a5409ec958c83c3f309868babaca7c86dcb077c1");

/// Select the proxy registry address for a network.
///
/// Only an exact match on [`RINKEBY_NETWORK`] selects the rinkeby registry; any
/// other identifier (including the empty string) falls back to mainnet.
pub fn registry_address(network: &str) -> Address {
    if network == RINKEBY_NETWORK {
        RINKEBY_REGISTRY_ADDRESS
    } else {
        MAINNET_REGISTRY_ADDRESS
    }
}
