//! Network-level chain configuration.
//!
//! The denom and gas-price values here are resolved once at the start of a
//! run and passed explicitly through the call chain; nothing reads them
//! from process-global state.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Default bond/fee denomination (nano-mer).
pub const DEFAULT_DENOM: &str = "nmer";

/// Default minimum gas price, in base units of the fee denom.
pub const DEFAULT_MIN_GAS_PRICE: u64 = 1905;

/// Prefix used when synthesizing a chain id.
pub const CHAIN_ID_PREFIX: &str = "meridian";

/// Which network profile a node is being initialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    Mainnet,
    Testnet,
}

impl NetworkKind {
    pub fn is_testnet(self) -> bool {
        matches!(self, NetworkKind::Testnet)
    }

    pub fn name(self) -> &'static str {
        match self {
            NetworkKind::Mainnet => "mainnet",
            NetworkKind::Testnet => "testnet",
        }
    }
}

/// Resolved network configuration for one init run.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    network: NetworkKind,
    bond_denom: String,
    fee_denom: String,
    min_gas_prices: String,
}

impl ChainConfig {
    /// Resolve the configuration for `network`, substituting `custom_denom`
    /// for both the bond and fee denom when given.
    pub fn new(network: NetworkKind, custom_denom: Option<&str>) -> Self {
        let denom = custom_denom.filter(|d| !d.is_empty()).unwrap_or(DEFAULT_DENOM);
        Self {
            network,
            bond_denom: denom.to_string(),
            fee_denom: denom.to_string(),
            min_gas_prices: format!("{DEFAULT_MIN_GAS_PRICE}{denom}"),
        }
    }

    pub fn network(&self) -> NetworkKind {
        self.network
    }

    pub fn bond_denom(&self) -> &str {
        &self.bond_denom
    }

    pub fn fee_denom(&self) -> &str {
        &self.fee_denom
    }

    pub fn min_gas_prices(&self) -> &str {
        &self.min_gas_prices
    }
}

/// Synthesize a chain id of the form `meridian-chain-<6 alphanumeric chars>`.
pub fn random_chain_id() -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("{CHAIN_ID_PREFIX}-chain-{token}")
}
