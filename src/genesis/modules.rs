//! Registered ledger modules and their stock genesis state.
//!
//! Each module owns its genesis schema; the typed structs below are what a
//! module hands the node when asked for defaults. [`default_app_state`]
//! assembles the full map. Its key set is exactly the registered module
//! set, and every value round-trips through that module's own schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{duration_str, ModuleGenesisMap};

pub const MODULE_AUTH: &str = "auth";
pub const MODULE_BANK: &str = "bank";
pub const MODULE_CRISIS: &str = "crisis";
pub const MODULE_GOV: &str = "gov";
pub const MODULE_MARKER: &str = "marker";
pub const MODULE_MINT: &str = "mint";
pub const MODULE_SLASHING: &str = "slashing";
pub const MODULE_STAKING: &str = "staking";

/// Placeholder denom modules ship with before the network profile is
/// applied.
pub const STOCK_DENOM: &str = "stake";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self { denom: denom.into(), amount: amount.to_string() }
    }
}

// ── auth ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthGenesis {
    pub params: AuthParams,
    pub accounts: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthParams {
    pub max_memo_characters: u64,
    pub tx_sig_limit: u64,
    pub tx_size_cost_per_byte: u64,
}

impl Default for AuthParams {
    fn default() -> Self {
        Self { max_memo_characters: 256, tx_sig_limit: 7, tx_size_cost_per_byte: 10 }
    }
}

// ── bank ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BankGenesis {
    pub params: BankParams,
    pub balances: Vec<Value>,
    pub supply: Vec<Coin>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BankParams {
    pub default_send_enabled: bool,
}

impl Default for BankParams {
    fn default() -> Self {
        Self { default_send_enabled: true }
    }
}

// ── crisis ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrisisGenesis {
    pub constant_fee: Coin,
}

impl Default for CrisisGenesis {
    fn default() -> Self {
        Self { constant_fee: Coin::new(STOCK_DENOM, 1_000) }
    }
}

// ── gov ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GovGenesis {
    pub starting_proposal_id: u64,
    pub params: GovParams,
}

impl Default for GovGenesis {
    fn default() -> Self {
        Self { starting_proposal_id: 1, params: GovParams::default() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GovParams {
    pub min_deposit: Vec<Coin>,
    #[serde(with = "duration_str")]
    pub max_deposit_period: Duration,
    #[serde(with = "duration_str")]
    pub voting_period: Duration,
    pub quorum: String,
    pub threshold: String,
    pub veto_threshold: String,
}

impl Default for GovParams {
    fn default() -> Self {
        Self {
            min_deposit: vec![Coin::new(STOCK_DENOM, 10_000_000)],
            max_deposit_period: Duration::from_secs(172_800),
            voting_period: Duration::from_secs(172_800),
            quorum: "0.334".into(),
            threshold: "0.5".into(),
            veto_threshold: "0.334".into(),
        }
    }
}

// ── marker ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MarkerGenesis {
    pub params: MarkerParams,
    pub markers: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerParams {
    pub max_total_supply: u64,
    pub enable_governance: bool,
    /// The stock pattern accepts short denoms so development chains can use
    /// names like `stake`; network profiles tighten it.
    pub unrestricted_denom_regex: String,
}

impl Default for MarkerParams {
    fn default() -> Self {
        Self {
            max_total_supply: 100_000_000_000,
            enable_governance: true,
            unrestricted_denom_regex: r"[a-zA-Z][a-zA-Z0-9\-\.]{2,83}".into(),
        }
    }
}

// ── mint ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MintGenesis {
    pub minter: Minter,
    pub params: MintParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Minter {
    pub inflation: String,
    pub annual_provisions: String,
}

impl Default for Minter {
    fn default() -> Self {
        Self { inflation: "0.13".into(), annual_provisions: "0".into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MintParams {
    pub mint_denom: String,
    pub inflation_rate_change: String,
    pub inflation_max: String,
    pub inflation_min: String,
    pub goal_bonded: String,
    pub blocks_per_year: u64,
}

impl Default for MintParams {
    fn default() -> Self {
        Self {
            mint_denom: STOCK_DENOM.into(),
            inflation_rate_change: "0.13".into(),
            inflation_max: "0.20".into(),
            inflation_min: "0.07".into(),
            goal_bonded: "0.67".into(),
            blocks_per_year: 6_311_520,
        }
    }
}

// ── slashing ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SlashingGenesis {
    pub params: SlashingParams,
    pub signing_infos: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlashingParams {
    pub signed_blocks_window: i64,
    pub min_signed_per_window: String,
    #[serde(with = "duration_str")]
    pub downtime_jail_duration: Duration,
    pub slash_fraction_double_sign: String,
    pub slash_fraction_downtime: String,
}

impl Default for SlashingParams {
    fn default() -> Self {
        Self {
            signed_blocks_window: 100,
            min_signed_per_window: "0.5".into(),
            downtime_jail_duration: Duration::from_secs(600),
            slash_fraction_double_sign: "0.05".into(),
            slash_fraction_downtime: "0.01".into(),
        }
    }
}

// ── staking ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StakingGenesis {
    pub params: StakingParams,
    pub validators: Vec<Value>,
    pub delegations: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingParams {
    #[serde(with = "duration_str")]
    pub unbonding_time: Duration,
    pub max_validators: u32,
    pub max_entries: u32,
    pub historical_entries: u32,
    pub bond_denom: String,
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            unbonding_time: Duration::from_secs(1_814_400),
            max_validators: 100,
            max_entries: 7,
            historical_entries: 10_000,
            bond_denom: STOCK_DENOM.into(),
        }
    }
}

// ── registry ──────────────────────────────────────────────────────────────

fn entry<T: Serialize>(state: &T) -> Value {
    // Module genesis structs serialize from plain data; a failure here is a
    // schema bug in this file, not a runtime condition.
    serde_json::to_value(state).expect("module genesis state serializes")
}

/// Default genesis state for every registered module.
pub fn default_app_state() -> ModuleGenesisMap {
    let mut map = ModuleGenesisMap::new();
    map.insert(MODULE_AUTH.into(), entry(&AuthGenesis::default()));
    map.insert(MODULE_BANK.into(), entry(&BankGenesis::default()));
    map.insert(MODULE_CRISIS.into(), entry(&CrisisGenesis::default()));
    map.insert(MODULE_GOV.into(), entry(&GovGenesis::default()));
    map.insert(MODULE_MARKER.into(), entry(&MarkerGenesis::default()));
    map.insert(MODULE_MINT.into(), entry(&MintGenesis::default()));
    map.insert(MODULE_SLASHING.into(), entry(&SlashingGenesis::default()));
    map.insert(MODULE_STAKING.into(), entry(&StakingGenesis::default()));
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_all_modules() {
        let state = default_app_state();
        let names: Vec<&str> = state.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["auth", "bank", "crisis", "gov", "marker", "mint", "slashing", "staking"]
        );
    }

    #[test]
    fn defaults_roundtrip_under_their_own_schema() {
        let state = default_app_state();
        let _: MintGenesis = serde_json::from_value(state[MODULE_MINT].clone()).unwrap();
        let _: StakingGenesis = serde_json::from_value(state[MODULE_STAKING].clone()).unwrap();
        let _: GovGenesis = serde_json::from_value(state[MODULE_GOV].clone()).unwrap();
        let _: SlashingGenesis = serde_json::from_value(state[MODULE_SLASHING].clone()).unwrap();
        let _: CrisisGenesis = serde_json::from_value(state[MODULE_CRISIS].clone()).unwrap();
        let _: MarkerGenesis = serde_json::from_value(state[MODULE_MARKER].clone()).unwrap();
    }

    #[test]
    fn stock_durations_serialize_as_seconds() {
        let state = default_app_state();
        assert_eq!(state[MODULE_SLASHING]["params"]["downtime_jail_duration"], "600s");
        assert_eq!(state[MODULE_STAKING]["params"]["unbonding_time"], "1814400s");
    }
}
