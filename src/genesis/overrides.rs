//! Deterministic genesis parameter overrides.
//!
//! Modules ship development-friendly defaults; a real network replaces a
//! fixed set of them before the first start. Each replacement is an
//! [`OverrideRule`] that decodes the module state under its own schema,
//! mutates the typed fields, and re-encodes. Byte-level patching is never
//! used. The rules are registered in a table so adding one never touches
//! the orchestration code.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::chain::ChainConfig;
use crate::error::{InitError, Result};

use super::modules::{
    Coin, CrisisGenesis, GovGenesis, MarkerGenesis, MintGenesis, SlashingGenesis, StakingGenesis,
    MODULE_CRISIS, MODULE_GOV, MODULE_MARKER, MODULE_MINT, MODULE_SLASHING, MODULE_STAKING,
};
use super::ModuleGenesisMap;

/// Blocks per year assuming 5-second blocks: (86400 / 5) * 365.25.
pub const BLOCKS_PER_YEAR: u64 = 6_311_520;

/// Validator-set cap written for every network profile.
pub const MAX_VALIDATORS: u32 = 100;

/// Denom pattern enforced on real networks. Deliberately tighter than the
/// stock module default, which has to keep accepting short development
/// denoms like `stake`.
pub const UNRESTRICTED_DENOM_REGEX: &str = r"[a-zA-Z][a-zA-Z0-9\-\.]{7,83}";

const MIN_DEPOSIT_MAINNET: u64 = 1_000_000_000_000;
const MIN_DEPOSIT_TESTNET: u64 = 10_000_000;

const DOWNTIME_JAIL_MAINNET: &str = "86400s"; // 1 day
const DOWNTIME_JAIL_TESTNET: &str = "600s"; // 10 minutes

/// Parse one of the built-in duration literals above. These are fixed
/// strings, so a failure means the literal itself is wrong: panic rather
/// than surfacing it as a runtime error.
fn builtin_duration(lit: &str) -> Duration {
    humantime::parse_duration(lit).expect("built-in duration literal must parse")
}

/// One deterministic rewrite of a single module's genesis state.
pub struct OverrideRule {
    pub module: &'static str,
    pub apply: fn(Value, &ChainConfig) -> Result<Value>,
}

/// The registered override table, in application order.
pub fn override_rules() -> Vec<OverrideRule> {
    vec![
        OverrideRule { module: MODULE_MINT, apply: override_mint },
        OverrideRule { module: MODULE_STAKING, apply: override_staking },
        OverrideRule { module: MODULE_CRISIS, apply: override_crisis },
        OverrideRule { module: MODULE_GOV, apply: override_gov },
        OverrideRule { module: MODULE_SLASHING, apply: override_slashing },
        OverrideRule { module: MODULE_MARKER, apply: override_marker },
    ]
}

/// Apply every registered override to `defaults`, producing the application
/// state for the selected network profile.
pub fn build_app_state(defaults: ModuleGenesisMap, cfg: &ChainConfig) -> Result<ModuleGenesisMap> {
    tracing::info!(profile = cfg.network().name(), "applying network profile defaults");
    let mut state = defaults;
    for rule in override_rules() {
        let current = state.remove(rule.module).ok_or_else(|| {
            InitError::validation(format!("module {} is not registered in the default genesis", rule.module))
        })?;
        let updated = (rule.apply)(current, cfg)?;
        state.insert(rule.module.to_string(), updated);
    }
    Ok(state)
}

fn decode<T: DeserializeOwned>(module: &str, raw: Value) -> Result<T> {
    serde_json::from_value(raw)
        .map_err(|e| InitError::validation_with(format!("malformed {module} genesis state"), e))
}

fn encode<T: Serialize>(state: &T) -> Value {
    serde_json::to_value(state).expect("module genesis state serializes")
}

// ── Per-module rules ──────────────────────────────────────────────────────

fn override_mint(raw: Value, cfg: &ChainConfig) -> Result<Value> {
    let mut state: MintGenesis = decode(MODULE_MINT, raw)?;
    state.minter.inflation = "0".into();
    state.minter.annual_provisions = "1".into();
    state.params.mint_denom = cfg.bond_denom().into();
    state.params.inflation_max = "0".into();
    state.params.inflation_min = "0".into();
    state.params.inflation_rate_change = "1".into();
    state.params.goal_bonded = "1".into();
    state.params.blocks_per_year = BLOCKS_PER_YEAR;
    Ok(encode(&state))
}

fn override_staking(raw: Value, cfg: &ChainConfig) -> Result<Value> {
    let mut state: StakingGenesis = decode(MODULE_STAKING, raw)?;
    state.params.bond_denom = cfg.bond_denom().into();
    state.params.max_validators = MAX_VALIDATORS;
    Ok(encode(&state))
}

fn override_crisis(raw: Value, cfg: &ChainConfig) -> Result<Value> {
    let mut state: CrisisGenesis = decode(MODULE_CRISIS, raw)?;
    state.constant_fee.denom = cfg.fee_denom().into();
    Ok(encode(&state))
}

fn override_gov(raw: Value, cfg: &ChainConfig) -> Result<Value> {
    let min_deposit = if cfg.network().is_testnet() {
        MIN_DEPOSIT_TESTNET
    } else {
        MIN_DEPOSIT_MAINNET
    };
    let mut state: GovGenesis = decode(MODULE_GOV, raw)?;
    state.params.min_deposit = vec![Coin::new(cfg.bond_denom(), min_deposit)];
    Ok(encode(&state))
}

fn override_slashing(raw: Value, cfg: &ChainConfig) -> Result<Value> {
    let lit = if cfg.network().is_testnet() {
        DOWNTIME_JAIL_TESTNET
    } else {
        DOWNTIME_JAIL_MAINNET
    };
    let mut state: SlashingGenesis = decode(MODULE_SLASHING, raw)?;
    state.params.downtime_jail_duration = builtin_duration(lit);
    Ok(encode(&state))
}

fn override_marker(raw: Value, _cfg: &ChainConfig) -> Result<Value> {
    let mut state: MarkerGenesis = decode(MODULE_MARKER, raw)?;
    state.params.unrestricted_denom_regex = UNRESTRICTED_DENOM_REGEX.into();
    Ok(encode(&state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::NetworkKind;
    use crate::genesis::modules::default_app_state;

    fn built(network: NetworkKind) -> ModuleGenesisMap {
        let cfg = ChainConfig::new(network, None);
        build_app_state(default_app_state(), &cfg).unwrap()
    }

    #[test]
    fn mint_overrides_apply() {
        let state = built(NetworkKind::Mainnet);
        let mint: MintGenesis = serde_json::from_value(state[MODULE_MINT].clone()).unwrap();
        assert_eq!(mint.minter.inflation, "0");
        assert_eq!(mint.minter.annual_provisions, "1");
        assert_eq!(mint.params.inflation_max, "0");
        assert_eq!(mint.params.inflation_min, "0");
        assert_eq!(mint.params.inflation_rate_change, "1");
        assert_eq!(mint.params.goal_bonded, "1");
        assert_eq!(mint.params.blocks_per_year, 6_311_520);
        assert_eq!(mint.params.mint_denom, "nmer");
    }

    #[test]
    fn staking_overrides_apply() {
        let state = built(NetworkKind::Mainnet);
        let staking: StakingGenesis =
            serde_json::from_value(state[MODULE_STAKING].clone()).unwrap();
        assert_eq!(staking.params.bond_denom, "nmer");
        assert_eq!(staking.params.max_validators, 100);
    }

    #[test]
    fn crisis_fee_denom_applied() {
        let cfg = ChainConfig::new(NetworkKind::Mainnet, Some("ufoo"));
        let state = build_app_state(default_app_state(), &cfg).unwrap();
        let crisis: CrisisGenesis = serde_json::from_value(state[MODULE_CRISIS].clone()).unwrap();
        assert_eq!(crisis.constant_fee.denom, "ufoo");
    }

    #[test]
    fn gov_min_deposit_by_profile() {
        let mainnet = built(NetworkKind::Mainnet);
        let gov: GovGenesis = serde_json::from_value(mainnet[MODULE_GOV].clone()).unwrap();
        assert_eq!(gov.params.min_deposit, vec![Coin::new("nmer", 1_000_000_000_000)]);

        let testnet = built(NetworkKind::Testnet);
        let gov: GovGenesis = serde_json::from_value(testnet[MODULE_GOV].clone()).unwrap();
        assert_eq!(gov.params.min_deposit, vec![Coin::new("nmer", 10_000_000)]);
    }

    #[test]
    fn slashing_downtime_by_profile() {
        let mainnet = built(NetworkKind::Mainnet);
        assert_eq!(mainnet[MODULE_SLASHING]["params"]["downtime_jail_duration"], "86400s");

        let testnet = built(NetworkKind::Testnet);
        assert_eq!(testnet[MODULE_SLASHING]["params"]["downtime_jail_duration"], "600s");
    }

    #[test]
    fn marker_regex_same_for_both_profiles() {
        for network in [NetworkKind::Mainnet, NetworkKind::Testnet] {
            let state = built(network);
            assert_eq!(
                state[MODULE_MARKER]["params"]["unrestricted_denom_regex"],
                r"[a-zA-Z][a-zA-Z0-9\-\.]{7,83}"
            );
        }
    }

    #[test]
    fn untouched_modules_survive() {
        let state = built(NetworkKind::Mainnet);
        assert!(state.contains_key("auth"));
        assert!(state.contains_key("bank"));
        assert_eq!(state.len(), default_app_state().len());
    }

    #[test]
    fn missing_module_is_an_error() {
        let cfg = ChainConfig::new(NetworkKind::Mainnet, None);
        let mut defaults = default_app_state();
        defaults.remove(MODULE_GOV);
        let err = build_app_state(defaults, &cfg).unwrap_err();
        assert!(matches!(err, InitError::Validation { .. }));
    }

    #[test]
    fn undecodable_module_is_an_error() {
        let cfg = ChainConfig::new(NetworkKind::Mainnet, None);
        let mut defaults = default_app_state();
        defaults.insert(MODULE_MINT.into(), serde_json::json!({"minter": 42}));
        let err = build_app_state(defaults, &cfg).unwrap_err();
        assert!(matches!(err, InitError::Validation { .. }));
    }

    #[test]
    fn build_is_deterministic() {
        let a = built(NetworkKind::Mainnet);
        let b = built(NetworkKind::Mainnet);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
