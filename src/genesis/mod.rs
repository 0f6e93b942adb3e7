//! Genesis document construction, merging, and persistence.
//!
//! The application state is a map from module name to that module's genesis
//! state. The map is built from module defaults, reshaped by the override
//! table in [`overrides`], and finally reconciled with any genesis document
//! already on disk before being exported.

pub mod modules;
pub mod overrides;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InitError, Result};
use crate::home;

/// Application state: module name → module genesis state.
///
/// A `BTreeMap` keeps serialization order stable so repeated runs with the
/// same inputs produce byte-identical documents.
pub type ModuleGenesisMap = BTreeMap<String, Value>;

/// Block gas ceiling written into every genesis document.
pub const MAX_GAS: i64 = 60_000_000;

/// Serde adapter for durations stored as `"<seconds>s"` strings.
pub(crate) mod duration_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("{}s", d.as_secs()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(d)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

// ── Consensus parameters ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConsensusParams {
    pub block: BlockParams,
    pub evidence: EvidenceParams,
    pub validator: ValidatorParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlockParams {
    pub max_bytes: i64,
    pub max_gas: i64,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self { max_bytes: 22_020_096, max_gas: -1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EvidenceParams {
    pub max_age_num_blocks: i64,
    #[serde(with = "duration_str")]
    pub max_age_duration: Duration,
    pub max_bytes: i64,
}

impl Default for EvidenceParams {
    fn default() -> Self {
        Self {
            max_age_num_blocks: 100_000,
            max_age_duration: Duration::from_secs(172_800),
            max_bytes: 1_048_576,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidatorParams {
    pub pub_key_types: Vec<String>,
}

impl Default for ValidatorParams {
    fn default() -> Self {
        Self { pub_key_types: vec!["ed25519".into()] }
    }
}

// ── Genesis document ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenesisConsensus {
    pub validators: Vec<Value>,
    pub params: Option<ConsensusParams>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenesisDocument {
    pub chain_id: String,
    pub app_state: ModuleGenesisMap,
    pub consensus: GenesisConsensus,
}

impl GenesisDocument {
    /// Parse the genesis document at `path`. Read failures are IO errors;
    /// an unparsable document is a validation failure.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(InitError::io("failed to read genesis document"))?;
        serde_json::from_str(&raw).map_err(|e| {
            InitError::validation_with(
                format!("failed to read genesis document from {}", path.display()),
                e,
            )
        })
    }
}

/// Produce the final genesis document for `app_state`.
///
/// When a document already exists at `path` it is reused as the base so
/// unrelated fields an operator added survive; whether the caller was
/// allowed to get this far is the orchestrator's overwrite decision, not
/// ours. In both branches the chain id and application state are replaced
/// wholesale, the validator set is forced empty (validators join through a
/// separate ceremony), and the block gas ceiling is pinned.
pub fn merge_genesis(
    app_state: ModuleGenesisMap,
    chain_id: &str,
    path: &Path,
) -> Result<GenesisDocument> {
    let mut doc = if path.exists() {
        GenesisDocument::load(path)?
    } else {
        GenesisDocument::default()
    };

    doc.chain_id = chain_id.to_string();
    doc.app_state = app_state;
    doc.consensus.validators.clear();
    let params = doc.consensus.params.get_or_insert_with(ConsensusParams::default);
    params.block.max_gas = MAX_GAS;

    Ok(doc)
}

/// Write the genesis document as pretty JSON, atomically.
pub fn export_genesis(doc: &GenesisDocument, path: &Path) -> Result<()> {
    home::write_json_pretty(path, doc).map_err(InitError::io("failed to export genesis file"))?;
    tracing::info!(path = %path.display(), chain_id = %doc.chain_id, "genesis file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> ModuleGenesisMap {
        let mut m = ModuleGenesisMap::new();
        m.insert("mint".into(), serde_json::json!({"params": {"mint_denom": "nmer"}}));
        m
    }

    #[test]
    fn merge_without_existing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");

        let doc = merge_genesis(sample_state(), "meridian-chain-aaaaaa", &path).unwrap();
        assert_eq!(doc.chain_id, "meridian-chain-aaaaaa");
        assert!(doc.consensus.validators.is_empty());
        let params = doc.consensus.params.as_ref().unwrap();
        assert_eq!(params.block.max_gas, MAX_GAS);
        assert_eq!(params.block.max_bytes, 22_020_096);
        assert_eq!(params.validator.pub_key_types, vec!["ed25519"]);
    }

    #[test]
    fn merge_reuses_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");

        // Existing document with validators and custom consensus params.
        let existing = serde_json::json!({
            "chain_id": "old-chain",
            "app_state": {"legacy": {}},
            "consensus": {
                "validators": [{"address": "aa", "power": "10"}],
                "params": {
                    "block": {"max_bytes": 7, "max_gas": 5},
                    "evidence": {"max_age_num_blocks": 1, "max_age_duration": "60s", "max_bytes": 2},
                    "validator": {"pub_key_types": ["secp256k1"]}
                }
            }
        });
        std::fs::write(&path, serde_json::to_string(&existing).unwrap()).unwrap();

        let doc = merge_genesis(sample_state(), "new-chain", &path).unwrap();
        assert_eq!(doc.chain_id, "new-chain");
        assert!(doc.app_state.contains_key("mint"));
        assert!(!doc.app_state.contains_key("legacy"));
        // Validators dropped, custom params kept, gas ceiling pinned.
        assert!(doc.consensus.validators.is_empty());
        let params = doc.consensus.params.as_ref().unwrap();
        assert_eq!(params.block.max_bytes, 7);
        assert_eq!(params.block.max_gas, MAX_GAS);
        assert_eq!(params.validator.pub_key_types, vec!["secp256k1"]);
    }

    #[test]
    fn merge_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");

        let first = merge_genesis(sample_state(), "chain-x", &path).unwrap();
        export_genesis(&first, &path).unwrap();
        let second = merge_genesis(sample_state(), "chain-x", &path).unwrap();
        export_genesis(&second, &path).unwrap();
        let third = merge_genesis(sample_state(), "chain-x", &path).unwrap();

        assert_eq!(
            serde_json::to_string(&second).unwrap(),
            serde_json::to_string(&third).unwrap()
        );
    }

    #[test]
    fn malformed_existing_document_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genesis.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = merge_genesis(sample_state(), "chain-x", &path).unwrap_err();
        assert!(matches!(err, InitError::Validation { .. }), "got {err:?}");
    }

    #[test]
    fn duration_str_roundtrip() {
        let params = EvidenceParams::default();
        let raw = serde_json::to_value(&params).unwrap();
        assert_eq!(raw["max_age_duration"], "172800s");
        let back: EvidenceParams = serde_json::from_value(raw).unwrap();
        assert_eq!(back, params);
    }
}
