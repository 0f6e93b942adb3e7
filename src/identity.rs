//! Validator identity material.
//!
//! A node carries two keypairs: the node key that identifies it on the
//! network, and the validator signing key used for consensus signatures.
//! Both come from fresh entropy or, on a recovery run, deterministically
//! from a BIP-39 mnemonic. Key files are rewritten unconditionally: the
//! genesis overwrite flag does not apply to them, since a recovery run
//! must be able to restore keys next to an existing genesis.

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::ed25519::Ed25519Keypair;
use crate::crypto::mnemonic;
use crate::error::{InitError, Result};
use crate::home::{self, NodeHome};

/// The node's keypairs for one init run.
#[derive(Debug)]
pub struct ValidatorIdentity {
    node_key: Ed25519Keypair,
    signing_key: Ed25519Keypair,
}

/// On-disk form of `node_key.json`.
#[derive(Debug, Serialize, Deserialize)]
struct NodeKeyFile {
    id: String,
    priv_key: String,
}

/// On-disk form of `priv_validator_key.json`.
#[derive(Debug, Serialize, Deserialize)]
struct ValidatorKeyFile {
    address: String,
    pub_key: String,
    priv_key: String,
}

/// On-disk form of `priv_validator_state.json`. A fresh identity starts
/// from a zeroed signing state so it cannot double-sign against leftovers.
#[derive(Debug, Serialize, Deserialize)]
struct ValidatorStateFile {
    height: String,
    round: u32,
    step: u32,
}

impl Default for ValidatorStateFile {
    fn default() -> Self {
        Self { height: "0".into(), round: 0, step: 0 }
    }
}

/// Hex of the first 20 bytes of blake3 over a public key.
fn key_address(pubkey: &[u8; 32]) -> String {
    hex::encode(&blake3::hash(pubkey).as_bytes()[..20])
}

impl ValidatorIdentity {
    /// Generate both keys from OS entropy.
    pub fn generate() -> Self {
        Self {
            node_key: Ed25519Keypair::generate(),
            signing_key: Ed25519Keypair::generate(),
        }
    }

    /// Derive both keys from a BIP-39 mnemonic: the 64-byte seed yields the
    /// signing key from its first half and the node key from its second.
    /// Fails without touching disk when the phrase is malformed.
    pub fn from_mnemonic(phrase: &str) -> Result<Self> {
        let mut seed = mnemonic::seed_from_phrase(phrase)
            .map_err(|e| InitError::validation_with("invalid mnemonic", e))?;

        let mut signing_seed = [0u8; 32];
        let mut node_seed = [0u8; 32];
        signing_seed.copy_from_slice(&seed[..32]);
        node_seed.copy_from_slice(&seed[32..]);

        let identity = Self {
            node_key: Ed25519Keypair::from_seed(node_seed),
            signing_key: Ed25519Keypair::from_seed(signing_seed),
        };

        seed.zeroize();
        signing_seed.zeroize();
        node_seed.zeroize();

        Ok(identity)
    }

    /// The node's public identifier, shown to the operator and used by
    /// peers to address this node.
    pub fn node_id(&self) -> String {
        key_address(&self.node_key.public_key())
    }

    /// Write `node_key.json`, `priv_validator_key.json`, and a zeroed
    /// `priv_validator_state.json`, replacing whatever was there.
    pub fn write_files(&self, node_home: &NodeHome) -> Result<()> {
        let node_key_path = node_home.node_key_file();
        let node_file = NodeKeyFile {
            id: self.node_id(),
            priv_key: B64.encode(self.node_key.to_bytes()),
        };
        home::write_json_pretty(&node_key_path, &node_file)
            .map_err(InitError::io("failed to write node key file"))?;
        home::restrict_key_file(&node_key_path);

        let validator_key_path = node_home.validator_key_file();
        let pubkey = self.signing_key.public_key();
        let validator_file = ValidatorKeyFile {
            address: key_address(&pubkey),
            pub_key: B64.encode(pubkey),
            priv_key: B64.encode(self.signing_key.to_bytes()),
        };
        home::write_json_pretty(&validator_key_path, &validator_file)
            .map_err(InitError::io("failed to write validator key file"))?;
        home::restrict_key_file(&validator_key_path);

        home::write_json_pretty(&node_home.validator_state_file(), &ValidatorStateFile::default())
            .map_err(InitError::io("failed to write validator state file"))?;

        tracing::debug!(node_id = %self.node_id(), "identity files written");
        Ok(())
    }
}
