//! TOML configuration file support for the meridian daemon.
//!
//! Three files live in `<home>/config/`:
//!
//! - `config.toml` — node-level settings ([`NodeConfig`])
//! - `app.toml`    — application settings ([`AppConfig`])
//! - `client.toml` — client tooling settings ([`ClientConfig`])
//!
//! Loading a file that does not exist yields defaults, so a fresh `init`
//! run starts from the same place as an operator who deleted a config.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

fn load_toml<T: DeserializeOwned + Default>(path: &Path) -> io::Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let s = fs::read_to_string(path)?;
    toml::from_str(&s).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("{} parse: {e}", path.display()))
    })
}

fn save_toml<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let out = toml::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("toml encode: {e}")))?;
    fs::write(path, out)
}

// ── Node configuration (config.toml) ──────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NodeConfig {
    /// Human-readable name for this node.
    pub moniker: String,
    pub log_level: String,
    pub consensus: ConsensusSection,
    pub p2p: P2pSection,
    pub rpc: RpcSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusSection {
    /// How long to wait after committing a block before starting on the
    /// next height, in milliseconds.
    pub timeout_commit_ms: u64,
    pub create_empty_blocks: bool,
}

impl Default for ConsensusSection {
    fn default() -> Self {
        Self {
            timeout_commit_ms: 5_000,
            create_empty_blocks: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct P2pSection {
    pub listen: String,
    pub persistent_peers: Vec<String>,
}

impl Default for P2pSection {
    fn default() -> Self {
        Self {
            listen: "tcp://0.0.0.0:26656".into(),
            persistent_peers: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcSection {
    pub listen: String,
}

impl Default for RpcSection {
    fn default() -> Self {
        Self { listen: "tcp://127.0.0.1:26657".into() }
    }
}

impl NodeConfig {
    pub fn load(path: &Path) -> io::Result<Self> {
        let mut cfg: Self = load_toml(path)?;
        if cfg.log_level.is_empty() {
            cfg.log_level = "info".into();
        }
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        save_toml(path, self)
    }
}

// ── Application configuration (app.toml) ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Minimum gas price this node accepts, e.g. `1905nmer`.
    pub min_gas_prices: String,
    /// Height at which to halt; 0 disables.
    pub halt_height: u64,
    pub api: ApiSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            min_gas_prices: String::new(),
            halt_height: 0,
            api: ApiSection::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub enable: bool,
    pub listen: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            enable: false,
            listen: "tcp://127.0.0.1:1317".into(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> io::Result<Self> {
        load_toml(path)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        save_toml(path, self)
    }
}

// ── Client configuration (client.toml) ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub chain_id: String,
    /// RPC endpoint client tooling talks to.
    pub node: String,
    pub output: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chain_id: String::new(),
            node: "tcp://127.0.0.1:26657".into(),
            output: "json".into(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> io::Result<Self> {
        load_toml(path)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        save_toml(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = NodeConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg.consensus.timeout_commit_ms, 5_000);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.moniker.is_empty());
    }

    #[test]
    fn node_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = NodeConfig::load(&path).unwrap();
        cfg.moniker = "node1".into();
        cfg.consensus.timeout_commit_ms = 1_000;
        cfg.save(&path).unwrap();

        let reloaded = NodeConfig::load(&path).unwrap();
        assert_eq!(reloaded.moniker, "node1");
        assert_eq!(reloaded.consensus.timeout_commit_ms, 1_000);
        assert_eq!(reloaded.rpc.listen, "tcp://127.0.0.1:26657");
    }

    #[test]
    fn app_and_client_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let mut app = AppConfig::default();
        app.min_gas_prices = "1905nmer".into();
        app.save(&dir.path().join("app.toml")).unwrap();
        let app2 = AppConfig::load(&dir.path().join("app.toml")).unwrap();
        assert_eq!(app2.min_gas_prices, "1905nmer");

        let mut client = ClientConfig::default();
        client.chain_id = "meridian-chain-abc123".into();
        client.save(&dir.path().join("client.toml")).unwrap();
        let client2 = ClientConfig::load(&dir.path().join("client.toml")).unwrap();
        assert_eq!(client2.chain_id, "meridian-chain-abc123");
        assert_eq!(client2.output, "json");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not [valid toml").unwrap();
        assert!(NodeConfig::load(&path).is_err());
    }
}
