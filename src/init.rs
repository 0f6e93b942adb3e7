//! The `init` flow: create everything a fresh node needs to start.
//!
//! One call to [`run_init`] walks a fixed sequence (ensure directories,
//! load current configs, check the overwrite guard, resolve identity,
//! build and merge genesis, persist) and stops dead at the first error.
//! There are no retries and no rollback: this runs once before a node's
//! first launch, and files already written before a failure stay written.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use crate::chain::{random_chain_id, ChainConfig, NetworkKind};
use crate::config::{AppConfig, ClientConfig, NodeConfig};
use crate::error::{InitError, Result};
use crate::genesis::{self, modules, overrides};
use crate::home::NodeHome;
use crate::identity::ValidatorIdentity;

/// Everything the `init` command collected from the operator.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub home: PathBuf,
    pub moniker: String,
    pub network: NetworkKind,
    /// Explicit chain id; synthesized when absent.
    pub chain_id: Option<String>,
    /// Recover identity keys interactively from a mnemonic.
    pub recover: bool,
    /// Permit replacing an existing genesis file.
    pub overwrite: bool,
    /// Custom bond/fee denom.
    pub denom: Option<String>,
    /// Explicit consensus commit timeout; network-conditional when absent.
    pub timeout_commit: Option<Duration>,
}

impl InitOptions {
    pub fn new(home: impl Into<PathBuf>, moniker: impl Into<String>, network: NetworkKind) -> Self {
        Self {
            home: home.into(),
            moniker: moniker.into(),
            network,
            chain_id: None,
            recover: false,
            overwrite: false,
            denom: None,
            timeout_commit: None,
        }
    }
}

/// What a successful run tells the operator.
#[derive(Debug)]
pub struct InitOutcome {
    pub chain_id: String,
    pub node_id: String,
    pub genesis_path: PathBuf,
}

/// Initialize genesis, identity, and configuration files under the node
/// home. `input` supplies the mnemonic line when `recover` is set; the
/// binary passes stdin.
pub fn run_init<R: BufRead>(opts: &InitOptions, input: &mut R) -> Result<InitOutcome> {
    if opts.moniker.trim().is_empty() {
        return Err(InitError::usage("no moniker provided"));
    }

    let chain_cfg = ChainConfig::new(opts.network, opts.denom.as_deref());
    let node_home = NodeHome::new(&opts.home);
    node_home
        .ensure()
        .map_err(InitError::io("failed to create node home directories"))?;

    // Current configs; all defaults when the files don't exist yet.
    let mut node_cfg = NodeConfig::load(&node_home.node_config_file())
        .map_err(InitError::io("failed to load node config"))?;
    let mut app_cfg = AppConfig::load(&node_home.app_config_file())
        .map_err(InitError::io("failed to load app config"))?;
    let mut client_cfg = ClientConfig::load(&node_home.client_config_file())
        .map_err(InitError::io("failed to load client config"))?;

    // Stop now if the genesis file already exists and an overwrite wasn't
    // requested. Nothing has been mutated yet.
    let genesis_path = node_home.genesis_file();
    if !opts.overwrite && genesis_path.exists() {
        return Err(InitError::AlreadyExists(genesis_path));
    }

    app_cfg.min_gas_prices = chain_cfg.min_gas_prices().to_string();
    node_cfg.moniker = opts.moniker.clone();

    let chain_id = match opts.chain_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            let id = random_chain_id();
            tracing::info!(chain_id = %id, "generated chain id");
            id
        }
    };
    client_cfg.chain_id = chain_id.clone();

    // Commit-timeout heuristic: an explicit positive value wins; otherwise
    // chains that are neither a mainnet nor a testnet get 1s for fast local
    // iteration, and everything else keeps the built-in default.
    let timeout_commit = opts.timeout_commit.unwrap_or(Duration::ZERO);
    if timeout_commit > Duration::ZERO {
        node_cfg.consensus.timeout_commit_ms = timeout_commit.as_millis() as u64;
    } else if !chain_id.contains("mainnet") && !chain_id.contains("testnet") {
        node_cfg.consensus.timeout_commit_ms = 1_000;
    }

    // Resolve identity. A bad mnemonic fails here, before any file is
    // touched; the key files themselves are written unconditionally.
    let identity = if opts.recover {
        println!("Enter your BIP-39 mnemonic:");
        let mut line = String::new();
        input
            .read_line(&mut line)
            .map_err(InitError::io("failed to read mnemonic"))?;
        ValidatorIdentity::from_mnemonic(&line)?
    } else {
        ValidatorIdentity::generate()
    };
    identity.write_files(&node_home)?;
    let node_id = identity.node_id();
    tracing::info!(node_id = %node_id, "node identity written");

    client_cfg.node = node_cfg.rpc.listen.clone();

    // Build, merge, and export the genesis document.
    let app_state = overrides::build_app_state(modules::default_app_state(), &chain_cfg)?;
    let doc = genesis::merge_genesis(app_state, &chain_id, &genesis_path)?;
    genesis::export_genesis(&doc, &genesis_path)?;

    // Configs go last so they are only written once genesis persistence
    // has succeeded.
    node_cfg
        .save(&node_home.node_config_file())
        .map_err(InitError::io("failed to write node config"))?;
    app_cfg
        .save(&node_home.app_config_file())
        .map_err(InitError::io("failed to write app config"))?;
    client_cfg
        .save(&node_home.client_config_file())
        .map_err(InitError::io("failed to write client config"))?;

    Ok(InitOutcome { chain_id, node_id, genesis_path })
}
