//! Node home directory layout and file helpers.
//!
//! Everything the daemon writes lives under one root:
//!
//! ```text
//! <home>/config/   config.toml, app.toml, client.toml,
//!                  node_key.json, priv_validator_key.json, genesis.json
//! <home>/data/     priv_validator_state.json
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct NodeHome {
    root: PathBuf,
}

impl NodeHome {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    /// Create the config and data directories if they do not exist.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(self.config_dir())?;
        fs::create_dir_all(self.data_dir())
    }

    pub fn node_config_file(&self) -> PathBuf {
        self.config_dir().join("config.toml")
    }

    pub fn app_config_file(&self) -> PathBuf {
        self.config_dir().join("app.toml")
    }

    pub fn client_config_file(&self) -> PathBuf {
        self.config_dir().join("client.toml")
    }

    pub fn genesis_file(&self) -> PathBuf {
        self.config_dir().join("genesis.json")
    }

    pub fn node_key_file(&self) -> PathBuf {
        self.config_dir().join("node_key.json")
    }

    pub fn validator_key_file(&self) -> PathBuf {
        self.config_dir().join("priv_validator_key.json")
    }

    pub fn validator_state_file(&self) -> PathBuf {
        self.data_dir().join("priv_validator_state.json")
    }
}

/// Serialize `value` as pretty JSON and write it atomically (write to a
/// `.tmp` sibling, then rename), so a crash mid-write never leaves a
/// truncated file behind.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("json encode: {e}")))?;
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    fs::write(&tmp, out)?;
    fs::rename(&tmp, path)
}

/// Restrict a key file to owner read/write on unix. Best-effort elsewhere.
pub fn restrict_key_file(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    #[cfg(not(unix))]
    let _ = path;
}
