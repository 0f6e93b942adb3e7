//! Error types for node initialization.
//!
//! Every fallible step of the init flow funnels into [`InitError`]. The
//! variants mirror how the operator experiences a failure: bad command
//! input, bad supplied data, a refusal to clobber an existing genesis, or
//! a filesystem problem. Broken built-in constants are a panic, not an
//! `InitError`; there is nothing an operator can do about those.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can terminate an `init` run.
#[derive(Debug, Error)]
pub enum InitError {
    /// Bad command input (empty moniker, unusable flag value). Nothing has
    /// been touched on disk when this is returned.
    #[error("{0}")]
    Usage(String),

    /// Supplied or pre-existing data failed validation: an invalid mnemonic
    /// checksum, a malformed genesis document, or an undecodable module
    /// genesis state.
    #[error("{context}")]
    Validation {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    /// The genesis file is already present and `--overwrite` was not given.
    #[error("genesis file already exists: {0}")]
    AlreadyExists(PathBuf),

    /// A filesystem read or write failed; `context` names the operation.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl InitError {
    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub(crate) fn validation(context: impl Into<String>) -> Self {
        Self::Validation { context: context.into(), source: None }
    }

    pub(crate) fn validation_with(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Validation { context: context.into(), source: Some(Box::new(source)) }
    }

    /// Adapter for `map_err` on `io::Result`s.
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(io::Error) -> Self {
        let context = context.into();
        move |source| Self::Io { context, source }
    }
}

pub type Result<T> = std::result::Result<T, InitError>;
