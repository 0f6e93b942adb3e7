//! Cryptographic building blocks for node identity.

pub mod ed25519;
pub mod mnemonic;
