//! BIP-39 recovery phrase handling.
//!
//! A phrase carries its own checksum, so parsing doubles as validation:
//! a phrase that parses is a phrase we can derive keys from.

use bip39::Mnemonic;

/// Validate a space-separated BIP-39 phrase and derive its 64-byte seed
/// (empty passphrase). Fails on unknown words, bad word counts, and
/// checksum mismatches without touching anything on disk.
pub fn seed_from_phrase(phrase: &str) -> Result<[u8; 64], bip39::Error> {
    // Interactive input arrives with arbitrary surrounding whitespace.
    let normalized = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    let mnemonic = Mnemonic::parse_normalized(&normalized)?;
    Ok(mnemonic.to_seed(""))
}
