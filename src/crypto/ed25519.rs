use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

/// An ed25519 keypair held by its 32-byte seed.
#[derive(Clone)]
pub struct Ed25519Keypair {
    sk: SigningKey,
}

impl Ed25519Keypair {
    /// Generate a keypair from OS entropy.
    pub fn generate() -> Self {
        let mut rng = OsRng;
        let sk = SigningKey::generate(&mut rng);
        Self { sk }
    }

    pub fn from_seed(seed32: [u8; 32]) -> Self {
        let sk = SigningKey::from_bytes(&seed32);
        Self { sk }
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.sk.verifying_key().to_bytes()
    }

    /// The raw 32-byte seed (secret key material).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.sk.to_bytes()
    }
}

impl std::fmt::Debug for Ed25519Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Keypair({})", hex::encode(self.public_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let a = Ed25519Keypair::from_seed(seed);
        let b = Ed25519Keypair::from_seed(seed);
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.to_bytes(), seed);
    }

    #[test]
    fn generated_keys_differ() {
        let a = Ed25519Keypair::generate();
        let b = Ed25519Keypair::generate();
        assert_ne!(a.public_key(), b.public_key());
    }
}
