use crate::b64;
use rand::RngCore;

/// Produces the nonce placed in each signed request.
///
/// Nonces must be unique per identifier within the replay window the server enforces.
pub trait NonceGenerator: Send + Sync {
    fn generate(&self, id: &str) -> String;
}

/// Generates base64-encoded random nonces from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomNonceGenerator {
    bytes: usize,
}

impl RandomNonceGenerator {
    /// Create a generator producing nonces with `bytes` bytes of entropy.  The string is
    /// base64-encoded, so it will be longer than `bytes` characters.
    pub fn new(bytes: usize) -> Self {
        RandomNonceGenerator { bytes }
    }
}

impl Default for RandomNonceGenerator {
    fn default() -> Self {
        RandomNonceGenerator::new(12)
    }
}

impl NonceGenerator for RandomNonceGenerator {
    fn generate(&self, _id: &str) -> String {
        let mut bytes = vec![0u8; self.bytes];
        rand::thread_rng().fill_bytes(&mut bytes);
        b64::encode(bytes)
    }
}

/// Always returns the same nonce. Only useful for tests and reproducible signatures.
#[derive(Debug, Clone)]
pub struct FixedNonceGenerator(pub String);

impl NonceGenerator for FixedNonceGenerator {
    fn generate(&self, _id: &str) -> String {
        self.0.clone()
    }
}
