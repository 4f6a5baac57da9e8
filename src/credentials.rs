use crate::crypto::{create_with_str_key, Crypto, CryptoFactory};
use crate::error::*;
use crate::hawk::settings::{DEFAULT_HASH_ALGORITHM, DEFAULT_HMAC_ALGORITHM};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::iter::FromIterator;

/// A shared secret known to a verifying server, with the algorithms it is used with.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: String,
    pub key: String,
    pub mac_algorithm: String,
    pub hash_algorithm: String,
}

impl Credential {
    /// A credential using `HMACSHA256` and `SHA256`.
    pub fn new<S, K>(id: S, key: K) -> Self
    where
        S: Into<String>,
        K: Into<String>,
    {
        Credential {
            id: id.into(),
            key: key.into(),
            mac_algorithm: DEFAULT_HMAC_ALGORITHM.to_string(),
            hash_algorithm: DEFAULT_HASH_ALGORITHM.to_string(),
        }
    }

    pub fn with_algorithms<M, H>(mut self, mac_algorithm: M, hash_algorithm: H) -> Self
    where
        M: Into<String>,
        H: Into<String>,
    {
        self.mac_algorithm = mac_algorithm.into();
        self.hash_algorithm = hash_algorithm.into();
        self
    }

    pub fn crypto(&self, factory: &dyn CryptoFactory) -> Result<Box<dyn Crypto>> {
        create_with_str_key(factory, &self.mac_algorithm, &self.hash_algorithm, &self.key)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .field("mac_algorithm", &self.mac_algorithm)
            .field("hash_algorithm", &self.hash_algorithm)
            .finish()
    }
}

/// Looks up credentials by id for the server-side verifiers.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn credential(&self, id: &str) -> Option<Credential>;
}

/// An in-memory [`CredentialProvider`].
#[derive(Debug, Default)]
pub struct MemoryCredentialProvider {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl MemoryCredentialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a credential.
    pub fn insert(&self, credential: Credential) {
        self.credentials
            .write()
            .insert(credential.id.clone(), credential);
    }

    pub fn remove(&self, id: &str) -> Option<Credential> {
        self.credentials.write().remove(id)
    }
}

impl FromIterator<Credential> for MemoryCredentialProvider {
    fn from_iter<I: IntoIterator<Item = Credential>>(iter: I) -> Self {
        MemoryCredentialProvider {
            credentials: RwLock::new(iter.into_iter().map(|c| (c.id.clone(), c)).collect()),
        }
    }
}

#[async_trait]
impl CredentialProvider for MemoryCredentialProvider {
    async fn credential(&self, id: &str) -> Option<Credential> {
        self.credentials.read().get(id).cloned()
    }
}
