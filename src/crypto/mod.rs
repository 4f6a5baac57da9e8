//! `mac-auth` performs all of its cryptography through the [`Crypto`] trait, built per
//! operation by a [`CryptoFactory`]. The factory is a strategy stored in the settings, so an
//! application can substitute its own primitives (an HSM, a FIPS module, ...) without touching
//! the protocol code.
//!
//! The default factory, [`DefaultCryptoFactory`], uses `ring` for the SHA family and the
//! RustCrypto `md-5` crate for MD5, which `ring` does not provide.
use crate::b64;
use crate::error::*;
use std::fmt;
use std::str::FromStr;

mod legacy;
mod ring;

/// The digest algorithms supported for both hashing and HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Parse a MAC algorithm name such as `HMACSHA256`.
    pub fn from_mac_name(name: &str) -> Result<DigestAlgorithm> {
        let name = name.trim();
        match (name.get(..4), name.get(4..)) {
            (Some(prefix), Some(rest)) if prefix.eq_ignore_ascii_case("hmac") && !rest.is_empty() => {
                DigestAlgorithm::from_str(rest)
                    .map_err(|_| Error::UnsupportedAlgorithm(name.to_string()))
            }
            _ => Err(Error::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// The canonical hash algorithm name, e.g. `SHA256`.
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA1",
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha384 => "SHA384",
            DigestAlgorithm::Sha512 => "SHA512",
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;
    fn from_str(s: &str) -> Result<DigestAlgorithm> {
        let s = s.trim();
        [
            DigestAlgorithm::Md5,
            DigestAlgorithm::Sha1,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
        ]
        .iter()
        .copied()
        .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s))
        .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A keyed-hash and plain-hash pair bound to one key.
///
/// Instances are request-scoped: create one per signing or verification operation and drop it
/// afterwards.
pub trait Crypto: Send + Sync {
    /// Hash `data` with the hash algorithm.
    fn hash(&self, data: &[u8]) -> Vec<u8>;

    /// MAC `data` with the MAC algorithm and key.
    fn mac(&self, data: &[u8]) -> Vec<u8>;

    /// Hash the UTF-8 bytes of `input` and base64-encode the result.
    fn hash_str(&self, input: &str) -> String {
        b64::encode(self.hash(input.as_bytes()))
    }

    /// MAC the UTF-8 bytes of `input` and base64-encode the result.
    fn mac_str(&self, input: &str) -> String {
        b64::encode(self.mac(input.as_bytes()))
    }
}

/// Builds [`Crypto`] instances from algorithm names and key bytes.
pub trait CryptoFactory: Send + Sync {
    fn create(
        &self,
        mac_algorithm: &str,
        hash_algorithm: &str,
        key: &[u8],
    ) -> Result<Box<dyn Crypto>>;
}

/// Create a [`Crypto`] from a string key, as stored in settings and credentials.
///
/// The key must not be blank.
pub fn create_with_str_key(
    factory: &dyn CryptoFactory,
    mac_algorithm: &str,
    hash_algorithm: &str,
    key: &str,
) -> Result<Box<dyn Crypto>> {
    if key.trim().is_empty() {
        return Err(Error::InvalidKey);
    }
    factory.create(mac_algorithm, hash_algorithm, key.as_bytes())
}

/// Compare two byte strings in time independent of where they differ.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    ::ring::constant_time::verify_slices_are_equal(a, b).is_ok()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCryptoFactory;

impl CryptoFactory for DefaultCryptoFactory {
    fn create(
        &self,
        mac_algorithm: &str,
        hash_algorithm: &str,
        key: &[u8],
    ) -> Result<Box<dyn Crypto>> {
        let mac_algorithm = DigestAlgorithm::from_mac_name(mac_algorithm)?;
        let hash_algorithm = DigestAlgorithm::from_str(hash_algorithm)?;
        Ok(Box::new(DefaultCrypto::new(mac_algorithm, hash_algorithm, key)))
    }
}

enum MacKey {
    Ring(::ring::hmac::Key),
    Md5(Vec<u8>),
}

/// The default [`Crypto`] implementation.
pub struct DefaultCrypto {
    mac_key: MacKey,
    hash_algorithm: DigestAlgorithm,
}

impl DefaultCrypto {
    pub fn new(mac_algorithm: DigestAlgorithm, hash_algorithm: DigestAlgorithm, key: &[u8]) -> Self {
        let mac_key = match ring::hmac_algorithm(mac_algorithm) {
            Some(algorithm) => MacKey::Ring(::ring::hmac::Key::new(algorithm, key)),
            None => MacKey::Md5(key.to_vec()),
        };
        DefaultCrypto {
            mac_key,
            hash_algorithm,
        }
    }
}

impl Crypto for DefaultCrypto {
    fn hash(&self, data: &[u8]) -> Vec<u8> {
        match ring::digest_algorithm(self.hash_algorithm) {
            Some(algorithm) => ring::digest_bytes(algorithm, data),
            None => legacy::md5(data),
        }
    }

    fn mac(&self, data: &[u8]) -> Vec<u8> {
        match self.mac_key {
            MacKey::Ring(ref key) => ring::sign(key, data),
            MacKey::Md5(ref key) => legacy::hmac_md5(key, data),
        }
    }
}
