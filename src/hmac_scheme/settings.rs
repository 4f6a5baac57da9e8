use crate::crypto::{self, Crypto, CryptoFactory, DefaultCryptoFactory};
use crate::error::*;
use crate::hawk::settings::{DEFAULT_HASH_ALGORITHM, DEFAULT_HMAC_ALGORITHM};
use crate::nonce::{NonceGenerator, RandomNonceGenerator};
use crate::timestamp::{SystemTimestampCalculator, TimestampCalculator};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Client settings for Hmac authentication.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct HmacSettings {
    pub app_id: String,
    pub app_key: String,
    pub hmac_algorithm: String,
    pub hash_algorithm: String,
    /// Seconds added to the local clock when timestamping requests.
    pub time_offset: i64,

    #[serde(skip)]
    pub crypto_factory: Arc<dyn CryptoFactory>,
    #[serde(skip)]
    pub timestamp_calculator: Arc<dyn TimestampCalculator>,
    #[serde(skip)]
    pub nonce_generator: Arc<dyn NonceGenerator>,
}

impl HmacSettings {
    pub fn new<S, K>(app_id: S, app_key: K) -> Self
    where
        S: Into<String>,
        K: Into<String>,
    {
        HmacSettings {
            app_id: app_id.into(),
            app_key: app_key.into(),
            ..HmacSettings::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn crypto(&self) -> Result<Box<dyn Crypto>> {
        crypto::create_with_str_key(
            self.crypto_factory.as_ref(),
            &self.hmac_algorithm,
            &self.hash_algorithm,
            &self.app_key,
        )
    }
}

impl Default for HmacSettings {
    fn default() -> Self {
        HmacSettings {
            app_id: String::new(),
            app_key: String::new(),
            hmac_algorithm: DEFAULT_HMAC_ALGORITHM.to_string(),
            hash_algorithm: DEFAULT_HASH_ALGORITHM.to_string(),
            time_offset: 0,
            crypto_factory: Arc::new(DefaultCryptoFactory),
            timestamp_calculator: Arc::new(SystemTimestampCalculator),
            nonce_generator: Arc::new(RandomNonceGenerator::default()),
        }
    }
}

impl fmt::Debug for HmacSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HmacSettings")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("hmac_algorithm", &self.hmac_algorithm)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("time_offset", &self.time_offset)
            .finish()
    }
}
