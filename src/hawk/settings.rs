use crate::crypto::{self, Crypto, CryptoFactory, DefaultCryptoFactory};
use crate::error::*;
use crate::nonce::{NonceGenerator, RandomNonceGenerator};
use crate::timestamp::{SystemTimestampCalculator, TimestampCalculator};
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_HMAC_ALGORITHM: &str = "HMACSHA256";
pub const DEFAULT_HASH_ALGORITHM: &str = "SHA256";

/// Supplies the `ext` value for an outgoing request.
///
/// This is awaited before the request is signed.
#[async_trait]
pub trait ExtProvider: Send + Sync {
    async fn ext(&self, request: &http::Request<Bytes>, settings: &HawkSettings) -> Option<String>;
}

/// An [`ExtProvider`] that sends the same `ext` with every request.
#[derive(Debug, Clone)]
pub struct StaticExt(pub String);

#[async_trait]
impl ExtProvider for StaticExt {
    async fn ext(&self, _request: &http::Request<Bytes>, _settings: &HawkSettings) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Client settings for Hawk authentication.
///
/// The data fields can be loaded from JSON with [`HawkSettings::from_json`]; the strategy
/// fields always start at their defaults and are replaced in code.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct HawkSettings {
    /// The Hawk credentials id.
    pub auth_id: String,
    /// The shared secret.
    pub auth_key: String,
    pub hmac_algorithm: String,
    pub hash_algorithm: String,
    /// Seconds added to the local clock when timestamping requests.
    pub time_offset: i64,
    pub include_payload_hash: bool,
    pub enable_server_authorization_validation: bool,
    pub enable_server_time_validation: bool,
    /// Optional application id, sent with `dlg`.
    pub app: Option<String>,
    /// Optional delegated-by id.
    pub dlg: Option<String>,

    #[serde(skip)]
    pub crypto_factory: Arc<dyn CryptoFactory>,
    #[serde(skip)]
    pub timestamp_calculator: Arc<dyn TimestampCalculator>,
    #[serde(skip)]
    pub nonce_generator: Arc<dyn NonceGenerator>,
    #[serde(skip)]
    pub ext_provider: Option<Arc<dyn ExtProvider>>,
}

impl HawkSettings {
    pub fn new<S, K>(auth_id: S, auth_key: K) -> Self
    where
        S: Into<String>,
        K: Into<String>,
    {
        HawkSettings {
            auth_id: auth_id.into(),
            auth_key: auth_key.into(),
            ..HawkSettings::default()
        }
    }

    /// Load the data fields from a JSON object, e.g. a section of an application config file.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a fresh [`Crypto`] for the configured algorithms and key.
    pub fn crypto(&self) -> Result<Box<dyn Crypto>> {
        crypto::create_with_str_key(
            self.crypto_factory.as_ref(),
            &self.hmac_algorithm,
            &self.hash_algorithm,
            &self.auth_key,
        )
    }
}

impl Default for HawkSettings {
    fn default() -> Self {
        HawkSettings {
            auth_id: String::new(),
            auth_key: String::new(),
            hmac_algorithm: DEFAULT_HMAC_ALGORITHM.to_string(),
            hash_algorithm: DEFAULT_HASH_ALGORITHM.to_string(),
            time_offset: 0,
            include_payload_hash: true,
            enable_server_authorization_validation: true,
            enable_server_time_validation: true,
            app: None,
            dlg: None,
            crypto_factory: Arc::new(DefaultCryptoFactory),
            timestamp_calculator: Arc::new(SystemTimestampCalculator),
            nonce_generator: Arc::new(RandomNonceGenerator::default()),
            ext_provider: None,
        }
    }
}

impl fmt::Debug for HawkSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HawkSettings")
            .field("auth_id", &self.auth_id)
            .field("auth_key", &"<redacted>")
            .field("hmac_algorithm", &self.hmac_algorithm)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("time_offset", &self.time_offset)
            .field("include_payload_hash", &self.include_payload_hash)
            .field(
                "enable_server_authorization_validation",
                &self.enable_server_authorization_validation,
            )
            .field("enable_server_time_validation", &self.enable_server_time_validation)
            .field("app", &self.app)
            .field("dlg", &self.dlg)
            .field("ext_provider", &self.ext_provider.is_some())
            .finish()
    }
}
