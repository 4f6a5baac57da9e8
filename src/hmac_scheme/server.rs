use super::header::{HmacParameters, HMAC_SCHEME};
use super::signature::{payload_hash, signature, HmacData};
use crate::credentials::{Credential, CredentialProvider};
use crate::crypto::{constant_time_eq, CryptoFactory, DefaultCryptoFactory};
use crate::error::*;
use crate::extract::{DefaultParameterExtractor, ParameterExtractor, SCHEME};
use crate::replay::{MemoryNonceStore, NonceStore};
use crate::target::RequestTarget;
use crate::timestamp::{SystemTimestampCalculator, TimestampCalculator};
use log::debug;
use std::sync::Arc;

pub const DEFAULT_SKEW: i64 = 60;

/// Verifies Hmac `Authorization` headers.
#[derive(Clone)]
pub struct HmacVerifier {
    credentials: Arc<dyn CredentialProvider>,
    nonces: Arc<dyn NonceStore>,
    custom_nonce_store: bool,
    crypto_factory: Arc<dyn CryptoFactory>,
    timestamp_calculator: Arc<dyn TimestampCalculator>,
    extractor: Arc<dyn ParameterExtractor>,
    skew: i64,
}

impl HmacVerifier {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        HmacVerifier {
            credentials,
            nonces: Arc::new(MemoryNonceStore::new(DEFAULT_SKEW)),
            custom_nonce_store: false,
            crypto_factory: Arc::new(DefaultCryptoFactory),
            timestamp_calculator: Arc::new(SystemTimestampCalculator),
            extractor: Arc::new(DefaultParameterExtractor),
            skew: DEFAULT_SKEW,
        }
    }

    pub fn with_nonce_store(mut self, nonces: Arc<dyn NonceStore>) -> Self {
        self.nonces = nonces;
        self.custom_nonce_store = true;
        self
    }

    pub fn with_crypto_factory(mut self, crypto_factory: Arc<dyn CryptoFactory>) -> Self {
        self.crypto_factory = crypto_factory;
        self
    }

    pub fn with_timestamp_calculator(mut self, calculator: Arc<dyn TimestampCalculator>) -> Self {
        self.timestamp_calculator = calculator;
        self
    }

    pub fn with_skew(mut self, skew: i64) -> Self {
        self.skew = skew;
        // the default store keeps nonces for the whole accepted window
        if !self.custom_nonce_store {
            self.nonces = Arc::new(MemoryNonceStore::new(skew));
        }
        self
    }

    /// Verify an Hmac `Authorization` header for `target` and `body`, returning the matching
    /// credential.
    pub async fn verify(
        &self,
        authorization: Option<&str>,
        target: &RequestTarget,
        body: &[u8],
    ) -> Result<Credential> {
        let authorization = authorization.ok_or(Unauthorized::MissingHeader)?;
        let params = self.extractor.extract(authorization)?;
        if !params
            .get(SCHEME)
            .map_or(false, |s| s.eq_ignore_ascii_case(HMAC_SCHEME))
        {
            return Err(Unauthorized::Scheme.into());
        }
        let params = HmacParameters::parse(&params)?;

        let credential = self
            .credentials
            .credential(&params.app_id)
            .await
            .ok_or(Unauthorized::UnknownCredentials)?;
        let crypto = credential.crypto(self.crypto_factory.as_ref())?;

        let computed = payload_hash(crypto.as_ref(), body);
        if !constant_time_eq(computed.as_bytes(), params.payload_hash.as_bytes()) {
            return Err(Unauthorized::BadPayloadHash.into());
        }

        let data = HmacData {
            app_id: params.app_id.clone(),
            timestamp: params.timestamp,
            nonce: params.nonce.clone(),
            target: target.clone(),
            payload_hash: computed,
        };
        let expected = signature(crypto.as_ref(), &data);
        if !constant_time_eq(expected.as_bytes(), params.signature.as_bytes()) {
            debug!("bad signature for Hmac app {}", params.app_id);
            return Err(Unauthorized::BadMac.into());
        }

        let now = self.timestamp_calculator.calculate(0);
        if !self
            .nonces
            .check(&params.app_id, &params.nonce, params.timestamp, now)
            .await
        {
            return Err(Unauthorized::ReplayedNonce.into());
        }
        if params.timestamp.saturating_sub(now).saturating_abs() > self.skew {
            return Err(Unauthorized::StaleTimestamp(format!(
                "{} error=\"Stale timestamp\"",
                HMAC_SCHEME
            ))
            .into());
        }

        Ok(credential)
    }
}
