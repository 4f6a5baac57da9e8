//! Verification of Hawk-signed requests on the server side, and the response headers a
//! server sends back: `Server-Authorization` for mutual authentication and the
//! `WWW-Authenticate` timestamp challenge.
use super::context::HawkData;
use super::header::{HawkParameters, ServerAuthorization, TimestampChallenge, HAWK_SCHEME};
use super::mac::{request_mac, response_mac, timestamp_mac};
use super::payload::payload_hash;
use crate::credentials::{Credential, CredentialProvider};
use crate::crypto::{constant_time_eq, Crypto, CryptoFactory, DefaultCryptoFactory};
use crate::error::*;
use crate::extract::{DefaultParameterExtractor, ParameterExtractor, SCHEME};
use crate::replay::{MemoryNonceStore, NonceStore};
use crate::target::RequestTarget;
use crate::timestamp::{SystemTimestampCalculator, TimestampCalculator};
use log::debug;
use std::sync::Arc;

pub const DEFAULT_SKEW: i64 = 60;
pub const STALE_TIMESTAMP: &str = "Stale timestamp";

/// A request that passed verification.
#[derive(Debug, Clone)]
pub struct VerifiedRequest {
    pub credential: Credential,
    pub parameters: HawkParameters,
    /// The context the request's MAC was checked against.
    pub context: HawkData,
}

/// Verifies Hawk `Authorization` headers.
#[derive(Clone)]
pub struct HawkVerifier {
    credentials: Arc<dyn CredentialProvider>,
    nonces: Arc<dyn NonceStore>,
    custom_nonce_store: bool,
    crypto_factory: Arc<dyn CryptoFactory>,
    timestamp_calculator: Arc<dyn TimestampCalculator>,
    extractor: Arc<dyn ParameterExtractor>,
    skew: i64,
    require_payload_hash: bool,
}

impl HawkVerifier {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        HawkVerifier {
            credentials,
            nonces: Arc::new(MemoryNonceStore::new(DEFAULT_SKEW)),
            custom_nonce_store: false,
            crypto_factory: Arc::new(DefaultCryptoFactory),
            timestamp_calculator: Arc::new(SystemTimestampCalculator),
            extractor: Arc::new(DefaultParameterExtractor),
            skew: DEFAULT_SKEW,
            require_payload_hash: false,
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

    pub fn with_extractor(mut self, extractor: Arc<dyn ParameterExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// The allowed difference, in seconds, between the request timestamp and the server clock.
    pub fn with_skew(mut self, skew: i64) -> Self {
        self.skew = skew;
        // the default store keeps nonces for the whole accepted window
        if !self.custom_nonce_store {
            self.nonces = Arc::new(MemoryNonceStore::new(skew));
        }
        self
    }

    /// Reject requests that do not carry a payload hash.
    pub fn require_payload_hash(mut self, require: bool) -> Self {
        self.require_payload_hash = require;
        self
    }

    /// Verify the `Authorization` header of a request for `target` with the given body.
    ///
    /// Rejections are reported as [`Error::Unauthorized`]; a stale timestamp carries the
    /// challenge to send in `WWW-Authenticate`.
    pub async fn verify(
        &self,
        authorization: Option<&str>,
        target: &RequestTarget,
        body: &[u8],
        content_type: Option<&str>,
    ) -> Result<VerifiedRequest> {
        let authorization = authorization.ok_or(Unauthorized::MissingHeader)?;
        let params = self.extractor.extract(authorization)?;
        if !params
            .get(SCHEME)
            .map_or(false, |s| s.eq_ignore_ascii_case(HAWK_SCHEME))
        {
            return Err(Unauthorized::Scheme.into());
        }
        let parameters = HawkParameters::parse(&params)?;

        let credential = self
            .credentials
            .credential(&parameters.id)
            .await
            .ok_or(Unauthorized::UnknownCredentials)?;
        let crypto = credential.crypto(self.crypto_factory.as_ref())?;

        let context = HawkData {
            timestamp: parameters.ts,
            nonce: parameters.nonce.clone(),
            method: target.method.clone(),
            resource: target.resource.clone(),
            host: target.host.clone(),
            port: target.port,
            hash: parameters.hash.clone(),
            ext: parameters.ext.clone(),
            app: parameters.app.clone(),
            dlg: parameters.dlg.clone(),
        };
        let expected = request_mac(crypto.as_ref(), &context);
        if !constant_time_eq(expected.as_bytes(), parameters.mac.as_bytes()) {
            debug!("bad mac for Hawk id {}", parameters.id);
            return Err(Unauthorized::BadMac.into());
        }

        match parameters.hash {
            Some(ref hash) if !hash.is_empty() => {
                let computed = payload_hash(crypto.as_ref(), body, content_type);
                if !constant_time_eq(computed.as_bytes(), hash.as_bytes()) {
                    return Err(Unauthorized::BadPayloadHash.into());
                }
            }
            _ if self.require_payload_hash => return Err(Unauthorized::MissingPayloadHash.into()),
            _ => {}
        }

        let now = self.timestamp_calculator.calculate(0);
        if !self
            .nonces
            .check(&parameters.id, &parameters.nonce, parameters.ts, now)
            .await
        {
            return Err(Unauthorized::ReplayedNonce.into());
        }

        if parameters.ts.saturating_sub(now).saturating_abs() > self.skew {
            debug!(
                "stale timestamp {} for Hawk id {} (now {})",
                parameters.ts, parameters.id, now
            );
            let challenge = timestamp_challenge(crypto.as_ref(), now)?;
            return Err(Unauthorized::StaleTimestamp(challenge).into());
        }

        Ok(VerifiedRequest {
            credential,
            parameters,
            context,
        })
    }

    /// Build the `Server-Authorization` value authenticating a response to `verified`.
    ///
    /// The response payload is only covered when `body` is given.
    pub fn server_authorization(
        &self,
        verified: &VerifiedRequest,
        body: Option<&[u8]>,
        content_type: Option<&str>,
        ext: Option<String>,
    ) -> Result<String> {
        let crypto = verified.credential.crypto(self.crypto_factory.as_ref())?;
        let hash = body.map(|body| payload_hash(crypto.as_ref(), body, content_type));
        let ext = ext.filter(|e| !e.trim().is_empty());
        let ctx = verified.context.for_response(hash.clone(), ext.clone());
        ServerAuthorization {
            mac: response_mac(crypto.as_ref(), &ctx),
            hash,
            ext,
        }
        .to_header_value()
    }
}

fn timestamp_challenge(crypto: &dyn Crypto, now: i64) -> Result<String> {
    TimestampChallenge {
        ts: now,
        tsm: timestamp_mac(crypto, now),
        error: STALE_TIMESTAMP.to_string(),
    }
    .to_header_value()
}
