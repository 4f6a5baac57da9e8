use super::context::HawkData;
use super::header::{HawkParameters, ServerAuthorization, TimestampChallenge, HAWK_SCHEME};
use super::mac::{request_mac, response_mac, timestamp_mac};
use super::payload::payload_hash;
use super::settings::HawkSettings;
use crate::crypto::{constant_time_eq, Crypto};
use crate::error::*;
use crate::extract::{AuthParams, DefaultParameterExtractor, ParameterExtractor};
use crate::monitor::SettingsMonitor;
use crate::target::RequestTarget;
use crate::validate::{ConfigValidator, HawkConfigValidator};
use bytes::Bytes;
use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use http::{HeaderMap, Request, Response, StatusCode};
use log::{debug, warn};
use std::sync::Arc;
use tower::{Service, ServiceExt};

pub const SERVER_AUTHORIZATION: &str = "server-authorization";

/// The outcome of checking a response's `Server-Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// There was nothing to check.
    Skipped,
    Trusted,
    /// The server failed to authenticate itself; the reason is for logging only.
    Untrusted(String),
}

/// What a response says about the server's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAssertion {
    /// No `Server-Authorization` header, or one for another scheme.
    Absent,
    Malformed(String),
    Present(AuthParams),
}

impl ServerAssertion {
    pub fn from_response<B>(response: &Response<B>, extractor: &dyn ParameterExtractor) -> Self {
        let value = match response.headers().get(SERVER_AUTHORIZATION) {
            Some(value) => value,
            None => return ServerAssertion::Absent,
        };
        let value = match value.to_str() {
            Ok(value) => value,
            Err(_) => return ServerAssertion::Malformed("non-ASCII header value".to_string()),
        };
        if !is_hawk(value) {
            return ServerAssertion::Absent;
        }
        match extractor.extract(value) {
            Ok(params) => ServerAssertion::Present(params),
            Err(e) => ServerAssertion::Malformed(e.to_string()),
        }
    }
}

fn is_hawk(value: &str) -> bool {
    value
        .get(..HAWK_SCHEME.len() + 1)
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("hawk "))
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Check the response's `Server-Authorization` header against the request context.
///
/// Only the `mac`, `hash` and `ext` parameters are allowed.
pub fn verify_server_authorization(
    crypto: &dyn Crypto,
    ctx: &HawkData,
    response: &Response<Bytes>,
    extractor: &dyn ParameterExtractor,
) -> Verification {
    let params = match ServerAssertion::from_response(response, extractor) {
        ServerAssertion::Absent => {
            debug!("no Hawk Server-Authorization header");
            return Verification::Skipped;
        }
        ServerAssertion::Malformed(reason) => {
            warn!("ignoring malformed Server-Authorization header: {}", reason);
            return Verification::Skipped;
        }
        ServerAssertion::Present(params) => params,
    };

    if params.len() > 4 {
        return Verification::Untrusted("unexpected Server-Authorization parameters".to_string());
    }
    let auth = match ServerAuthorization::parse(&params) {
        Ok(auth) => auth,
        Err(e) => return Verification::Untrusted(e.to_string()),
    };

    let response_ctx = ctx.for_response(auth.hash.clone(), auth.ext.clone());
    let expected = response_mac(crypto, &response_ctx);
    if !constant_time_eq(expected.as_bytes(), auth.mac.as_bytes()) {
        return Verification::Untrusted("bad response mac".to_string());
    }

    if let Some(hash) = auth.hash {
        let computed = payload_hash(crypto, response.body(), content_type(response.headers()));
        if !constant_time_eq(computed.as_bytes(), hash.as_bytes()) {
            return Verification::Untrusted("bad response payload hash".to_string());
        }
    }

    Verification::Trusted
}

/// Record `verification` on the response, turning an untrusted response into a 401.
pub fn apply_verification(response: &mut Response<Bytes>, verification: Verification) {
    if let Verification::Untrusted(ref reason) = verification {
        warn!("server authentication failed: {}", reason);
        *response.status_mut() = StatusCode::UNAUTHORIZED;
    }
    response.extensions_mut().insert(verification);
}

/// Check the timestamp challenge in a 401's `WWW-Authenticate` header.
///
/// A challenge that cannot be checked is ignored; one whose `tsm` does not match is an error.
pub fn verify_server_time<B>(
    crypto: &dyn Crypto,
    response: &Response<B>,
    extractor: &dyn ParameterExtractor,
) -> Result<()> {
    let value = match response
        .headers()
        .get(WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
    {
        Some(value) if is_hawk(value) => value,
        _ => return Ok(()),
    };
    let params = match extractor.extract(value) {
        Ok(params) => params,
        Err(e) => {
            warn!("ignoring malformed WWW-Authenticate header: {}", e);
            return Ok(());
        }
    };
    // scheme, ts, tsm, error
    if params.len() != 4 {
        return Ok(());
    }
    let challenge = match TimestampChallenge::parse(&params) {
        Ok(challenge) if !challenge.tsm.is_empty() => challenge,
        _ => return Ok(()),
    };

    let expected = timestamp_mac(crypto, challenge.ts);
    if !constant_time_eq(expected.as_bytes(), challenge.tsm.as_bytes()) {
        return Err(Error::TimestampTamper {
            timestamp: challenge.ts,
        });
    }
    debug!("server time {} ({})", challenge.ts, challenge.error);
    Ok(())
}

/// Sign `request` in place with a Hawk `Authorization` header, returning the signed context.
///
/// The context is also stored in the request's extensions.
pub async fn sign_request(
    settings: &HawkSettings,
    crypto: &dyn Crypto,
    request: &mut Request<Bytes>,
) -> Result<HawkData> {
    let target = RequestTarget::from_request(request)?;

    let has_body = !request.body().is_empty() || request.headers().contains_key(CONTENT_TYPE);
    let hash = if has_body && settings.include_payload_hash {
        Some(payload_hash(
            crypto,
            request.body(),
            content_type(request.headers()),
        ))
    } else {
        None
    };

    let timestamp = settings.timestamp_calculator.calculate(settings.time_offset);
    let nonce = settings.nonce_generator.generate(&settings.auth_id);
    let ext = match settings.ext_provider {
        Some(ref provider) => non_blank(provider.ext(request, settings).await),
        None => None,
    };

    let app = non_blank(settings.app.clone());
    let dlg = non_blank(settings.dlg.clone());
    let ctx = HawkData {
        timestamp,
        nonce,
        method: target.method,
        resource: target.resource,
        host: target.host,
        port: target.port,
        hash,
        ext,
        app,
        dlg,
    };

    let params = HawkParameters {
        scheme: HAWK_SCHEME.to_string(),
        id: settings.auth_id.clone(),
        ts: ctx.timestamp,
        nonce: ctx.nonce.clone(),
        mac: request_mac(crypto, &ctx),
        hash: ctx.hash.clone(),
        ext: ctx.ext.clone(),
        app: ctx.app.clone(),
        dlg: ctx.dlg.clone(),
    };
    let value = HeaderValue::from_str(&params.to_header_value()?)?;
    request.headers_mut().insert(AUTHORIZATION, value);
    request.extensions_mut().insert(ctx.clone());

    debug!(
        "signed {} {} for Hawk id {}",
        ctx.method, ctx.resource, settings.auth_id
    );
    Ok(ctx)
}

/// A Hawk client: signs outgoing requests and authenticates the server's responses.
#[derive(Clone)]
pub struct HawkClient {
    settings: SettingsMonitor<HawkSettings>,
    extractor: Arc<dyn ParameterExtractor>,
}

impl HawkClient {
    /// Create a client, rejecting the monitor's current settings if they are invalid.
    pub fn new(settings: SettingsMonitor<HawkSettings>) -> Result<Self> {
        HawkConfigValidator
            .validate(&*settings.current())
            .into_result()?;
        Ok(HawkClient {
            settings,
            extractor: Arc::new(DefaultParameterExtractor),
        })
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ParameterExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn settings(&self) -> &SettingsMonitor<HawkSettings> {
        &self.settings
    }

    /// Install new settings if they validate. Invalid settings are rejected here, so they
    /// never reach a request.
    pub fn reload(&self, settings: HawkSettings) -> Result<()> {
        self.settings.try_update(settings, &HawkConfigValidator)
    }

    /// Sign `request`, send it through `inner` and verify the response.
    ///
    /// The settings are read once, so the whole exchange uses a single snapshot.
    pub async fn send<S>(&self, mut request: Request<Bytes>, inner: S) -> Result<Response<Bytes>>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>>,
        S::Error: Into<BoxError>,
    {
        let settings = self.settings.current();
        let crypto = settings.crypto()?;

        let ctx = sign_request(&settings, crypto.as_ref(), &mut request).await?;

        let mut response = inner
            .oneshot(request)
            .await
            .map_err(|e| Error::Transport(e.into()))?;

        if settings.enable_server_authorization_validation && response.status().is_success() {
            let verification = verify_server_authorization(
                crypto.as_ref(),
                &ctx,
                &response,
                self.extractor.as_ref(),
            );
            apply_verification(&mut response, verification);
        }

        if settings.enable_server_time_validation && response.status() == StatusCode::UNAUTHORIZED {
            verify_server_time(crypto.as_ref(), &response, self.extractor.as_ref())?;
        }

        Ok(response)
    }
}
