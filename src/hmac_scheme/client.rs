use super::header::{HmacParameters, HMAC_SCHEME};
use super::settings::HmacSettings;
use super::signature::{payload_hash, signature, HmacData};
use crate::crypto::Crypto;
use crate::error::*;
use crate::monitor::SettingsMonitor;
use crate::target::RequestTarget;
use crate::validate::{ConfigValidator, HmacConfigValidator};
use bytes::Bytes;
use http::header::{HeaderValue, AUTHORIZATION};
use http::{Request, Response};
use log::debug;
use tower::{Service, ServiceExt};

/// Sign `request` in place with an Hmac `Authorization` header.
pub fn sign_request(
    settings: &HmacSettings,
    crypto: &dyn Crypto,
    request: &mut Request<Bytes>,
) -> Result<HmacData> {
    let data = HmacData {
        app_id: settings.app_id.clone(),
        timestamp: settings.timestamp_calculator.calculate(settings.time_offset),
        nonce: settings.nonce_generator.generate(&settings.app_id),
        target: RequestTarget::from_request(request)?,
        payload_hash: payload_hash(crypto, request.body()),
    };
    let params = HmacParameters {
        scheme: HMAC_SCHEME.to_string(),
        app_id: data.app_id.clone(),
        timestamp: data.timestamp,
        nonce: data.nonce.clone(),
        signature: signature(crypto, &data),
        payload_hash: data.payload_hash.clone(),
    };
    let value = HeaderValue::from_str(&params.to_header_value()?)?;
    request.headers_mut().insert(AUTHORIZATION, value);

    debug!(
        "signed {} {} for Hmac app {}",
        data.target.method, data.target.resource, data.app_id
    );
    Ok(data)
}

/// An Hmac client. The scheme does not authenticate responses, so they are returned as is.
#[derive(Clone)]
pub struct HmacClient {
    settings: SettingsMonitor<HmacSettings>,
}

impl HmacClient {
    pub fn new(settings: SettingsMonitor<HmacSettings>) -> Result<Self> {
        HmacConfigValidator
            .validate(&*settings.current())
            .into_result()?;
        Ok(HmacClient { settings })
    }

    pub fn settings(&self) -> &SettingsMonitor<HmacSettings> {
        &self.settings
    }

    /// Install new settings if they validate.
    pub fn reload(&self, settings: HmacSettings) -> Result<()> {
        self.settings.try_update(settings, &HmacConfigValidator)
    }

    pub async fn send<S>(&self, mut request: Request<Bytes>, inner: S) -> Result<Response<Bytes>>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>>,
        S::Error: Into<BoxError>,
    {
        let settings = self.settings.current();
        let crypto = settings.crypto()?;
        sign_request(&settings, crypto.as_ref(), &mut request)?;
        inner
            .oneshot(request)
            .await
            .map_err(|e| Error::Transport(e.into()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nonce::FixedNonceGenerator;
    use crate::timestamp::FixedTimestampCalculator;
    use http::header::CONTENT_TYPE;
    use std::sync::Arc;

    fn settings() -> HmacSettings {
        let mut settings = HmacSettings::new("id123", "3@uo45er?");
        settings.timestamp_calculator = Arc::new(FixedTimestampCalculator(1353832234));
        settings.nonce_generator = Arc::new(FixedNonceGenerator("j4h3g2".to_string()));
        settings
    }

    fn sign(mut request: Request<Bytes>) -> Request<Bytes> {
        let settings = settings();
        let crypto = settings.crypto().unwrap();
        sign_request(&settings, crypto.as_ref(), &mut request).unwrap();
        request
    }

    #[test]
    fn test_sign_get() {
        let request = sign(
            Request::get("https://localhost:5001/WeatherForecast")
                .body(Bytes::new())
                .unwrap(),
        );
        assert_eq!(
            request.headers()[AUTHORIZATION],
            "Hmac id123:1353832234:j4h3g2:XhZvpTsnQawRLiN/fBjU+ykUG3hP8ox+FWj4Ho4QTN0=:\
             47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn test_sign_post() {
        let request = sign(
            Request::post("https://localhost:5001/WeatherForecast")
                .header(CONTENT_TYPE, "application/json")
                .body(Bytes::from_static(br#"{"name":"walk dog","isComplete":true}"#))
                .unwrap(),
        );
        assert_eq!(
            request.headers()[AUTHORIZATION],
            "Hmac id123:1353832234:j4h3g2:x8Hqg93vM5zIKz15tV3bLEZPltNj0L4woIqxDVcLgEY=:\
             mbDjQx7iJ4XKcGmZfnBB+iVydtIbVvcVLgbVEk34BsE="
        );
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let monitor = SettingsMonitor::new(HmacSettings::new(" ", "key"));
        match HmacClient::new(monitor) {
            Err(Error::InvalidSettings(msg)) => assert!(msg.contains("app_id")),
            _ => panic!("expected InvalidSettings"),
        }
    }

    #[test]
    fn test_reload_rejects_invalid_settings() {
        let client = HmacClient::new(SettingsMonitor::new(settings())).unwrap();
        let mut invalid = settings();
        invalid.hash_algorithm = " ".to_string();
        assert!(client.reload(invalid).is_err());
        assert_eq!(client.settings().current().hash_algorithm, "SHA256");
    }
}
