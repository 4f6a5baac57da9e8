use crate::error::*;
use crate::extract::{AuthParams, SCHEME};
use std::fmt;
use std::str::FromStr;

pub const HMAC_SCHEME: &str = "Hmac";

/// Representation of an Hmac `Authorization` header value,
/// `Hmac {appId}:{timestamp}:{nonce}:{signature}:{payloadHash}`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HmacParameters {
    pub scheme: String,
    pub app_id: String,
    pub timestamp: i64,
    pub nonce: String,
    pub signature: String,
    pub payload_hash: String,
}

impl HmacParameters {
    /// Render the full header value, including the scheme.
    ///
    /// The fields themselves cannot contain `:`.
    pub fn to_header_value(&self) -> Result<String> {
        for (name, value) in &[
            ("appId", &self.app_id),
            ("nonce", &self.nonce),
            ("signature", &self.signature),
            ("payloadHash", &self.payload_hash),
        ] {
            if value.contains(':') {
                return Err(Error::InvalidComponent(*name));
            }
        }
        Ok(format!("{} {}", self.scheme, self))
    }

    pub fn parse(params: &AuthParams) -> Result<HmacParameters> {
        let field = |name: &'static str| params.get(name).ok_or(Error::MissingField(name));
        let timestamp = field("timestamp")?;
        Ok(HmacParameters {
            scheme: params
                .get(SCHEME)
                .cloned()
                .unwrap_or_else(|| HMAC_SCHEME.to_string()),
            app_id: field("appId")?.clone(),
            timestamp: timestamp.trim().parse().map_err(|_| {
                Error::HeaderParseError(format!("invalid timestamp {:?}", timestamp))
            })?,
            nonce: field("nonce")?.clone(),
            signature: field("signature")?.clone(),
            payload_hash: field("payloadHash")?.clone(),
        })
    }
}

impl fmt::Display for HmacParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.app_id, self.timestamp, self.nonce, self.signature, self.payload_hash
        )
    }
}

impl FromStr for HmacParameters {
    type Err = Error;
    fn from_str(s: &str) -> Result<HmacParameters> {
        use crate::extract::{DefaultParameterExtractor, ParameterExtractor};
        HmacParameters::parse(&DefaultParameterExtractor.extract(s)?)
    }
}
