//! Typed Hawk header values: the request `Authorization` header, the `Server-Authorization`
//! response header and the `WWW-Authenticate` timestamp challenge.
//!
//! The `Display` implementations render the parameter list without the scheme; use the
//! `to_header_value` methods to get a complete header value.
use crate::error::*;
use crate::extract::{AuthParams, SCHEME};
use std::fmt;
use std::str::FromStr;

pub const HAWK_SCHEME: &str = "Hawk";

/// Check a header component for validity.
fn check_component(name: &'static str, value: &str) -> Result<()> {
    if value.contains('"') {
        return Err(Error::InvalidComponent(name));
    }
    Ok(())
}

fn check_optional(name: &'static str, value: &Option<String>) -> Result<()> {
    match value {
        Some(value) => check_component(name, value),
        None => Ok(()),
    }
}

/// The value of an optional parameter, if it is worth sending.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn required<'a>(params: &'a AuthParams, name: &'static str) -> Result<&'a String> {
    params.get(name).ok_or(Error::MissingField(name))
}

fn parse_timestamp(value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::HeaderParseError(format!("invalid timestamp {:?}", value)))
}

/// Representation of a Hawk `Authorization` header value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HawkParameters {
    pub scheme: String,
    pub id: String,
    pub ts: i64,
    pub nonce: String,
    pub mac: String,
    pub hash: Option<String>,
    pub ext: Option<String>,
    pub app: Option<String>,
    pub dlg: Option<String>,
}

impl HawkParameters {
    /// None of the header components can contain the character `"`.
    pub fn validate(&self) -> Result<()> {
        check_component("id", &self.id)?;
        check_component("nonce", &self.nonce)?;
        check_component("mac", &self.mac)?;
        check_optional("hash", &self.hash)?;
        check_optional("ext", &self.ext)?;
        check_optional("app", &self.app)?;
        check_optional("dlg", &self.dlg)
    }

    /// Render the full `Authorization` header value, e.g. `Hawk id="..", ..`.
    pub fn to_header_value(&self) -> Result<String> {
        self.validate()?;
        Ok(format!("{} {}", self.scheme, self))
    }

    /// Build the parameters from an extracted header.
    pub fn parse(params: &AuthParams) -> Result<HawkParameters> {
        Ok(HawkParameters {
            scheme: params
                .get(SCHEME)
                .cloned()
                .unwrap_or_else(|| HAWK_SCHEME.to_string()),
            id: required(params, "id")?.clone(),
            ts: parse_timestamp(required(params, "ts")?)?,
            nonce: required(params, "nonce")?.clone(),
            mac: required(params, "mac")?.clone(),
            hash: params.get("hash").cloned(),
            ext: params.get("ext").cloned(),
            app: params.get("app").cloned(),
            dlg: params.get("dlg").cloned(),
        })
    }
}

impl fmt::Display for HawkParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "id=\"{}\", ts=\"{}\", nonce=\"{}\"", self.id, self.ts, self.nonce)?;
        if let Some(hash) = non_blank(&self.hash) {
            write!(f, ", hash=\"{}\"", hash)?;
        }
        if let Some(ext) = non_blank(&self.ext) {
            write!(f, ", ext=\"{}\"", ext)?;
        }
        write!(f, ", mac=\"{}\"", self.mac)?;
        if let Some(app) = non_blank(&self.app) {
            write!(
                f,
                ", app=\"{}\", dlg=\"{}\"",
                app,
                self.dlg.as_deref().unwrap_or("")
            )?;
        }
        Ok(())
    }
}

impl FromStr for HawkParameters {
    type Err = Error;
    fn from_str(s: &str) -> Result<HawkParameters> {
        use crate::extract::{DefaultParameterExtractor, ParameterExtractor};
        HawkParameters::parse(&DefaultParameterExtractor.extract(s)?)
    }
}

/// Representation of a Hawk `Server-Authorization` header value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ServerAuthorization {
    pub mac: String,
    pub hash: Option<String>,
    pub ext: Option<String>,
}

impl ServerAuthorization {
    pub fn to_header_value(&self) -> Result<String> {
        check_component("mac", &self.mac)?;
        check_optional("hash", &self.hash)?;
        check_optional("ext", &self.ext)?;
        Ok(format!("{} {}", HAWK_SCHEME, self))
    }

    pub fn parse(params: &AuthParams) -> Result<ServerAuthorization> {
        Ok(ServerAuthorization {
            mac: required(params, "mac")?.clone(),
            hash: params.get("hash").cloned(),
            ext: params.get("ext").cloned(),
        })
    }
}

impl fmt::Display for ServerAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "mac=\"{}\"", self.mac)?;
        if let Some(hash) = non_blank(&self.hash) {
            write!(f, ", hash=\"{}\"", hash)?;
        }
        if let Some(ext) = non_blank(&self.ext) {
            write!(f, ", ext=\"{}\"", ext)?;
        }
        Ok(())
    }
}

/// Representation of the `WWW-Authenticate` challenge a Hawk server sends with a 401, which
/// lets the client resynchronise its clock.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TimestampChallenge {
    /// The server's current time.
    pub ts: i64,
    /// MAC of `ts`, see [`timestamp_mac`](super::mac::timestamp_mac).
    pub tsm: String,
    pub error: String,
}

impl TimestampChallenge {
    pub fn to_header_value(&self) -> Result<String> {
        check_component("tsm", &self.tsm)?;
        check_component("error", &self.error)?;
        Ok(format!("{} {}", HAWK_SCHEME, self))
    }

    /// A missing `error` is read as empty.
    pub fn parse(params: &AuthParams) -> Result<TimestampChallenge> {
        Ok(TimestampChallenge {
            ts: parse_timestamp(required(params, "ts")?)?,
            tsm: required(params, "tsm")?.clone(),
            error: params.get("error").cloned().unwrap_or_default(),
        })
    }
}

impl fmt::Display for TimestampChallenge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ts=\"{}\", tsm=\"{}\", error=\"{}\"",
            self.ts, self.tsm, self.error
        )
    }
}
