//! Header grammar: splitting an authentication header value into named parameters.
//!
//! Both schemes are parsed into an [`AuthParams`] map that always carries a `scheme` entry.
//! Hawk values are `key="value"` lists; Hmac values are the five colon-separated fields
//! `appId:timestamp:nonce:signature:payloadHash`.
use crate::error::*;
use std::collections::BTreeMap;

/// Named parameters extracted from an authentication header.
pub type AuthParams = BTreeMap<String, String>;

pub const SCHEME: &str = "scheme";

/// The names of the Hmac fields, in wire order.
pub const HMAC_FIELDS: [&str; 5] = ["appId", "timestamp", "nonce", "signature", "payloadHash"];

/// Splits a header value into its parameters.
pub trait ParameterExtractor: Send + Sync {
    fn extract(&self, header_value: &str) -> Result<AuthParams>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParameterExtractor;

impl ParameterExtractor for DefaultParameterExtractor {
    fn extract(&self, header_value: &str) -> Result<AuthParams> {
        let header_value = header_value.trim_start();
        let (scheme, rest) = match header_value.find(char::is_whitespace) {
            Some(i) => (&header_value[..i], &header_value[i..]),
            None => (header_value, ""),
        };
        if scheme.is_empty() {
            return Err(Error::HeaderParseError("missing scheme".to_string()));
        }

        let mut params = if scheme.eq_ignore_ascii_case("hmac") {
            extract_colon_list(rest.trim())?
        } else {
            extract_quoted_list(rest)?
        };
        params.insert(SCHEME.to_string(), scheme.to_string());
        Ok(params)
    }
}

fn extract_colon_list(s: &str) -> Result<AuthParams> {
    let mut params = AuthParams::new();
    if s.is_empty() {
        return Ok(params);
    }
    let values: Vec<&str> = s.split(':').collect();
    if values.len() > HMAC_FIELDS.len() {
        return Err(Error::HeaderParseError("too many fields".to_string()));
    }
    for (name, value) in HMAC_FIELDS.iter().zip(values) {
        params.insert(name.to_string(), value.to_string());
    }
    Ok(params)
}

fn extract_quoted_list(s: &str) -> Result<AuthParams> {
    let mut params = AuthParams::new();
    let mut p = s;

    loop {
        // Skip whitespace and commas used as separators
        p = p.trim_start_matches(|c| c == ',' || char::is_whitespace(c));
        if p.is_empty() {
            break;
        }

        // Find first '=' which delimits attribute name from value
        let assign_end = p
            .find('=')
            .ok_or_else(|| Error::HeaderParseError("expected '='".into()))?;
        let attr = p[..assign_end].trim();
        if attr.is_empty() || attr.contains(|c: char| c == ',' || c == '"' || c.is_whitespace()) {
            return Err(Error::HeaderParseError(format!("invalid attribute {:?}", attr)));
        }
        p = p[assign_end + 1..].trim_start();

        // We have poor RFC 7235 compliance here as we ought to support backslash
        // escaped characters, but hawk doesn't allow this we won't either.  All
        // strings must be surrounded by ".." and contain no such characters.
        if !p.starts_with('"') {
            return Err(Error::HeaderParseError(format!("unquoted value for {}", attr)));
        }
        p = &p[1..];
        let end = p
            .find('"')
            .ok_or_else(|| Error::HeaderParseError("unterminated quoted value".into()))?;
        let value = &p[..end];
        p = &p[end + 1..];

        if attr == SCHEME || params.insert(attr.to_string(), value.to_string()).is_some() {
            return Err(Error::HeaderParseError(format!("duplicate attribute {}", attr)));
        }
    }

    Ok(params)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(s: &str) -> Result<AuthParams> {
        DefaultParameterExtractor.extract(s)
    }

    fn params(pairs: &[(&str, &str)]) -> AuthParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_hawk() {
        assert_eq!(
            extract(
                "Hawk id=\"dh37fgj492je\", ts=\"1353832234\", nonce=\"j4h3g2\", \
                 ext=\"some-app-ext-data\", mac=\"6R4rV5iE+NPoym+WwjeHzjAGXUtLNIxmo1vpMofpLAE=\""
            )
            .unwrap(),
            params(&[
                ("scheme", "Hawk"),
                ("id", "dh37fgj492je"),
                ("ts", "1353832234"),
                ("nonce", "j4h3g2"),
                ("ext", "some-app-ext-data"),
                ("mac", "6R4rV5iE+NPoym+WwjeHzjAGXUtLNIxmo1vpMofpLAE="),
            ])
        );
    }

    #[test]
    fn test_hawk_messy() {
        assert_eq!(
            extract("Hawk , id  =  \"dh37fgj492je\", ts=\"1353832234\"  , , error=\"\"").unwrap(),
            params(&[
                ("scheme", "Hawk"),
                ("id", "dh37fgj492je"),
                ("ts", "1353832234"),
                ("error", ""),
            ])
        );
    }

    #[test]
    fn test_hawk_value_with_separators() {
        assert_eq!(
            extract("Hawk error=\"Stale timestamp, retry\", ts=\"1\"").unwrap(),
            params(&[("scheme", "Hawk"), ("error", "Stale timestamp, retry"), ("ts", "1")])
        );
    }

    #[test]
    fn test_scheme_only() {
        assert_eq!(extract("Hawk").unwrap(), params(&[("scheme", "Hawk")]));
    }

    #[test]
    fn test_hawk_errors() {
        assert!(extract("").is_err());
        assert!(extract("Hawk id").is_err());
        assert!(extract("Hawk id=abc").is_err());
        assert!(extract("Hawk id=\"abc").is_err());
        assert!(extract("Hawk id=\"a\", id=\"b\"").is_err());
        assert!(extract("Hawk scheme=\"Basic\"").is_err());
        assert!(extract("Hawk =\"x\"").is_err());
    }

    #[test]
    fn test_hmac() {
        assert_eq!(
            extract("Hmac id123:1353832234:j4h3g2:c2lnbmF0dXJl:aGFzaA==").unwrap(),
            params(&[
                ("scheme", "Hmac"),
                ("appId", "id123"),
                ("timestamp", "1353832234"),
                ("nonce", "j4h3g2"),
                ("signature", "c2lnbmF0dXJl"),
                ("payloadHash", "aGFzaA=="),
            ])
        );
    }

    #[test]
    fn test_hmac_short() {
        assert_eq!(
            extract("Hmac id123:1353832234").unwrap(),
            params(&[("scheme", "Hmac"), ("appId", "id123"), ("timestamp", "1353832234")])
        );
    }

    #[test]
    fn test_hmac_too_long() {
        assert!(extract("Hmac a:b:c:d:e:f").is_err());
    }
}
