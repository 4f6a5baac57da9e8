/// The values covered by a Hawk MAC for one request/response exchange.
///
/// A `HawkData` is built once per request and not modified afterwards. Validating the
/// server's response uses a second value derived with [`HawkData::for_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HawkData {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    pub nonce: String,
    /// Uppercase HTTP method.
    pub method: String,
    /// Request path and query.
    pub resource: String,
    pub host: String,
    pub port: u16,
    /// Base64 payload hash.
    pub hash: Option<String>,
    pub ext: Option<String>,
    pub app: Option<String>,
    pub dlg: Option<String>,
}

impl HawkData {
    /// Derive the context for validating (or producing) a `Server-Authorization` header: the
    /// request fields are reused, while `hash` and `ext` are replaced by the response's values.
    pub fn for_response(&self, hash: Option<String>, ext: Option<String>) -> HawkData {
        HawkData {
            hash,
            ext,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_for_response() {
        let request = HawkData {
            timestamp: 1353832234,
            nonce: "j4h3g2".to_string(),
            method: "GET".to_string(),
            resource: "/WeatherForecast".to_string(),
            host: "localhost".to_string(),
            port: 5001,
            hash: Some("req-hash".to_string()),
            ext: Some("req-ext".to_string()),
            app: Some("app".to_string()),
            dlg: None,
        };
        let response = request.for_response(None, Some("resp-ext".to_string()));
        assert_eq!(response.hash, None);
        assert_eq!(response.ext.as_deref(), Some("resp-ext"));
        assert_eq!(response.nonce, request.nonce);
        assert_eq!(response.app, request.app);
        // the request context is untouched
        assert_eq!(request.hash.as_deref(), Some("req-hash"));
    }
}
