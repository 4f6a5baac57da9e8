use super::context::HawkData;
use crate::crypto::Crypto;

/// The kind of MAC being calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacType {
    Header,
    Response,
}

impl MacType {
    fn tag(self) -> &'static str {
        match self {
            MacType::Header => "header",
            MacType::Response => "response",
        }
    }
}

/// Build the normalized string covered by a header or response MAC.
///
/// Every field is newline-terminated and absent optional fields are written as empty
/// strings. `app` and `dlg` are only appended when `app` is present.
pub fn normalized_string(mac_type: MacType, data: &HawkData) -> String {
    let mut buffer = format!(
        "hawk.1.{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
        mac_type.tag(),
        data.timestamp,
        data.nonce,
        data.method,
        data.resource,
        data.host,
        data.port,
        data.hash.as_deref().unwrap_or(""),
        data.ext.as_deref().unwrap_or(""),
    );

    if let Some(ref app) = data.app {
        buffer.push_str(app);
        buffer.push('\n');
        buffer.push_str(data.dlg.as_deref().unwrap_or(""));
        buffer.push('\n');
    }

    buffer
}

/// Calculate the base64 MAC for a Hawk request header.
pub fn request_mac(crypto: &dyn Crypto, data: &HawkData) -> String {
    crypto.mac_str(&normalized_string(MacType::Header, data))
}

/// Calculate the base64 MAC for a Hawk `Server-Authorization` header.
pub fn response_mac(crypto: &dyn Crypto, data: &HawkData) -> String {
    crypto.mac_str(&normalized_string(MacType::Response, data))
}

/// Calculate the base64 MAC of a timestamp, as sent in `WWW-Authenticate` as `tsm`.
pub fn timestamp_mac(crypto: &dyn Crypto, timestamp: i64) -> String {
    crypto.mac_str(&format!("hawk.1.ts\n{}\n", timestamp))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::{create_with_str_key, DefaultCryptoFactory};
    use pretty_assertions::assert_eq;

    const KEY: &str = "3@uo45er?";

    fn crypto(mac: &str, hash: &str, key: &str) -> Box<dyn Crypto> {
        create_with_str_key(&DefaultCryptoFactory, mac, hash, key).unwrap()
    }

    fn data() -> HawkData {
        HawkData {
            timestamp: 1353832234,
            nonce: "j4h3g2".to_string(),
            method: "GET".to_string(),
            resource: "/WeatherForecast".to_string(),
            host: "localhost".to_string(),
            port: 5001,
            hash: None,
            ext: None,
            app: None,
            dlg: None,
        }
    }

    #[test]
    fn test_normalized_string() {
        assert_eq!(
            normalized_string(MacType::Header, &data()),
            "hawk.1.header\n1353832234\nj4h3g2\nGET\n/WeatherForecast\nlocalhost\n5001\n\n\n"
        );
        let mut d = data();
        d.hash = Some("abc=".to_string());
        d.ext = Some("x".to_string());
        d.app = Some("app1234".to_string());
        assert_eq!(
            normalized_string(MacType::Response, &d),
            "hawk.1.response\n1353832234\nj4h3g2\nGET\n/WeatherForecast\nlocalhost\n5001\nabc=\nx\napp1234\n\n"
        );
    }

    #[test]
    fn test_request_mac() {
        let c = crypto("HMACSHA256", "SHA256", KEY);
        assert_eq!(request_mac(&*c, &data()), "2ukW/LzOaU0+Uapcq6iRCRaI/j322nBtPWpj5DkEYeE=");
    }

    #[test]
    fn test_request_mac_is_deterministic() {
        let c = crypto("HMACSHA256", "SHA256", KEY);
        assert_eq!(request_mac(&*c, &data()), request_mac(&*c, &data()));
        let c2 = crypto("HMACSHA256", "SHA256", KEY);
        assert_eq!(request_mac(&*c, &data()), request_mac(&*c2, &data()));
    }

    #[test]
    fn test_request_mac_other_algorithms() {
        assert_eq!(
            request_mac(&*crypto("HMACSHA1", "SHA1", KEY), &data()),
            "0wgDq6VwSaaeXqey+hZhrtjbaQg="
        );
        assert_eq!(
            request_mac(&*crypto("HMACMD5", "MD5", KEY), &data()),
            "sbzafaAXlR+YUZSNsdQWVg=="
        );
        assert_eq!(
            request_mac(&*crypto("HMACSHA512", "SHA512", KEY), &data()),
            "i2lOYR5ZXDETs+kahgLx3Vm24Wd8AQDzXor7A80W6Gy6zPMdQfLhDQ8ZASzF37WjMwL74F3D5FQ4rTUP5gPz5A=="
        );
    }

    #[test]
    fn test_request_mac_ext_app_dlg() {
        let c = crypto("HMACSHA256", "SHA256", KEY);
        let mut d = data();
        d.ext = Some("specific data".to_string());
        d.app = Some("app1234".to_string());
        d.dlg = Some("dlg1234".to_string());
        assert_eq!(request_mac(&*c, &d), "OfM5VW3qTwdT2hjq94vD1VxS4hVsw06PTVIf5qqd0Vw=");

        // app without dlg still appends an empty dlg line
        d.ext = None;
        d.dlg = None;
        assert_eq!(request_mac(&*c, &d), "uNVVlAbrXkmPnE5J+vz5zhtayQ0mmE9elOijQZDWNDY=");
    }

    #[test]
    fn test_reference_vector() {
        // the example from the Hawk protocol documentation
        let c = crypto(
            "HMACSHA256",
            "SHA256",
            "werxhqb98rpaxn39848xrunpaw3489ruxnpa98w4rxn",
        );
        let d = HawkData {
            timestamp: 1353832234,
            nonce: "j4h3g2".to_string(),
            method: "GET".to_string(),
            resource: "/resource/1?b=1&a=2".to_string(),
            host: "example.com".to_string(),
            port: 8000,
            hash: None,
            ext: Some("some-app-ext-data".to_string()),
            app: None,
            dlg: None,
        };
        assert_eq!(request_mac(&*c, &d), "6R4rV5iE+NPoym+WwjeHzjAGXUtLNIxmo1vpMofpLAE=");
    }

    #[test]
    fn test_response_mac() {
        let c = crypto("HMACSHA256", "SHA256", KEY);
        let d = data().for_response(None, Some("response-ext".to_string()));
        assert_eq!(response_mac(&*c, &d), "YdqYf+gOwfK6UqZnDS7nQulKPRT7X/O8ExlAjjA4NWs=");
        assert_ne!(response_mac(&*c, &d), request_mac(&*c, &d));
    }

    #[test]
    fn test_timestamp_mac() {
        let c = crypto("HMACSHA256", "SHA256", KEY);
        assert_eq!(timestamp_mac(&*c, 1353832234), "3g8uPixNzOpXxdu+0xqa7qqFLXPVjrXVRCXEyXDropA=");
    }
}
