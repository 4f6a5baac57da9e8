use crate::error::*;
use http::Request;

/// The parts of a request that both schemes sign: method, path and query, host and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// Uppercase HTTP method.
    pub method: String,
    pub resource: String,
    pub host: String,
    pub port: u16,
}

impl RequestTarget {
    pub fn new<M, R, H>(method: M, resource: R, host: H, port: u16) -> Self
    where
        M: Into<String>,
        R: Into<String>,
        H: Into<String>,
    {
        RequestTarget {
            method: method.into().to_ascii_uppercase(),
            resource: resource.into(),
            host: host.into(),
            port,
        }
    }

    /// Resolve the target from an absolute request URI.
    ///
    /// Without an explicit port, `https` defaults to 443 and anything else to 80.
    pub fn from_request<B>(request: &Request<B>) -> Result<RequestTarget> {
        let uri = request.uri();
        let host = uri.host().ok_or(Error::MissingRequestUri)?;
        let port = match uri.port_u16() {
            Some(port) => port,
            None if uri.scheme_str() == Some("https") => 443,
            None => 80,
        };
        let resource = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        Ok(RequestTarget::new(request.method().as_str(), resource, host, port))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn target(uri: &str) -> Result<RequestTarget> {
        RequestTarget::from_request(&Request::get(uri).body(()).unwrap())
    }

    #[test]
    fn test_explicit_port() {
        assert_eq!(
            target("https://localhost:5001/WeatherForecast").unwrap(),
            RequestTarget::new("GET", "/WeatherForecast", "localhost", 5001)
        );
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(target("https://example.com/").unwrap().port, 443);
        assert_eq!(target("http://example.com/").unwrap().port, 80);
    }

    #[test]
    fn test_query_kept_verbatim() {
        assert_eq!(
            target("http://example.com:8000/resource/1?b=1&a=2").unwrap().resource,
            "/resource/1?b=1&a=2"
        );
        assert_eq!(target("http://example.com").unwrap().resource, "/");
    }

    #[test]
    fn test_method_uppercase() {
        let request = Request::builder()
            .method("PATCH")
            .uri("http://example.com/")
            .body(())
            .unwrap();
        assert_eq!(RequestTarget::from_request(&request).unwrap().method, "PATCH");
        assert_eq!(RequestTarget::new("post", "/", "h", 1).method, "POST");
    }

    #[test]
    fn test_relative_uri() {
        match target("/WeatherForecast") {
            Err(Error::MissingRequestUri) => {}
            other => panic!("expected MissingRequestUri, got {:?}", other),
        }
    }
}
