use failure::Fail;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error type carried through from the inner transport service.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Fail, Debug)]
pub enum Error {
    #[fail(display = "Unsupported algorithm: {}", _0)]
    UnsupportedAlgorithm(String),

    #[fail(display = "A non-blank key is required")]
    InvalidKey,

    #[fail(display = "Unparseable authentication header: {}", _0)]
    HeaderParseError(String),

    #[fail(display = "Missing `{}` attribute in authentication header", _0)]
    MissingField(&'static str),

    #[fail(display = "Header component `{}` cannot contain `\"`", _0)]
    InvalidComponent(&'static str),

    #[fail(display = "Request has no resolvable target uri")]
    MissingRequestUri,

    #[fail(display = "Invalid server timestamp hash (ts={})", timestamp)]
    TimestampTamper { timestamp: i64 },

    #[fail(display = "Invalid settings: {}", _0)]
    InvalidSettings(String),

    #[fail(display = "{}", _0)]
    Unauthorized(#[fail(cause)] Unauthorized),

    #[fail(display = "Could not load settings: {}", _0)]
    Config(#[fail(cause)] serde_json::Error),

    #[fail(display = "Invalid header value: {}", _0)]
    InvalidHeaderValue(#[fail(cause)] http::header::InvalidHeaderValue),

    #[fail(display = "Transport error: {}", _0)]
    Transport(BoxError),
}

/// Reasons a server-side verifier rejects a request.
#[derive(Fail, Debug, PartialEq, Clone)]
pub enum Unauthorized {
    #[fail(display = "Missing authentication header")]
    MissingHeader,
    #[fail(display = "Unsupported authentication scheme")]
    Scheme,
    #[fail(display = "Unknown credentials")]
    UnknownCredentials,
    #[fail(display = "Bad mac")]
    BadMac,
    #[fail(display = "Missing required payload hash")]
    MissingPayloadHash,
    #[fail(display = "Bad payload hash")]
    BadPayloadHash,
    #[fail(display = "Invalid nonce")]
    ReplayedNonce,
    /// The value carries the `WWW-Authenticate` challenge the server should send back.
    #[fail(display = "Stale timestamp")]
    StaleTimestamp(String),
}

impl Unauthorized {
    /// The `WWW-Authenticate` value to send along with a 401 for this rejection.
    pub fn challenge(&self, scheme: &str) -> String {
        match self {
            Unauthorized::StaleTimestamp(challenge) => challenge.clone(),
            other => format!("{} error=\"{}\"", scheme, other),
        }
    }
}

impl From<Unauthorized> for Error {
    fn from(e: Unauthorized) -> Self {
        Error::Unauthorized(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e)
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(e: http::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue(e)
    }
}
