//! The Hmac scheme: `Authorization: Hmac {appId}:{timestamp}:{nonce}:{signature}:{payloadHash}`.
pub mod client;
pub mod header;
pub mod server;
pub mod settings;
pub mod signature;

pub use self::client::HmacClient;
pub use self::header::HmacParameters;
pub use self::server::HmacVerifier;
pub use self::settings::HmacSettings;
pub use self::signature::HmacData;
