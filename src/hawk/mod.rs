//! The Hawk scheme: request MACs over a normalized request string, with optional
//! authentication of the server's responses.
pub mod client;
pub mod context;
pub mod header;
pub mod mac;
pub mod payload;
pub mod server;
pub mod settings;

pub use self::client::{
    apply_verification, sign_request, verify_server_authorization, verify_server_time, HawkClient,
    ServerAssertion, Verification,
};
pub use self::context::HawkData;
pub use self::header::{HawkParameters, ServerAuthorization, TimestampChallenge};
pub use self::server::{HawkVerifier, VerifiedRequest};
pub use self::settings::{ExtProvider, HawkSettings, StaticExt};
