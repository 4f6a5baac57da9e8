//! This crate provides request signing for HTTP clients using the Hawk and Hmac
//! authentication schemes, along with matching server-side verifiers.
//!
//! Clients sign each request with a MAC over a normalized description of the request and, for
//! Hawk, can authenticate the server's responses in turn. The client side is usually used as
//! `tower` middleware ([`HawkLayer`], [`HmacLayer`]) around an HTTP transport service.
//!
//! # Examples
//!
//! ## Hawk Client
//!
//! ```
//! use bytes::Bytes;
//! use futures::executor::block_on;
//! use mac_auth::hawk::{self, HawkSettings};
//!
//! // provide the Hawk id and key
//! let settings = HawkSettings::new("id123", "3@uo45er?");
//! let crypto = settings.crypto()?;
//!
//! let mut request = http::Request::get("https://localhost:5001/WeatherForecast")
//!     .body(Bytes::new())
//!     .unwrap();
//! let ctx = block_on(hawk::sign_request(&settings, crypto.as_ref(), &mut request))?;
//!
//! let header = request.headers()["authorization"].to_str().unwrap();
//! assert!(header.starts_with("Hawk id=\"id123\""));
//! assert!(header.contains(&format!("nonce=\"{}\"", ctx.nonce)));
//! # Ok::<(), mac_auth::Error>(())
//! ```
//!
//! ## Hawk Server
//!
//! ```
//! use futures::executor::block_on;
//! use mac_auth::credentials::{Credential, MemoryCredentialProvider};
//! use mac_auth::{hawk::HawkVerifier, Error, RequestTarget};
//! use std::sync::Arc;
//!
//! let credentials: MemoryCredentialProvider =
//!     vec![Credential::new("id123", "3@uo45er?")].into_iter().collect();
//! let verifier = HawkVerifier::new(Arc::new(credentials));
//!
//! let target = RequestTarget::new("GET", "/WeatherForecast", "localhost", 5001);
//! let header = "Hawk id=\"id123\", ts=\"1353832234\", nonce=\"j4h3g2\", \
//!               mac=\"2ukW/LzOaU0+Uapcq6iRCRaI/j322nBtPWpj5DkEYeE=\"";
//! // the MAC is correct, but the request is years old
//! match block_on(verifier.verify(Some(header), &target, b"", None)) {
//!     Err(Error::Unauthorized(reason)) => println!("WWW-Authenticate: {}", reason.challenge("Hawk")),
//!     _ => unreachable!(),
//! }
//! ```

mod b64;
pub mod credentials;
pub mod crypto;
mod error;
pub mod extract;
pub mod hawk;
pub mod hmac_scheme;
pub mod layer;
pub mod monitor;
pub mod nonce;
pub mod replay;
pub mod target;
pub mod timestamp;
pub mod validate;

pub use crate::error::*;
pub use crate::hawk::{HawkClient, HawkSettings};
pub use crate::hmac_scheme::{HmacClient, HmacSettings};
pub use crate::layer::{AuthLayer, AuthService, Authenticate, HawkLayer, HmacLayer};
pub use crate::monitor::SettingsMonitor;
pub use crate::target::RequestTarget;
pub use crate::validate::{ConfigValidator, ValidationResult};
