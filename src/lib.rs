// src/lib.rs

//! An OpenID Connect relying party for the MitID broker.
//!
//! Login requests are sent as signed request objects (JAR) and the code exchange
//! authenticates with `private_key_jwt`. Both JWTs are signed with RS256 using the
//! client's registered RSA key.

pub mod claims;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod response;
pub mod signing;

/// The public prelude for the `mitid-oidc` crate.
///
/// This module re-exports the most commonly used types for convenience.
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::config::{Config, ConfigBuilder};
    pub use crate::discovery::ProviderEndpoints;
    pub use crate::error::MitIdError;
    pub use crate::response::{TokenResponse, UserInfo};
    pub use crate::signing::{SigningKey, SigningKeyConfig};
}
