// src/error.rs

use reqwest::StatusCode;
use thiserror::Error;

/// The primary error type for the `mitid-oidc` library.
#[derive(Debug, Error)]
pub enum MitIdError {
    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A required configuration field is missing.
    #[error("A required configuration field is missing: {0}")]
    MissingConfiguration(String),

    /// The RSA private key could not be read or parsed.
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// The provider's discovery document was unreachable or malformed.
    /// A client is never constructed when this occurs.
    #[error("OpenID configuration discovery failed: {0}")]
    Discovery(String),

    /// Signing a request object or client assertion failed.
    #[error("JWT signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// A network-level failure on the token or userinfo call.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success status or a body that is not a JSON object.
    #[error("Token exchange failed with status {status}: {body}")]
    TokenExchange { status: StatusCode, body: String },

    /// The userinfo endpoint answered with a non-success status or a body that is not a JSON object.
    #[error("Userinfo request failed with status {status}: {body}")]
    UserInfo { status: StatusCode, body: String },
}
