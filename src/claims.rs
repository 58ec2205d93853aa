// src/claims.rs

//! Claim sets for the two kinds of JWT this client signs.
//!
//! The request object and the client assertion are deliberately separate types
//! with separate constructors; they share nothing except the validity window.

use serde::Serialize;

/// Lifetime of both the request object and the client assertion, in seconds.
pub const TOKEN_LIFETIME_SECS: u64 = 15 * 60;

/// `response_type` of every authorization request this client starts.
pub const RESPONSE_TYPE_CODE: &str = "code";

/// Claims of a JWT-Secured Authorization Request (request object).
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct AuthorizationRequestClaims<'a> {
    pub client_id: &'a str,
    pub redirect_uri: &'a str,
    pub response_type: &'a str,
    pub scope: &'a str,
    /// The provider's issuer identifier.
    pub aud: &'a str,
    /// Our own client id.
    pub iss: &'a str,
    pub iat: u64,
    pub exp: u64,
    pub nbf: u64,
}

impl<'a> AuthorizationRequestClaims<'a> {
    /// Builds the request object claims for a login starting at `now` (seconds since the epoch).
    ///
    /// `redirect_uri` and `scope` are taken verbatim.
    pub fn new(
        client_id: &'a str,
        issuer: &'a str,
        redirect_uri: &'a str,
        scope: &'a str,
        now: u64,
    ) -> Self {
        Self {
            client_id,
            redirect_uri,
            response_type: RESPONSE_TYPE_CODE,
            scope,
            aud: issuer,
            iss: client_id,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
            nbf: now,
        }
    }
}

/// Claims of a `private_key_jwt` client assertion (RFC 7523).
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ClientAssertionClaims<'a> {
    /// Unique per assertion; the provider rejects a replayed `jti`.
    pub jti: String,
    pub sub: &'a str,
    pub iat: u64,
    pub nbf: u64,
    pub exp: u64,
    pub iss: &'a str,
    /// The token endpoint the assertion is presented to.
    pub aud: &'a str,
}

impl<'a> ClientAssertionClaims<'a> {
    /// Builds the assertion claims. `jti` must come from a cryptographically
    /// strong random source.
    pub fn new(client_id: &'a str, token_endpoint: &'a str, jti: String, now: u64) -> Self {
        Self {
            jti,
            sub: client_id,
            iat: now,
            nbf: now,
            exp: now + TOKEN_LIFETIME_SECS,
            iss: client_id,
            aud: token_endpoint,
        }
    }
}
