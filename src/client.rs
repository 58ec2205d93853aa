// src/client.rs

use crate::claims::{AuthorizationRequestClaims, ClientAssertionClaims};
use crate::config::Config;
use crate::discovery::{self, ProviderEndpoints};
use crate::error::MitIdError;
use crate::response::{read_document, TokenResponse, UserInfo};
use crate::signing::SigningKey;
use jsonwebtoken::get_current_timestamp;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::form_urlencoded;
use uuid::Uuid;

/// RFC 7523 assertion type for `private_key_jwt` client authentication.
pub const CLIENT_ASSERTION_TYPE: &str = "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";

/// A relying party client for the MitID broker.
///
/// Created once through [`Client::discover`] and reused for every login. All state
/// is immutable after construction, so the client can be cloned cheaply and shared
/// between tasks and threads.
#[derive(Clone, Debug)]
pub struct Client {
    // The client is internally ref-counted to allow for cheap cloning.
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    client_id: String,
    signing_key: SigningKey,
    endpoints: ProviderEndpoints,
    http_client: reqwest::Client,
}

impl Client {
    /// Creates a new `Client`, resolving the provider's discovery document.
    ///
    /// No client is returned unless discovery succeeds and yields all four
    /// required fields.
    #[instrument(skip(config), fields(client_id = %config.client_id), err)]
    pub async fn discover(config: Config) -> Result<Self, MitIdError> {
        let endpoints = discovery::resolve(&config.http_client, &config.openid_configuration_url).await?;

        Ok(Self {
            inner: Arc::new(Inner {
                client_id: config.client_id,
                signing_key: config.signing_key,
                endpoints,
                http_client: config.http_client,
            }),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.inner.client_id
    }

    /// The endpoints resolved at construction time.
    pub fn endpoints(&self) -> &ProviderEndpoints {
        &self.inner.endpoints
    }

    /// Builds the URL the end user is redirected to in order to log in.
    ///
    /// The authorization parameters travel as a signed request object in the
    /// `request` query parameter; only `client_id` is sent in the clear. The
    /// request object is valid for 15 minutes.
    pub fn authorization_url(&self, redirect_uri: &str, scope: &str) -> Result<String, MitIdError> {
        let inner = &self.inner;
        let claims = AuthorizationRequestClaims::new(
            &inner.client_id,
            &inner.endpoints.issuer,
            redirect_uri,
            scope,
            get_current_timestamp(),
        );
        let request = inner.signing_key.sign(&claims)?;

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &inner.client_id)
            .append_pair("request", &request)
            .finish();
        Ok(append_query(&inner.endpoints.authorization_endpoint, &query))
    }

    /// Signs a fresh `private_key_jwt` client assertion for the token endpoint.
    ///
    /// Every call carries a new random `jti`.
    pub fn client_assertion(&self) -> Result<String, MitIdError> {
        let inner = &self.inner;
        let jti = Uuid::new_v4().to_string();
        debug!(jti = %jti, "Signing client assertion");
        let claims = ClientAssertionClaims::new(
            &inner.client_id,
            &inner.endpoints.token_endpoint,
            jti,
            get_current_timestamp(),
        );
        inner.signing_key.sign(&claims)
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// `redirect_uri` must be the value that was used to build the authorization
    /// URL for this login. The call is never retried: codes are single use.
    ///
    /// The provider's response is returned as-is. The ID token is not verified.
    #[instrument(skip(self, code), err)]
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenResponse, MitIdError> {
        let inner = &self.inner;
        let client_assertion = self.client_assertion()?;

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", inner.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("client_assertion", client_assertion.as_str()),
            ("client_assertion_type", CLIENT_ASSERTION_TYPE),
        ];

        let response = inner
            .http_client
            .post(inner.endpoints.token_endpoint.as_str())
            .form(&form)
            .send()
            .await?;

        let tokens = read_document(response, |status, body| MitIdError::TokenExchange { status, body }).await?;
        debug!("Authorization code exchanged");
        Ok(tokens)
    }

    /// Fetches the end user's claims with a bearer access token.
    #[instrument(skip(self, access_token), err)]
    pub async fn userinfo(&self, access_token: &str) -> Result<UserInfo, MitIdError> {
        let inner = &self.inner;
        let response = inner
            .http_client
            .get(inner.endpoints.userinfo_endpoint.as_str())
            .bearer_auth(access_token)
            .send()
            .await?;

        read_document(response, |status, body| MitIdError::UserInfo { status, body }).await
    }
}

/// Appends `query` to `endpoint` without re-serializing the endpoint, so the result
/// always starts with the endpoint exactly as discovered.
fn append_query(endpoint: &str, query: &str) -> String {
    let separator = match endpoint.find('?') {
        None => "?",
        Some(_) if endpoint.ends_with('?') || endpoint.ends_with('&') => "",
        Some(_) => "&",
    };
    format!("{}{}{}", endpoint, separator, query)
}
