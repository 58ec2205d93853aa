// src/config.rs

use crate::error::MitIdError;
use crate::signing::SigningKey;
use url::Url;

/// The main configuration for the MitID relying party client.
///
/// This struct holds everything needed to discover the provider and to sign
/// requests on behalf of the client. It should be constructed using the `ConfigBuilder`.
#[derive(Clone, Debug)]
pub struct Config {
    /// URL of the provider's `.well-known/openid-configuration` document.
    pub openid_configuration_url: Url,
    /// The client ID issued by the broker.
    pub client_id: String,
    /// The RSA key registered with the broker for this client.
    pub signing_key: SigningKey,
    /// The HTTP client used for discovery, token and userinfo calls.
    /// Timeouts, TLS and proxy settings belong here.
    pub http_client: reqwest::Client,
}

/// A builder for creating a `Config` instance.
///
/// This builder provides a fluent API to ensure that the configuration is
/// constructed correctly and with all required fields.
#[derive(Default)]
pub struct ConfigBuilder {
    openid_configuration_url: Option<Url>,
    client_id: Option<String>,
    signing_key: Option<SigningKey>,
    http_client: Option<reqwest::Client>,
}

impl ConfigBuilder {
    /// Creates a new `ConfigBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the discovery document URL. This is a required field.
    ///
    /// # Arguments
    ///
    /// * `url` - e.g., "https://pp.netseidbroker.dk/op/.well-known/openid-configuration".
    pub fn openid_configuration_url(mut self, url: &str) -> Result<Self, MitIdError> {
        let parsed_url = Url::parse(url).map_err(|e| MitIdError::InvalidUrl(e.to_string()))?;
        self.openid_configuration_url = Some(parsed_url);
        Ok(self)
    }

    /// Sets the client ID of the application. This is a required field.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the signing key. This is a required field.
    pub fn signing_key(mut self, key: SigningKey) -> Self {
        self.signing_key = Some(key);
        self
    }

    /// Uses a preconfigured HTTP client. Defaults to `reqwest::Client::new()`.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Consumes the builder and returns a `Config` object.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or `client_id` is empty.
    pub fn build(self) -> Result<Config, MitIdError> {
        let openid_configuration_url = self
            .openid_configuration_url
            .ok_or(MitIdError::MissingConfiguration("openid_configuration_url".to_string()))?;
        let client_id = self
            .client_id
            .filter(|id| !id.is_empty())
            .ok_or(MitIdError::MissingConfiguration("client_id".to_string()))?;
        let signing_key = self
            .signing_key
            .ok_or(MitIdError::MissingConfiguration("signing_key".to_string()))?;

        Ok(Config {
            openid_configuration_url,
            client_id,
            signing_key,
            http_client: self.http_client.unwrap_or_default(),
        })
    }
}
