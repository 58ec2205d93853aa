// src/discovery.rs

use crate::error::MitIdError;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// The subset of the provider's `.well-known/openid-configuration` document this client reads.
#[derive(Debug, Deserialize)]
struct OidcDiscoveryDocument {
    issuer: String,
    authorization_endpoint: String,
    token_endpoint: String,
    userinfo_endpoint: String,
}

/// Endpoints and issuer resolved from the discovery document.
///
/// Fetched once when the client is constructed and never refreshed. Every value is
/// kept exactly as the provider published it; URL normalization would change the
/// `aud` of client assertions and the prefix of authorization URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    /// The provider's issuer identifier, used verbatim as the `aud` of request objects.
    pub issuer: String,
    pub authorization_endpoint: String,
    /// Also the `aud` of client assertions.
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
}

impl ProviderEndpoints {
    /// Parses a discovery document body.
    ///
    /// All four fields must be present, be strings and be non-empty; the three
    /// endpoints must also be absolute URLs.
    pub fn from_document(body: &str) -> Result<Self, MitIdError> {
        let document: OidcDiscoveryDocument = serde_json::from_str(body)
            .map_err(|e| MitIdError::Discovery(format!("malformed discovery document: {}", e)))?;

        if document.issuer.is_empty() {
            return Err(MitIdError::Discovery("'issuer' is empty".to_string()));
        }

        Ok(Self {
            issuer: document.issuer,
            authorization_endpoint: check_endpoint("authorization_endpoint", document.authorization_endpoint)?,
            token_endpoint: check_endpoint("token_endpoint", document.token_endpoint)?,
            userinfo_endpoint: check_endpoint("userinfo_endpoint", document.userinfo_endpoint)?,
        })
    }
}

/// Rejects empty or unparseable endpoints, returning the original string untouched.
fn check_endpoint(field: &str, value: String) -> Result<String, MitIdError> {
    if value.is_empty() {
        return Err(MitIdError::Discovery(format!("'{}' is empty", field)));
    }
    Url::parse(&value).map_err(|e| MitIdError::Discovery(format!("'{}' is not a valid URL: {}", field, e)))?;
    Ok(value)
}

/// Fetches the discovery document at `configuration_url` and extracts the provider endpoints.
///
/// Any failure, including a transport error or a non-success status, is reported as
/// [`MitIdError::Discovery`].
#[instrument(skip_all, fields(url = %configuration_url), err)]
pub async fn resolve(http_client: &reqwest::Client, configuration_url: &Url) -> Result<ProviderEndpoints, MitIdError> {
    debug!("Performing OIDC discovery");
    let response = http_client
        .get(configuration_url.clone())
        .send()
        .await
        .map_err(|e| MitIdError::Discovery(format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MitIdError::Discovery(format!("provider responded with status {}", status)));
    }

    let body = response
        .text()
        .await
        .map_err(|e| MitIdError::Discovery(format!("failed to read response body: {}", e)))?;

    let endpoints = ProviderEndpoints::from_document(&body)?;
    debug!(
        issuer = %endpoints.issuer,
        authorization_endpoint = %endpoints.authorization_endpoint,
        token_endpoint = %endpoints.token_endpoint,
        userinfo_endpoint = %endpoints.userinfo_endpoint,
        "Discovered provider endpoints"
    );
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> serde_json::Value {
        json!({
            "issuer": "https://pp.netseidbroker.dk/op",
            "authorization_endpoint": "https://pp.netseidbroker.dk/op/connect/authorize",
            "token_endpoint": "https://pp.netseidbroker.dk/op/connect/token",
            "userinfo_endpoint": "https://pp.netseidbroker.dk/op/connect/userinfo",
            "jwks_uri": "https://pp.netseidbroker.dk/op/.well-known/openid-configuration/jwks",
            "request_parameter_supported": true
        })
    }

    #[test]
    fn extracts_the_four_fields_and_ignores_the_rest() {
        let endpoints = ProviderEndpoints::from_document(&document().to_string()).unwrap();
        assert_eq!(endpoints.issuer, "https://pp.netseidbroker.dk/op");
        assert_eq!(endpoints.authorization_endpoint, "https://pp.netseidbroker.dk/op/connect/authorize");
        assert_eq!(endpoints.token_endpoint, "https://pp.netseidbroker.dk/op/connect/token");
        assert_eq!(endpoints.userinfo_endpoint, "https://pp.netseidbroker.dk/op/connect/userinfo");
    }

    #[test]
    fn endpoints_keep_their_published_spelling() {
        let mut doc = document();
        doc["authorization_endpoint"] = json!("https://PP.NetsEIDBroker.dk:443/op/connect/authorize");
        doc["token_endpoint"] = json!("https://PP.NetsEIDBroker.dk");

        let endpoints = ProviderEndpoints::from_document(&doc.to_string()).unwrap();

        assert_eq!(endpoints.authorization_endpoint, "https://PP.NetsEIDBroker.dk:443/op/connect/authorize");
        assert_eq!(endpoints.token_endpoint, "https://PP.NetsEIDBroker.dk");
    }

    #[test]
    fn endpoint_that_is_not_a_url_is_rejected() {
        let mut doc = document();
        doc["userinfo_endpoint"] = json!("connect/userinfo");
        assert!(matches!(ProviderEndpoints::from_document(&doc.to_string()), Err(MitIdError::Discovery(_))));
    }

    #[test]
    fn every_required_field_is_enforced() {
        for field in ["issuer", "authorization_endpoint", "token_endpoint", "userinfo_endpoint"] {
            let mut missing = document();
            missing.as_object_mut().unwrap().remove(field);
            assert!(
                matches!(ProviderEndpoints::from_document(&missing.to_string()), Err(MitIdError::Discovery(_))),
                "missing {} should fail",
                field
            );

            let mut not_a_string = document();
            not_a_string[field] = json!(42);
            assert!(
                matches!(ProviderEndpoints::from_document(&not_a_string.to_string()), Err(MitIdError::Discovery(_))),
                "numeric {} should fail",
                field
            );

            let mut empty = document();
            empty[field] = json!("");
            assert!(
                matches!(ProviderEndpoints::from_document(&empty.to_string()), Err(MitIdError::Discovery(_))),
                "empty {} should fail",
                field
            );
        }
    }

    #[test]
    fn non_json_body_is_a_discovery_error() {
        let result = ProviderEndpoints::from_document("<html>maintenance</html>");
        assert!(matches!(result, Err(MitIdError::Discovery(_))));
    }
}
