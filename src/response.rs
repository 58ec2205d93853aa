// src/response.rs

use crate::error::MitIdError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The token endpoint's response, exactly as the provider sent it.
///
/// Nothing in here has been validated. In particular the `id_token` signature is
/// not verified by this crate; callers that rely on its claims must verify it
/// against the provider's published keys themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse(Map<String, Value>);

impl TokenResponse {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `access_token` member, if present and a string.
    pub fn access_token(&self) -> Option<&str> {
        self.0.get("access_token").and_then(Value::as_str)
    }

    /// The `id_token` member, if present and a string.
    pub fn id_token(&self) -> Option<&str> {
        self.0.get("id_token").and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Claims returned by the userinfo endpoint, keys and values untouched
/// (e.g. `mitid.date_of_birth`, `dk.cpr`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInfo(Map<String, Value>);

impl UserInfo {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// Reads a provider response as a JSON object document.
///
/// A non-success status, or a body that is not a JSON object, is turned into an
/// error by `on_failure`, which receives the status and the raw body. A non-success
/// status is always reported through `on_failure`, even if its body cannot be read.
pub(crate) async fn read_document<T, F>(
    response: reqwest::Response,
    on_failure: F,
) -> Result<T, MitIdError>
where
    T: DeserializeOwned,
    F: FnOnce(StatusCode, String) -> MitIdError,
{
    let status = response.status();

    if !status.is_success() {
        tracing::warn!(%status, "Provider responded with an error status");
        // An unreadable error body is reported as empty.
        let body = response.text().await.unwrap_or_default();
        return Err(on_failure(status, body));
    }

    let body = response.text().await?;

    match serde_json::from_str::<T>(&body) {
        Ok(document) => Ok(document),
        Err(e) => {
            tracing::warn!(%status, error = %e, "Provider response is not a JSON object");
            Err(on_failure(status, body))
        }
    }
}
