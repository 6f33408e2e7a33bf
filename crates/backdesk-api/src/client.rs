// Commerce admin API HTTP client
//
// Wraps `reqwest::Client` with bearer authentication, per-kind URL
// construction, and `{ success, ..., message? }` envelope unwrapping.
// Every method returns the unwrapped entity payload -- the envelope is
// stripped before the caller sees it.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::kind::ResourceKind;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// HTTP client for the commerce admin API.
///
/// Holds the base URL and the bearer credential injected at construction;
/// operations never read credentials from ambient state. All requests
/// share a bounded timeout, surfaced as [`Error::Timeout`] on expiry.
/// The `Debug` form redacts the token via `secrecy`.
#[derive(Debug)]
pub struct ShopClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
    timeout_secs: u64,
}

impl ShopClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: Url, token: SecretString) -> Result<Self, Error> {
        Self::with_timeout(base_url, token, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(
        base_url: Url,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Transport)?;
        Ok(Self {
            http,
            base_url,
            token,
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this in tests or when the transport is configured elsewhere.
    pub fn with_client(http: reqwest::Client, base_url: Url, token: SecretString) -> Self {
        Self {
            http,
            base_url,
            token,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Resource operations ──────────────────────────────────────────

    /// Fetch the full collection for a resource kind.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        kind: &ResourceKind,
    ) -> Result<Vec<T>, Error> {
        let url = self.endpoint_url(&kind.all_path())?;
        debug!(%kind, "GET {url}");

        let resp = self.http.get(url).bearer_auth(self.bearer()).send().await;
        let envelope = self.parse_envelope(resp).await?;
        extract(&envelope, &[kind.collection_key, "data"])
    }

    /// Create an entity. Returns the server's canonical representation,
    /// including the server-assigned id.
    pub async fn create<T: DeserializeOwned>(
        &self,
        kind: &ResourceKind,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.endpoint_url(&kind.add_path())?;
        debug!(%kind, "POST {url}");

        let resp = self
            .http
            .post(url)
            .bearer_auth(self.bearer())
            .json(body)
            .send()
            .await;
        let envelope = self.parse_envelope(resp).await?;
        extract(&envelope, &[kind.entity_key, "data"])
    }

    /// Update the entity identified by `id`. Returns the server's
    /// canonical representation after normalization.
    pub async fn update<T: DeserializeOwned>(
        &self,
        kind: &ResourceKind,
        id: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.endpoint_url(&kind.edit_path(id))?;
        debug!(%kind, id, "PUT {url}");

        let resp = self
            .http
            .put(url)
            .bearer_auth(self.bearer())
            .json(body)
            .send()
            .await;
        let envelope = self.parse_envelope(resp).await?;
        extract(&envelope, &[kind.entity_key, "data"])
    }

    /// Delete the entity identified by `id`.
    pub async fn delete(&self, kind: &ResourceKind, id: &str) -> Result<(), Error> {
        let url = self.endpoint_url(&kind.delete_path(id))?;
        debug!(%kind, id, "DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .bearer_auth(self.bearer())
            .send()
            .await;
        // Delete responses carry no entity; an empty 2xx body is success.
        self.parse_envelope(resp).await.map(|_| ())
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn bearer(&self) -> &str {
        self.token.expose_secret()
    }

    /// Join an operation path onto the base URL.
    fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Triage status codes and unwrap the `{ success, ... }` envelope.
    ///
    /// Non-2xx responses become [`Error::Api`] carrying the body's
    /// optional `message` field; 401 becomes [`Error::Authentication`].
    /// A 2xx body with `success: false` is also a rejection -- some
    /// deployments report failures that way instead of via status codes.
    async fn parse_envelope(
        &self,
        resp: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<Value, Error> {
        let resp = resp.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                Error::Transport(e)
            }
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: message_from_body(&body)
                    .unwrap_or_else(|| "token expired or invalid".into()),
            });
        }

        if !status.is_success() {
            return Err(Error::Api {
                message: message_from_body(&body)
                    .unwrap_or_else(|| format!("HTTP {status}")),
                status: Some(status.as_u16()),
            });
        }

        if body.trim().is_empty() {
            // Delete endpoints may answer with a bare 2xx.
            return Ok(Value::Null);
        }

        let envelope: Value = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        match envelope.get("success").and_then(Value::as_bool) {
            Some(true) | None => Ok(envelope),
            Some(false) => Err(Error::Api {
                message: envelope
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("request rejected")
                    .to_owned(),
                status: Some(status.as_u16()),
            }),
        }
    }
}

/// Pull a typed payload out of the envelope, trying each key in order.
fn extract<T: DeserializeOwned>(envelope: &Value, keys: &[&str]) -> Result<T, Error> {
    let payload = keys
        .iter()
        .find_map(|k| envelope.get(*k))
        .ok_or_else(|| Error::Deserialization {
            message: format!("none of {keys:?} present in response"),
            body: envelope.to_string(),
        })?;

    serde_json::from_value(payload.clone()).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: envelope.to_string(),
    })
}

fn message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(String::from)
}
