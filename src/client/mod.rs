//! Typed client for the proxy mount point.
//!
//! This is the consumer side of the BFF: it talks only to `/api/server/...`
//! on the proxy, never to the upstream directly.

pub mod posts;
pub mod todos;
pub mod types;
pub mod users;

use std::time::Duration;

use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use types::{CreatePost, CreateTodo, CreateUser, Post, Todo, User};

/// Proxy mount point of a locally running `bff-proxy`.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api/server";

/// Per-request timeout used by [`BffClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with a non-2xx status.
    #[error("proxy returned status {status}: {body}")]
    Status { status: StatusCode, body: Value },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the posts, todos and users resources behind the proxy.
#[derive(Debug, Clone)]
pub struct BffClient {
    client: Client,
    base_url: String,
}

impl BffClient {
    /// Create a client with a 10 second timeout and JSON content type.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(base_url, client))
    }

    /// Create a client around an existing reqwest client.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.client.get(self.url(path))).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send(self.client.delete(self.url(path))).await
    }

    /// Fetch a list that may come bare or wrapped under `key`.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> Result<Vec<T>, ClientError> {
        let value: Value = self.get(path).await?;
        Ok(unwrap_listing(value, key)?)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(ClientError::Status { status, body });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

/// Accept either `[...]` or `{ "<key>": [...], ... }`.
pub fn unwrap_listing<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, serde_json::Error> {
    let items = match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(list @ Value::Array(_)) => list,
            _ => Value::Object(map),
        },
        other => other,
    };
    serde_json::from_value(items)
}
