//! The shared HTTP client and its request helpers.

use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::HttpConfig;
use crate::error::HttpError;
use crate::response::{check, decode, decode_body};

/// Gateway to the dashboard backend. Implements every gateway port.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Request`] when the HTTP client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(HttpError::Request)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Host the dashboard is reached on; a `localhost` broker resolves to it.
    #[must_use]
    pub fn host(&self) -> Option<String> {
        let url = Url::parse(&self.base_url).ok()?;
        url.host_str().map(str::to_string)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let value = self.send(self.client.get(self.url(path))).await?;
        decode(check(value)?)
    }

    /// Raw body of a GET, for binary resources.
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, HttpError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(HttpError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }
        let body = response.bytes().await.map_err(HttpError::Request)?;
        Ok(body.to_vec())
    }

    pub(crate) async fn post(&self, path: &str) -> Result<Value, HttpError> {
        check(self.send(self.client.post(self.url(path))).await?)
    }

    /// POST without applying the rejection convention.
    pub(crate) async fn post_raw(&self, path: &str) -> Result<Value, HttpError> {
        self.send(self.client.post(self.url(path))).await
    }

    pub(crate) async fn post_form<F>(&self, path: &str, form: &F) -> Result<Value, HttpError>
    where
        F: Serialize + Sync + ?Sized,
    {
        check(self.send(self.client.post(self.url(path)).form(form)).await?)
    }

    pub(crate) async fn post_json<B>(&self, path: &str, body: &B) -> Result<Value, HttpError>
    where
        B: Serialize + Sync + ?Sized,
    {
        check(self.send(self.client.post(self.url(path)).json(body)).await?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, HttpError> {
        let response = request.send().await.map_err(HttpError::Request)?;
        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "backend answered");
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }
        let body = response.bytes().await.map_err(HttpError::Request)?;
        Ok(decode_body(&body))
    }
}
