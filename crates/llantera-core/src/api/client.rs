//! Backend HTTP client
//!
//! Shared `reqwest` client that attaches the stored bearer token and maps
//! responses onto [`Error`].

use std::sync::Arc;

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::auth::TokenStore;
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Error body shape used by the backend
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Backend REST client
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client for the configured backend
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let config = config.validate();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url,
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request, with `Authorization: Bearer` when a token is stored
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.store.read() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and fail on any non-success status
    pub(crate) async fn send(&self, request: RequestBuilder, default_message: &str) -> Result<Response> {
        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(error_from_response(response, default_message).await)
    }

    /// Send and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        default_message: &str,
    ) -> Result<T> {
        let response = self.send(request, default_message).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Backend-provided message of a failed response, if any
pub(crate) async fn response_message(response: Response) -> Option<String> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::debug!("Backend answered {}: {}", status, body);
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
}

/// Map a failed response onto the error taxonomy.
///
/// 401 is `Unauthorized`; everything else is `Server` carrying the body's
/// `message` (or `error`) field, or `default_message` when there is none.
pub(crate) async fn error_from_response(response: Response, default_message: &str) -> Error {
    let status = response.status();
    let message = response_message(response).await;

    if status == StatusCode::UNAUTHORIZED {
        return Error::unauthorized(
            message.unwrap_or_else(|| "Invalid or expired session".to_string()),
        );
    }
    Error::server(message.unwrap_or_else(|| default_message.to_string()))
}
