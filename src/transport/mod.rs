//! HTTP plumbing for the backend API with consistent timeouts and error
//! handling. [`ApiClient::execute`] is the only send path: it authorizes every
//! request, sends it, and records any cookies the server sets. Feature clients
//! and the session client build on the JSON helpers here and never touch
//! `reqwest` directly.

mod authorizer;

pub use authorizer::RequestAuthorizer;

use crate::{config::AppConfig, error::ApiError, APP_USER_AGENT};
use reqwest::{cookie::Jar, Client, Method, RequestBuilder, Response};
use secrecy::SecretString;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

/// Synchronous read of the bearer token to attach, if any.
pub trait AccessTokenSource: Send + Sync {
    fn current_access_token(&self) -> Option<SecretString>;
}

/// Error payload returned by the backend (`{statusCode, message, timestamp}`).
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Shared HTTP client bound to the configured API base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    authorizer: RequestAuthorizer,
}

impl ApiClient {
    /// Builds a client with a fresh cookie jar.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig, tokens: Arc<dyn AccessTokenSource>) -> Result<Self, ApiError> {
        Self::with_jar(config, tokens, Arc::new(Jar::default()))
    }

    /// Builds a client around an existing cookie jar.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_jar(
        config: &AppConfig,
        tokens: Arc<dyn AccessTokenSource>,
        jar: Arc<Jar>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Request(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            authorizer: RequestAuthorizer::new(jar, tokens),
        })
    }

    /// Starts a request for a path relative to the API base URL.
    ///
    /// # Errors
    /// Returns an error if the path cannot be joined onto the base URL.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        Ok(self.http.request(method, url))
    }

    /// Authorizes and sends a request, storing cookies from the response.
    ///
    /// # Errors
    /// Returns an error if the request cannot be built or the transport fails.
    /// HTTP error statuses are not errors at this level.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder
            .build()
            .map_err(|err| ApiError::Request(format!("Failed to build request: {err}")))?;
        let request = self.authorizer.authorize(request);
        let url = request.url().clone();

        let span = info_span!(
            "api.request",
            http.method = %request.method(),
            url = %url.path()
        );
        let response = self
            .http
            .execute(request)
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        self.authorizer.store_cookies(&response, &url);
        debug!(status = response.status().as_u16(), path = url.path(), "api response");

        Ok(response)
    }

    /// Fetches JSON.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or bad JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path)?).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or bad JSON.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .execute(self.request(Method::POST, path)?.json(body))
            .await?;
        handle_json_response(response).await
    }

    /// Puts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status or bad JSON.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .execute(self.request(Method::PUT, path)?.json(body))
            .await?;
        handle_json_response(response).await
    }

    /// Posts an empty JSON object and ignores the response body.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .execute(
                self.request(Method::POST, path)?
                    .json(&serde_json::Map::new()),
            )
            .await?;
        handle_empty_response(response).await
    }

    /// Sends a DELETE and ignores the response body.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.execute(self.request(Method::DELETE, path)?).await?;
        handle_empty_response(response).await
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim().trim_start_matches('/'))
            .map_err(|err| ApiError::Request(format!("Invalid request path {path}: {err}")))
    }
}

/// Maps transport errors into `ApiError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        ApiError::Network(format!("Unable to reach the server: {err}"))
    }
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

async fn handle_empty_response(response: Response) -> Result<(), ApiError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::from_status(status, error_message(&body))
}

/// Prefers the backend's `message` field, falling back to the raw body, then
/// trims and truncates for display.
fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|error| error.message)
        .unwrap_or_else(|| body.to_string());

    let trimmed = message.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
