//! Typed HTTP client for the platform REST API.
//!
//! Every remote operation in the console funnels through [`ApiClient`]: it
//! owns the base URL, attaches the bearer token, and maps transport,
//! decode, and server-rejection failures into tagged [`ApiError`] variants
//! so callers can branch on failure class instead of strings.

use axum::http::{HeaderValue, StatusCode, header};
use reqwest::{Client, Method, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use thiserror::Error;

use penna_api_types::ApiErrorBody;

use crate::application::pagination::EnvelopeError;

/// Failure classes for remote API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("API rejected the request ({status}): {message}")]
    Server { status: StatusCode, message: String },
    #[error("failed to decode API response: {0}")]
    Decode(String),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    #[error("bearer token contains invalid header characters")]
    Token,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApiError::Server {
                status: StatusCode::NOT_FOUND,
                ..
            }
        )
    }

    /// Stable tag for logging and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Url(_) => "url",
            ApiError::Server { .. } => "server",
            ApiError::Decode(_) | ApiError::Envelope(_) => "decode",
            ApiError::Token => "token",
        }
    }

    /// Message suitable for showing to an operator. Server-provided
    /// messages pass through; transport and decode failures collapse to a
    /// generic line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Server { status, .. } => format!("the platform API returned {status}"),
            ApiError::Network(_) => "the platform API could not be reached".to_string(),
            _ => "the platform API returned an unusable response".to_string(),
        }
    }
}

/// Shared connection to the platform API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)?.join("/")?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base,
            token: token.into(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("penna/", env!("CARGO_PKG_VERSION"))
    }

    fn auth_header(&self) -> Result<HeaderValue, ApiError> {
        HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| ApiError::Token)
    }

    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path.trim_start_matches('/')).map_err(ApiError::Url)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let resp = self.send(Method::GET, path, query, None::<&()>).await?;
        Self::handle(resp).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.send(Method::POST, path, &[], Some(body)).await?;
        Self::handle(resp).await
    }

    pub async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self.send(Method::PATCH, path, &[], Some(body)).await?;
        Self::handle(resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.send(Method::DELETE, path, &[], None::<&()>).await?;
        Self::expect_success(resp).await
    }

    /// Multipart submission, used when a form carries a file attachment.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let resp = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, self.auth_header()?)
            .multipart(form)
            .send()
            .await?;
        Self::handle(resp).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            url.set_query(None);
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let mut req = self
            .client
            .request(method, url)
            .header(header::AUTHORIZATION, self.auth_header()?);
        if let Some(body) = body {
            req = req.json(body);
        }

        Ok(req.send().await?)
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(Self::rejection(status, &bytes));
        }
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn expect_success(resp: Response) -> Result<(), ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let bytes = resp.bytes().await.unwrap_or_default();
        Err(Self::rejection(status, &bytes))
    }

    fn rejection(status: StatusCode, bytes: &[u8]) -> ApiError {
        let message = serde_json::from_slice::<ApiErrorBody>(bytes)
            .map(|body| body.message)
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).trim().to_string());
        ApiError::Server { status, message }
    }
}
