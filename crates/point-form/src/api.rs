//! Reqwest-backed client for the registry backend.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into the wire types the form
//! works with.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Catalog entry as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogItem {
    pub id: i32,
    pub title: String,
    pub image_url: String,
}

/// Create-point request payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePointRequest {
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub items: Vec<i32>,
}

/// Echo of the created point returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedPoint {
    pub id: i32,
    pub image: String,
    pub name: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

/// Errors raised by the backend client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("backend request failed: {message}")]
    Transport { message: String },
    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body could not be decoded.
    #[error("backend response could not be decoded: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a status error with the given status and message.
    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for the two backend operations the form needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsApi: Send + Sync {
    /// Fetch the item catalog.
    async fn list_items(&self) -> Result<Vec<CatalogItem>, ApiError>;

    /// Submit a new collection point, returning the backend's echo.
    async fn create_point(&self, request: CreatePointRequest) -> Result<CreatedPoint, ApiError>;
}

/// HTTP adapter for [`PointsApi`] against one backend base URL.
pub struct HttpPointsApi {
    client: Client,
    base_url: Url,
}

impl HttpPointsApi {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout. The base URL must end in a slash for joins to resolve.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::transport(format!("invalid endpoint {path}: {err}")))
    }
}

#[async_trait]
impl PointsApi for HttpPointsApi {
    async fn list_items(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("items")?)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }

    async fn create_point(&self, request: CreatePointRequest) -> Result<CreatedPoint, ApiError> {
        let response = self
            .client
            .post(self.endpoint("points")?)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::transport(error.to_string())
}

async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(ApiError::status(status, body_preview(body.as_ref())));
    }
    serde_json::from_slice(body.as_ref()).map_err(|err| ApiError::decode(err.to_string()))
}

/// Compact, length-bounded rendering of an error body for diagnostics.
fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
