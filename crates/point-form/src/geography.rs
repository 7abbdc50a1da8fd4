//! Reqwest-backed client for the external geography provider.
//!
//! The provider serves region lists and, keyed by region code, subregion
//! lists. The adapter decodes into transport DTOs first and maps into plain
//! strings in one pass. No retries: failures surface immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

/// Default region-list endpoint of the public provider.
pub const DEFAULT_REGIONS_ENDPOINT: &str =
    "https://servicodados.ibge.gov.br/api/v1/localidades/estados/";

/// Errors raised by the geography client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeographyError {
    /// The request never produced a response.
    #[error("geography request failed: {message}")]
    Transport { message: String },
    /// The provider answered with a non-success status.
    #[error("geography provider returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body could not be decoded.
    #[error("geography response could not be decoded: {message}")]
    Decode { message: String },
}

impl GeographyError {
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

/// Port for the geography provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeographySource: Send + Sync {
    /// Fetch all region codes.
    async fn regions(&self) -> Result<Vec<String>, GeographyError>;

    /// Fetch the subregion names of one region.
    async fn subregions(&self, region_code: &str) -> Result<Vec<String>, GeographyError>;
}

#[derive(Debug, Deserialize)]
struct RegionDto {
    sigla: String,
}

#[derive(Debug, Deserialize)]
struct SubregionDto {
    nome: String,
}

/// HTTP adapter for [`GeographySource`] against one provider endpoint.
pub struct HttpGeographySource {
    client: Client,
    regions_endpoint: Url,
}

impl HttpGeographySource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout. The endpoint must end in a slash for joins to resolve.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(regions_endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            regions_endpoint,
        })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Vec<T>, GeographyError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| GeographyError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| GeographyError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(GeographyError::status(
                status,
                String::from_utf8_lossy(body.as_ref()).into_owned(),
            ));
        }

        serde_json::from_slice(body.as_ref()).map_err(|err| GeographyError::decode(err.to_string()))
    }
}

#[async_trait]
impl GeographySource for HttpGeographySource {
    async fn regions(&self) -> Result<Vec<String>, GeographyError> {
        let decoded: Vec<RegionDto> = self.fetch(self.regions_endpoint.clone()).await?;
        Ok(decoded.into_iter().map(|region| region.sigla).collect())
    }

    async fn subregions(&self, region_code: &str) -> Result<Vec<String>, GeographyError> {
        let url = self
            .regions_endpoint
            .join(&format!("{region_code}/municipios"))
            .map_err(|err| GeographyError::transport(format!("invalid region code: {err}")))?;
        let decoded: Vec<SubregionDto> = self.fetch(url).await?;
        Ok(decoded.into_iter().map(|subregion| subregion.nome).collect())
    }
}
