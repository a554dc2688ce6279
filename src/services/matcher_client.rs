//! Client for the upstream matching service.
//!
//! The service scores orders against a pigment and owns the pigment and
//! order databases. Every endpoint answers with a `success` flag; a
//! `success: false` body carries a human readable `message`.

use async_trait::async_trait;
use match_insight::{MatchBundle, Order, Pigment};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::models::MatcherConfig;

const MATCH_PATH: &str = "/api/match/pigment-to-orders";
const PIGMENTS_PATH: &str = "/api/database/pigments";
const ORDERS_PATH: &str = "/api/database/orders";

/// Message the service sends when the requested pigment does not exist
const PIGMENT_NOT_FOUND: &str = "Pigment not found";

/// Error type for matching service calls
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Matching service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Matching service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Pigment not found: {0}")]
    PigmentNotFound(String),

    #[error("Matching service rejected the request: {0}")]
    Rejected(String),

    #[error("Malformed response from matching service: {0}")]
    Decode(String),
}

/// Access to the matching service
#[async_trait]
pub trait MatchService: Send + Sync {
    /// Score every order against one pigment
    async fn match_pigment(&self, pigment_id: &str) -> Result<MatchBundle, MatcherError>;

    /// Full pigment database
    async fn pigments(&self) -> Result<Vec<Pigment>, MatcherError>;

    /// Full order database
    async fn orders(&self) -> Result<Vec<Order>, MatcherError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchRequest<'a> {
    pigment_id: &'a str,
}

/// `{success, data, count}` wrapper of the database endpoints
#[derive(Debug, Deserialize)]
struct DatabaseEnvelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Body of a failed call
#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// reqwest-backed [`MatchService`]
pub struct HttpMatchService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMatchService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MatcherError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pigment-matrix/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &MatcherConfig) -> Result<Self, MatcherError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read the body and decode it, mapping non-2xx answers to errors.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, MatcherError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let failure: FailureBody = serde_json::from_str(&body).unwrap_or_default();
            let message = failure
                .message
                .or(failure.error)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(MatcherError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| MatcherError::Decode(e.to_string()))
    }

    async fn fetch_database<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, MatcherError> {
        let url = self.url(path);
        tracing::debug!(%url, "Fetching database");

        let response = self.client.get(&url).send().await?;
        let envelope: DatabaseEnvelope<T> = Self::decode(response).await?;

        if !envelope.success {
            return Err(MatcherError::Rejected(
                envelope.message.unwrap_or_else(|| "database unavailable".into()),
            ));
        }
        Ok(envelope.data)
    }
}

#[async_trait]
impl MatchService for HttpMatchService {
    async fn match_pigment(&self, pigment_id: &str) -> Result<MatchBundle, MatcherError> {
        let url = self.url(MATCH_PATH);
        tracing::debug!(%url, pigment = %pigment_id, "Requesting match bundle");

        let response = self
            .client
            .post(&url)
            .json(&MatchRequest { pigment_id })
            .send()
            .await?;

        let bundle: MatchBundle = match Self::decode(response).await {
            Ok(decoded) => decoded,
            Err(MatcherError::Status { status: 404, message }) if message == PIGMENT_NOT_FOUND => {
                return Err(MatcherError::PigmentNotFound(pigment_id.to_string()));
            }
            Err(e) => return Err(e),
        };

        if !bundle.success {
            return Err(MatcherError::Rejected(
                bundle.message.unwrap_or_else(|| "no message".into()),
            ));
        }

        tracing::debug!(
            pigment = %pigment_id,
            consensus = bundle.consensus.len(),
            "Match bundle received"
        );
        Ok(bundle)
    }

    async fn pigments(&self) -> Result<Vec<Pigment>, MatcherError> {
        self.fetch_database(PIGMENTS_PATH).await
    }

    async fn orders(&self) -> Result<Vec<Order>, MatcherError> {
        self.fetch_database(ORDERS_PATH).await
    }
}
