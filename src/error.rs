use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::{MatcherError, TemplateError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(&'static str),

    #[error("No analysis has been run yet")]
    NoSession,

    #[error("Pigment not found: {0}")]
    PigmentNotFound(String),

    #[error(transparent)]
    Matcher(MatcherError),

    #[error("Rendering error: {0}")]
    Template(#[from] TemplateError),
}

impl From<MatcherError> for ApiError {
    fn from(e: MatcherError) -> Self {
        match e {
            MatcherError::PigmentNotFound(id) => ApiError::PigmentNotFound(id),
            other => ApiError::Matcher(other),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NoSession => StatusCode::NOT_FOUND,
            ApiError::PigmentNotFound(_) => StatusCode::NOT_FOUND,
            // the upstream service failed or answered with something unusable
            ApiError::Matcher(_) => StatusCode::BAD_GATEWAY,
            ApiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
