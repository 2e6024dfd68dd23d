use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures of a single outbound search
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("Search transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Response body is empty")]
    EmptyResult,
}

/// Failures turning a catalog item id back into a query
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CodecError {
    #[error("Malformed identifier payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Identifier {0:?} is outside the add-on namespace")]
    UnknownPrefix(String),
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Search(_) => StatusCode::BAD_GATEWAY,
            AppError::Codec(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
