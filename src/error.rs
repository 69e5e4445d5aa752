use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while serving requests
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Write would collide with an existing entity
    #[error("{0}")]
    Conflict(String),

    /// Failed to fetch an external web page during import
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// No extractor could find a recipe in the fetched page
    #[error("No recipe found in this webpage")]
    NoRecipeFound,

    /// Multipart upload could not be read
    #[error("Upload error: {0}")]
    Upload(#[from] axum::extract::multipart::MultipartError),

    /// Filesystem error from the JSON store or upload area
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data file could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::Upload(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NoRecipeFound => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Fetch(_) => StatusCode::BAD_GATEWAY,
            AppError::Io(_) | AppError::Json(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
