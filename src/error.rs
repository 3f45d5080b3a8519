use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Query service errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Similarity pipeline errors
///
/// Every variant is fatal for a batch run. Degenerate inputs (empty
/// vocabulary, zero vectors) are not errors and never reach this type.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Invalid reduction rank {k}: must satisfy 1 <= k < {limit}")]
    InvalidRank { k: usize, limit: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed similarity artifact: {0}")]
    BadArtifact(String),

    #[error("Similarity artifact is stale: built for {found}, expected {expected}")]
    StaleArtifact { expected: String, found: String },
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let response = AppError::InvalidInput("Mes no válido".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Heat".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rank_error_message() {
        let err = PipelineError::InvalidRank { k: 100, limit: 3 };
        assert_eq!(
            err.to_string(),
            "Invalid reduction rank 100: must satisfy 1 <= k < 3"
        );
    }
}
