use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::directory::DirectoryError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("directory task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<DirectoryError> for ApiError {
    fn from(error: DirectoryError) -> Self {
        match error {
            DirectoryError::NotFound(_) => ApiError::NotFound,
            DirectoryError::Storage(error) => ApiError::Storage(error),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "User not found").into_response(),
            ApiError::Storage(error) => {
                tracing::error!(?error, "failed to persist user list");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            ApiError::Task(error) => {
                tracing::error!(?error, "directory task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
