//! Mapping of failures to HTTP responses.
//!
//! Every error body is JSON of the form `{"message": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{CarId, ValidationError};
use crate::store::StoreError;

/// Error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Failure of a resource operation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("Car id does not match resource id")]
    IdMismatch,

    #[error("Car {0} not found")]
    NotFound(CarId),

    /// No caller identity was supplied.
    #[error("Not authenticated")]
    Forbidden,

    /// The caller lacks the required role.
    #[error("Not authorized")]
    Unauthorized,

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::IdMismatch => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            // The store lost a race the pre-check could not see.
            StoreError::DuplicateName(_) => ApiError::Validation(ValidationError::DuplicateName),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
