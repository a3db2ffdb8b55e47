use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::services::error::ServiceError;
use log::error;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Machine-readable error kind
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error type returned by handlers
#[derive(Debug)]
pub enum AppError {
    Service(ServiceError),
    /// The request was valid but the server could not handle it
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        Self::Service(ServiceError::Persistence(err))
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        let err = match self {
            Self::Service(err) => err,
            Self::Internal(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        match err {
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ServiceError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ServiceError::InvalidAssignment(_) => (StatusCode::BAD_REQUEST, "INVALID_ASSIGNMENT"),
            ServiceError::InvalidTransition(_) => (StatusCode::CONFLICT, "INVALID_TRANSITION"),
            ServiceError::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Store errors are logged in full but not echoed to clients
        let message = match self {
            Self::Service(ServiceError::Persistence(e)) => {
                error!("Request failed: {e}");
                "internal persistence failure".to_string()
            }
            Self::Service(other) => other.to_string(),
            Self::Internal(msg) => {
                error!("Request failed: {msg}");
                msg
            }
        };

        (status, Json(ApiError::new(code, message))).into_response()
    }
}
