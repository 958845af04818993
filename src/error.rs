// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Synthesis function timed out")]
    UpstreamTimeout,

    #[error("Synthesis function error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Synthesis function unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("Synthesis response violated contract: {0}")]
    UpstreamContract(String),

    #[error("Store inconsistent with synthesis function: {0}")]
    Inconsistency(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                // Client-caused, never logged as a failure
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::UpstreamTimeout => {
                tracing::error!("Synthesis function timed out");
                (StatusCode::GATEWAY_TIMEOUT, "synthesis_timeout", None)
            }
            AppError::Upstream { status, message } => {
                tracing::error!(upstream_status = status, error = %message, "Synthesis function error");
                (
                    StatusCode::BAD_GATEWAY,
                    "synthesis_error",
                    Some(message.clone()),
                )
            }
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!(error = %msg, "Synthesis function unreachable");
                (StatusCode::BAD_GATEWAY, "synthesis_unavailable", None)
            }
            AppError::UpstreamContract(msg) => {
                tracing::error!(error = %msg, "Synthesis response violated contract");
                (
                    StatusCode::BAD_GATEWAY,
                    "synthesis_contract_violation",
                    Some(msg.clone()),
                )
            }
            AppError::Inconsistency(msg) => {
                tracing::error!(error = %msg, "Store inconsistent with synthesis function");
                (StatusCode::INTERNAL_SERVER_ERROR, "inconsistency", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
