//! API error type and its JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use keepsake_core::{EntityKind, FieldError};

/// The store operation a handler was performing, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Client-facing failure message, e.g. "Failed to fetch notes".
    pub fn failure_message(self, kind: EntityKind) -> String {
        match self {
            Operation::List => format!("Failed to fetch {}", kind.collection()),
            Operation::Get => format!("Failed to fetch {}", kind.as_str()),
            Operation::Create => format!("Failed to create {}", kind.as_str()),
            Operation::Update => format!("Failed to update {}", kind.as_str()),
            Operation::Delete => format!("Failed to delete {}", kind.as_str()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("{context}: {source}")]
    Internal {
        context: String,
        #[source]
        source: keepsake_core::Error,
    },
}

impl ApiError {
    /// Map a store error for the given operation.
    pub fn from_store(err: keepsake_core::Error, op: Operation, kind: EntityKind) -> Self {
        match err {
            keepsake_core::Error::NotFound(missing, _) => ApiError::NotFound(missing),
            source => ApiError::Internal {
                context: op.failure_message(kind),
                source,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Attach operation context to store results.
pub trait StoreResultExt<T> {
    fn or_api_error(self, op: Operation, kind: EntityKind) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for keepsake_core::Result<T> {
    fn or_api_error(self, op: Operation, kind: EntityKind) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_store(e, op, kind))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(details) => json!({
                "success": false,
                "error": "Validation failed",
                "details": details,
            }),
            ApiError::NotFound(kind) => json!({
                "success": false,
                "error": format!("{} not found", kind.label()),
            }),
            ApiError::Internal { context, source } => {
                error!(
                    subsystem = "api",
                    component = "error",
                    error = %source,
                    "{}",
                    context
                );
                json!({
                    "success": false,
                    "error": context,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
