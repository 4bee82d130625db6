use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;

/// Every failure a handler can report, already mapped to its HTTP shape.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404 `{message}`
    #[error("{0}")]
    NotFound(String),
    /// 400 `{message, errors}`
    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },
    /// 400 `{message}` for bodies that never reached a validator.
    #[error("{0}")]
    BadRequest(String),
    /// 500 `{message, error}`
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { message: "validation failed".into(), errors }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Validation(errors) => ApiError::validation(errors),
            ServiceError::Model(inner) => ApiError::Internal(inner.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(message) | ApiError::BadRequest(message) => json!({ "message": message }),
            ApiError::Validation { message, errors } => json!({ "message": message, "errors": errors }),
            ApiError::Internal(message) => {
                error!(error = %message, "internal fault");
                json!({ "message": message, "error": { "status": status.as_u16() } })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_statuses() {
        let nf: ApiError = ServiceError::not_found("product").into();
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);
        assert_eq!(nf.to_string(), "product not found");

        let v: ApiError = ServiceError::Validation(vec!["price must be a finite number".into()]).into();
        assert_eq!(v.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(v, ApiError::Validation { ref errors, .. } if errors.len() == 1));

        let m: ApiError = ServiceError::Model(ModelError::Validation("bad".into())).into();
        assert_eq!(m.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn responses_carry_the_mapped_status() {
        assert_eq!(ApiError::not_found("x").into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Internal("x".into()).into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
