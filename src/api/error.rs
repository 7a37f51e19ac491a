use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::forecast::ForecastError;

/// Failures surfaced by the sizing API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request decoded but a field is out of range
    #[error("Validation error: {message}")]
    Validation { message: String, fields: Vec<String> },

    #[error("Weather forecast unavailable: {0}")]
    Upstream(#[from] ForecastError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::Validation { .. } => "ValidationError",
            ApiError::Upstream(_) => "UpstreamError",
            ApiError::Internal(_) => "InternalServerError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.kind();

        let (message, fields) = match self {
            ApiError::Internal(ref e) => {
                tracing::error!(error = %e, "request failed");
                ("An internal error occurred".to_string(), Vec::new())
            }
            ApiError::Upstream(ref e) => {
                tracing::warn!(error = %e, "forecast provider failed");
                (self.to_string(), Vec::new())
            }
            ApiError::Validation { message, fields } => {
                tracing::debug!(?fields, "rejected invalid request");
                (format!("Validation error: {message}"), fields)
            }
            ApiError::BadRequest(_) => {
                tracing::debug!(error = %self, "bad request");
                (self.to_string(), Vec::new())
            }
        };

        (status, Json(ErrorBody { error, message, fields })).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        ApiError::Validation {
            message: errors.to_string(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PanelGroup;
    use validator::Validate;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("date".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ForecastError::Status(503)).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_lists_fields() {
        let group = PanelGroup {
            tilt_deg: 95.0,
            count: 2,
        };
        let error = ApiError::from(group.validate().unwrap_err());

        assert_eq!(error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        match error {
            ApiError::Validation { fields, .. } => assert_eq!(fields, vec!["tilt_deg"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_upstream_message() {
        let error = ApiError::from(ForecastError::InvalidFormat("hourly.cloud_cover missing".into()));
        assert_eq!(
            error.to_string(),
            "Weather forecast unavailable: invalid weather data: hourly.cloud_cover missing"
        );
        assert_eq!(error.kind(), "UpstreamError");
    }
}
