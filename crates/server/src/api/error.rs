//! Error envelope shared by every route.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{error, warn};
use vibraze_api_types::ErrorResponse;
use vibraze_core::domain::DomainError;

use crate::gateway::GatewayError;

/// API error type. Renders as `{ "success": false, "error": ..., "details": ... }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Replaces the headline and keeps the previous message as details when none were set.
    pub fn titled(mut self, message: impl Into<String>) -> Self {
        let previous = std::mem::replace(&mut self.message, message.into());
        if self.details.is_none() {
            self.details = Some(Value::String(previous));
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotConfigured(service) => {
                error!(service, "gateway credentials are missing");
                ApiError::internal(format!("{service} credentials are not configured"))
            }
            GatewayError::Rejected {
                service,
                status,
                message,
                body,
            } => ApiError::bad_request(format!("{service} rejected the request")).with_details(
                json!({
                    "message": message,
                    "status": status,
                    "response": body,
                }),
            ),
            GatewayError::Transport { service, source } => {
                error!(service, error = %source, "gateway request failed");
                ApiError::internal("internal server error")
                    .with_details(format!("request to {service} failed: {source}"))
            }
            GatewayError::Decode { service, message } => {
                error!(service, %message, "gateway response could not be decoded");
                ApiError::internal("internal server error")
                    .with_details(format!("unexpected response from {service}: {message}"))
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        error!(error = %format!("{err:#}"), "request failed");
        ApiError::internal("internal server error").with_details(format!("{err:#}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected JSON body");
        ApiError::bad_request("invalid JSON body").with_details(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request("invalid query string").with_details(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            success: false,
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}
