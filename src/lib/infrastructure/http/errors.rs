//! API error-handling module

use std::fmt;

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    auth::AuthError,
    mail::{
        delivery_log::errors::ListDeliveryLogError,
        dispatch::errors::{BulkSendError, SendError},
    },
};

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "Internal server error")]
    pub error: String,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "Internal server error")]
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a new unauthorized error
    pub fn new_401(message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Create a new unprocessable entity error
    pub fn new_422(message: &str) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::new_401("Invalid or missing password"),
        }
    }
}

impl From<SendError> for ApiError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::MissingEmail | SendError::MissingJobRole | SendError::InvalidEmail => {
                ApiError::new_422(&err.to_string())
            }
            SendError::TransportFailure(_) => ApiError::new_400(&err.to_string()),
            SendError::UnknownError(err) => unknown_error(Some(err.to_string())),
        }
    }
}

impl From<BulkSendError> for ApiError {
    fn from(err: BulkSendError) -> Self {
        match err {
            BulkSendError::NoValidRecipients => ApiError::new_422(&err.to_string()),
            BulkSendError::Spreadsheet(err) => ApiError::new_422(&err.to_string()),
            BulkSendError::UnknownError(err) => unknown_error(Some(err.to_string())),
        }
    }
}

impl From<ListDeliveryLogError> for ApiError {
    fn from(err: ListDeliveryLogError) -> Self {
        match err {
            ListDeliveryLogError::UnknownError(err) => unknown_error(Some(err.to_string())),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::new(err.status(), &err.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), &rejection.body_text())
    }
}

fn unknown_error(message: Option<String>) -> ApiError {
    if let Some(message) = message {
        ApiError::new_500(&message)
    } else {
        ApiError::new_500("An unknown error occurred, please try again")
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use testresult::TestResult;

    use super::ApiError;
    use crate::domain::mail::dispatch::errors::SendError;

    #[tokio::test]
    async fn test_error_response() -> TestResult {
        let error = ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        };

        let response = error.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await?;

        assert_eq!(body, r#"{"error":"Internal server error"}"#);

        Ok(())
    }

    #[test]
    fn test_api_error_from_error() {
        let error = anyhow!("Internal server error");
        let api_error = ApiError::from(error);

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.message, "Internal server error");
    }

    #[test]
    fn test_transport_failure_keeps_the_transport_reason() {
        let api_error = ApiError::from(SendError::TransportFailure("relay refused".to_string()));

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.message, "Failed to send email: relay refused");
    }

    #[test]
    fn test_missing_email_is_unprocessable() {
        let api_error = ApiError::from(SendError::MissingEmail);

        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.message, "Missing required field: email");
    }
}
