//! Single send handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{
        auth::AuthPolicy,
        mail::{dispatch::OutreachService, recipients::Recipient},
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Single send request body
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SendSingleBody {
    /// The recipient's name, defaults to "there"
    #[schema(example = "Priya")]
    pub name: Option<String>,

    /// The recipient's email address
    #[schema(example = "hr@example.com")]
    pub email: Option<String>,

    /// The job role to apply for
    #[serde(rename = "jobRole")]
    #[schema(example = "Java Developer")]
    pub job_role: Option<String>,

    /// The company name, when known
    #[serde(rename = "companyName")]
    #[schema(example = "Acme")]
    pub company_name: Option<String>,

    /// The shared secret
    #[schema(example = "supersecret")]
    pub password: Option<String>,
}

/// Single send response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendSingleResponse {
    /// A human-readable confirmation
    #[schema(example = "Email sent successfully to hr@example.com")]
    pub message: String,
}

/// Send one outreach email
#[utoipa::path(
    post,
    operation_id = "send_single",
    tag = "Mail",
    path = "/api/v1/mail/single",
    request_body = SendSingleBody,
    responses(
        (status = StatusCode::CREATED, description = "Email sent", body = SendSingleResponse),
        (status = StatusCode::UNAUTHORIZED, description = "Invalid or missing password", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Unprocessable entity", body = ErrorResponse),
        (status = StatusCode::BAD_REQUEST, description = "The transport rejected the message", body = ErrorResponse),
    )
)]
pub async fn handler<O: OutreachService, A: AuthPolicy>(
    State(state): State<AppState<O, A>>,
    request: Result<Json<SendSingleBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SendSingleResponse>), ApiError> {
    let Json(request) = request?;

    state.auth.validate(request.password.as_deref())?;

    let recipient = Recipient::new(
        request.name,
        request.email.unwrap_or_default(),
        request.job_role.unwrap_or_default(),
        request.company_name,
    );

    let to = state.outreach.send_single(&recipient).await?;

    Ok((
        StatusCode::CREATED,
        Json(SendSingleResponse {
            message: format!("Email sent successfully to {to}"),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::{
        domain::{
            auth::{AuthError, MockAuthPolicy},
            mail::{
                dispatch::{errors::SendError, MockOutreachService},
                value_objects::email_address::EmailAddress,
            },
        },
        infrastructure::http::{
            errors::ErrorResponse,
            handlers::v1::mail::send_single::{SendSingleBody, SendSingleResponse},
            router,
            state::tests::test_state,
        },
    };

    fn allow_all() -> MockAuthPolicy {
        let mut auth = MockAuthPolicy::new();
        auth.expect_validate().returning(|_| Ok(()));
        auth
    }

    fn body(email: &str, job_role: &str) -> SendSingleBody {
        SendSingleBody {
            name: Some("Priya".to_string()),
            email: Some(email.to_string()),
            job_role: Some(job_role.to_string()),
            company_name: None,
            password: Some("supersecret".to_string()),
        }
    }

    #[tokio::test]
    async fn test_send_single_success() -> TestResult {
        let mut outreach = MockOutreachService::new();

        outreach
            .expect_send_single()
            .withf(|recipient| {
                recipient.email == "hr@example.com" && recipient.job_role == "Java Developer"
            })
            .returning(|_| Ok(EmailAddress::new_unchecked("hr@example.com")));

        let state = test_state(Some(outreach), Some(allow_all()));

        let response = TestServer::new(router(state))?
            .post("/api/v1/mail/single")
            .json(&body("hr@example.com", "Java Developer"))
            .await;

        let json = response.json::<SendSingleResponse>();

        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(json.message, "Email sent successfully to hr@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_send_single_rejects_a_bad_password() -> TestResult {
        let mut auth = MockAuthPolicy::new();

        auth.expect_validate()
            .returning(|_| Err(AuthError::InvalidCredentials));

        // No outreach expectations: the service must never be reached.
        let state = test_state(None, Some(auth));

        let response = TestServer::new(router(state))?
            .post("/api/v1/mail/single")
            .json(&body("hr@example.com", "Java Developer"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(json.error, "Invalid or missing password");

        Ok(())
    }

    #[tokio::test]
    async fn test_send_single_missing_email() -> TestResult {
        let mut outreach = MockOutreachService::new();

        outreach
            .expect_send_single()
            .returning(|_| Err(SendError::MissingEmail));

        let state = test_state(Some(outreach), Some(allow_all()));

        let mut body = body("", "Java Developer");
        body.email = None;

        let response = TestServer::new(router(state))?
            .post("/api/v1/mail/single")
            .json(&body)
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json.error, "Missing required field: email");

        Ok(())
    }

    #[tokio::test]
    async fn test_send_single_transport_failure_carries_the_reason() -> TestResult {
        let mut outreach = MockOutreachService::new();

        outreach
            .expect_send_single()
            .returning(|_| Err(SendError::TransportFailure("relay refused".to_string())));

        let state = test_state(Some(outreach), Some(allow_all()));

        let response = TestServer::new(router(state))?
            .post("/api/v1/mail/single")
            .json(&body("hr@example.com", "Java Developer"))
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(json.error, "Failed to send email: relay refused");

        Ok(())
    }
}
