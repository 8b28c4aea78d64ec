//! Bulk send handler

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::{auth::AuthPolicy, mail::dispatch::OutreachService},
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Bulk send request body
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SendBulkBody {
    /// The spreadsheet of recipients
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,

    /// The shared secret
    pub password: Option<String>,
}

/// Bulk send response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendBulkResponse {
    /// A summary of the batch outcome
    #[schema(example = "Successfully sent 2 out of 3 emails. Failed: 1")]
    pub message: String,
}

/// Send outreach emails to every recipient in an uploaded spreadsheet
#[utoipa::path(
    post,
    operation_id = "send_bulk",
    tag = "Mail",
    path = "/api/v1/mail/bulk",
    request_body(content = SendBulkBody, content_type = "multipart/form-data"),
    responses(
        (status = StatusCode::CREATED, description = "Batch processed", body = SendBulkResponse),
        (status = StatusCode::UNAUTHORIZED, description = "Invalid or missing password", body = ErrorResponse),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Unprocessable entity", body = ErrorResponse),
    )
)]
pub async fn handler<O: OutreachService, A: AuthPolicy>(
    State(state): State<AppState<O, A>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SendBulkResponse>), ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut password: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .unwrap_or("upload.xlsx")
                    .to_string();

                file = Some((file_name, field.bytes().await?.to_vec()));
            }
            Some("password") => {
                password = Some(field.text().await?);
            }
            _ => {}
        }
    }

    state.auth.validate(password.as_deref())?;

    let Some((file_name, bytes)) = file else {
        return Err(ApiError::new_422(
            "Spreadsheet file is required for bulk email sending",
        ));
    };

    let path = state.uploads.save(&file_name, &bytes).await?;

    let summary = state.outreach.send_bulk(&path).await?;

    Ok((
        StatusCode::CREATED,
        Json(SendBulkResponse {
            message: summary.to_string(),
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
            auth::MockAuthPolicy,
            mail::dispatch::{BulkSummary, MockOutreachService, RecipientOutcome},
        },
        infrastructure::http::{
            errors::ErrorResponse,
            handlers::v1::mail::send_bulk::SendBulkResponse,
            router,
            state::tests::test_state,
        },
    };

    const BOUNDARY: &str = "outreach-test-boundary";

    fn allow_all() -> MockAuthPolicy {
        let mut auth = MockAuthPolicy::new();
        auth.expect_validate().returning(|_| Ok(()));
        auth
    }

    fn multipart_body(file: Option<&[u8]>, password: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();

        if let Some(bytes) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                     name=\"file\"; filename=\"recipients.xlsx\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }

        if let Some(password) = password {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; \
                     name=\"password\"\r\n\r\n{password}\r\n"
                )
                .as_bytes(),
            );
        }

        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    #[tokio::test]
    async fn test_send_bulk_reports_the_batch_summary() -> TestResult {
        let mut outreach = MockOutreachService::new();

        outreach.expect_send_bulk().returning(|_| {
            Ok(BulkSummary {
                attempted: 3,
                succeeded: 2,
                failed: 1,
                outcomes: vec![RecipientOutcome {
                    email: "c@example.com".to_string(),
                    success: false,
                    reason: Some("relay refused".to_string()),
                }],
            })
        });

        let state = test_state(Some(outreach), Some(allow_all()));

        let response = TestServer::new(router(state))?
            .post("/api/v1/mail/bulk")
            .content_type(&format!("multipart/form-data; boundary={BOUNDARY}"))
            .bytes(multipart_body(Some(b"not a real workbook"), Some("supersecret")).into())
            .await;

        let json = response.json::<SendBulkResponse>();

        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(
            json.message,
            "Successfully sent 2 out of 3 emails. Failed: 1"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_send_bulk_requires_a_file() -> TestResult {
        let state = test_state(None, Some(allow_all()));

        let response = TestServer::new(router(state))?
            .post("/api/v1/mail/bulk")
            .content_type(&format!("multipart/form-data; boundary={BOUNDARY}"))
            .bytes(multipart_body(None, Some("supersecret")).into())
            .await;

        let json = response.json::<ErrorResponse>();

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json.error,
            "Spreadsheet file is required for bulk email sending"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_send_bulk_checks_the_password_before_saving_the_upload() -> TestResult {
        let mut auth = MockAuthPolicy::new();

        auth.expect_validate()
            .returning(|_| Err(crate::domain::auth::AuthError::InvalidCredentials));

        let state = test_state(None, Some(auth));

        let response = TestServer::new(router(state))?
            .post("/api/v1/mail/bulk")
            .content_type(&format!("multipart/form-data; boundary={BOUNDARY}"))
            .bytes(multipart_body(Some(b"bytes"), Some("wrong")).into())
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}
