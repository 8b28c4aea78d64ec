//! Tracking pixel handler

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lazy_static::lazy_static;
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{auth::AuthPolicy, mail::dispatch::OutreachService},
    infrastructure::http::state::AppState,
};

lazy_static! {
    /// A 1x1 transparent PNG, served whatever happens to the lookup.
    static ref TRACKING_PIXEL: Vec<u8> = STANDARD
        .decode(
            "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVQImWNgYAAAAAMAAWgmWQ0AAAAASUVORK5CYII=",
        )
        .unwrap();
}

/// Serve the open-tracking pixel and record the view.
///
/// Always answers 200 with the pixel: a broken image in the recipient's
/// client would give the tracking away.
#[utoipa::path(
    get,
    operation_id = "track_view",
    tag = "Mail",
    path = "/api/v1/mail/view/{id}",
    params(
        ("id" = String, Path, description = "The delivery log entry id"),
    ),
    responses(
        (status = StatusCode::OK, description = "The tracking pixel", content_type = "image/png"),
    )
)]
pub async fn handler<O: OutreachService, A: AuthPolicy>(
    State(state): State<AppState<O, A>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match Uuid::parse_str(&id) {
        Ok(id) => {
            if let Err(err) = state.outreach.mark_viewed(&id).await {
                debug!(%id, %err, "could not record tracking pixel view");
            }
        }
        Err(_) => debug!(id, "tracking pixel fetched with a malformed id"),
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/png")],
        TRACKING_PIXEL.clone(),
    )
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use mockall::predicate::eq;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::mail::{
            delivery_log::errors::UpdateLogEntryError, dispatch::MockOutreachService,
        },
        infrastructure::http::{router, state::tests::test_state},
    };

    use super::TRACKING_PIXEL;

    #[tokio::test]
    async fn test_track_view_records_the_view_and_serves_the_pixel() -> TestResult {
        let id = Uuid::now_v7();
        let mut outreach = MockOutreachService::new();

        outreach
            .expect_mark_viewed()
            .times(1)
            .with(eq(id))
            .returning(|_| Ok(()));

        let state = test_state(Some(outreach), None);

        let response = TestServer::new(router(state))?
            .get(&format!("/api/v1/mail/view/{id}"))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.header("content-type"), "image/png");
        assert_eq!(response.as_bytes().to_vec(), *TRACKING_PIXEL);

        Ok(())
    }

    #[tokio::test]
    async fn test_track_view_serves_the_pixel_for_a_malformed_id() -> TestResult {
        // No outreach expectations: a malformed id never reaches the service.
        let state = test_state(None, None);

        let response = TestServer::new(router(state))?
            .get("/api/v1/mail/view/not-a-uuid")
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.as_bytes().to_vec(), *TRACKING_PIXEL);

        Ok(())
    }

    #[tokio::test]
    async fn test_track_view_serves_the_pixel_when_recording_fails() -> TestResult {
        let mut outreach = MockOutreachService::new();

        outreach
            .expect_mark_viewed()
            .returning(|_| Err(UpdateLogEntryError::UnknownError(anyhow!("store down"))));

        let state = test_state(Some(outreach), None);

        let response = TestServer::new(router(state))?
            .get(&format!("/api/v1/mail/view/{}", Uuid::now_v7()))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);

        Ok(())
    }
}
