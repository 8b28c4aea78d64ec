//! Delivery history handlers

use askama::Template;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    domain::{
        auth::AuthPolicy,
        mail::{
            delivery_log::{DeliveryHistoryPage, DeliveryLogEntry},
            dispatch::OutreachService,
        },
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Delivery history query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryParams {
    /// The page to read, starting at 1
    pub page: Option<i64>,

    /// How many entries per page
    pub limit: Option<i64>,
}

/// Read a page of delivery history as JSON
#[utoipa::path(
    get,
    operation_id = "history",
    tag = "Mail",
    path = "/api/v1/mail/history",
    params(HistoryParams),
    responses(
        (status = StatusCode::OK, description = "A page of delivery history", body = DeliveryHistoryPage),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn handler<O: OutreachService, A: AuthPolicy>(
    State(state): State<AppState<O, A>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<DeliveryHistoryPage>, ApiError> {
    let page = state
        .outreach
        .history(params.page.unwrap_or(0), params.limit.unwrap_or(0))
        .await?;

    Ok(Json(page))
}

/// One rendered history table row
#[derive(Debug)]
struct HistoryRow {
    name: String,
    to: String,
    subject: String,
    viewed: bool,
    sent_at: String,
}

impl From<&DeliveryLogEntry> for HistoryRow {
    fn from(entry: &DeliveryLogEntry) -> Self {
        Self {
            name: entry.name.clone(),
            to: entry.to.clone(),
            subject: entry.subject.clone(),
            viewed: entry.viewed,
            sent_at: if entry.is_sent {
                entry.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
            } else {
                "Failed".to_string()
            },
        }
    }
}

/// One pagination link
#[derive(Debug)]
struct PageLink {
    number: i64,
    active: bool,
}

/// The rendered delivery history page
#[derive(Debug, Template)]
#[template(path = "mail/history.html")]
pub struct HistoryPageTemplate {
    rows: Vec<HistoryRow>,
    pages: Vec<PageLink>,
    limit: i64,
    total_records: i64,
}

impl From<DeliveryHistoryPage> for HistoryPageTemplate {
    fn from(page: DeliveryHistoryPage) -> Self {
        Self {
            rows: page.data.iter().map(HistoryRow::from).collect(),
            pages: (1..=page.total_pages)
                .map(|number| PageLink {
                    number,
                    active: number == page.page,
                })
                .collect(),
            limit: page.limit,
            total_records: page.total_records,
        }
    }
}

/// Read a page of delivery history as an HTML table
#[utoipa::path(
    get,
    operation_id = "history_html",
    tag = "Mail",
    path = "/api/v1/mail/history/html",
    params(HistoryParams),
    responses(
        (status = StatusCode::OK, description = "A rendered page of delivery history", content_type = "text/html"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn html_handler<O: OutreachService, A: AuthPolicy>(
    State(state): State<AppState<O, A>>,
    Query(params): Query<HistoryParams>,
) -> Result<HistoryPageTemplate, ApiError> {
    let page = state
        .outreach
        .history(params.page.unwrap_or(0), params.limit.unwrap_or(0))
        .await?;

    Ok(HistoryPageTemplate::from(page))
}
