//! OpenAPI module

use utoipa::OpenApi;

use crate::domain::mail::delivery_log::{DeliveryHistoryPage, DeliveryLogEntry};
use crate::infrastructure::http::{errors::ErrorResponse, handlers::v1::*};

#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Outreach Mailer"),
    paths(
        mail::send_single::handler,
        mail::send_bulk::handler,
        mail::track_view::handler,
        mail::history::handler,
        mail::history::html_handler,
        uptime::handler
    ),
    components(schemas(
        mail::send_single::SendSingleBody,
        mail::send_single::SendSingleResponse,
        mail::send_bulk::SendBulkBody,
        mail::send_bulk::SendBulkResponse,
        DeliveryHistoryPage,
        DeliveryLogEntry,
        uptime::UptimeResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDocs;
