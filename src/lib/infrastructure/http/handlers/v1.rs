use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{
    domain::{auth::AuthPolicy, mail::dispatch::OutreachService},
    infrastructure::http::{open_api::ApiDocs, state::AppState},
};

pub mod mail;
pub mod stoplight;
pub mod uptime;

pub fn router<O: OutreachService, A: AuthPolicy>() -> Router<AppState<O, A>> {
    Router::new()
        .route("/", get(stoplight::handler))
        .route("/openapi.json", get(Json(ApiDocs::openapi())))
        .route("/uptime", get(uptime::handler))
        .route("/mail/bulk", post(mail::send_bulk::handler))
        .route("/mail/single", post(mail::send_single::handler))
        .route("/mail/view/:id", get(mail::track_view::handler))
        .route("/mail/history", get(mail::history::handler))
        .route("/mail/history/html", get(mail::history::html_handler))
}
