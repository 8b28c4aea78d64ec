//! HTTP Server

use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use axum::{extract::Request, Router};
use axum_server::Handle;
use clap::Parser;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug, info, info_span};

use crate::domain::{auth::AuthPolicy, mail::dispatch::OutreachService};

use handlers::v1;
use state::AppState;

pub mod errors;
pub mod handlers;
pub mod open_api;
pub mod state;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(short, long, env = "HTTP_PORT", default_value = "3000")]
    pub port: u16,

    /// The directory uploaded spreadsheets are stored in
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,
}

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`.
    pub async fn new(
        state: AppState<impl OutreachService, impl AuthPolicy>,
        config: HttpServerConfig,
    ) -> Result<Self> {
        let router = router(state);

        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let listener = TcpListener::bind(address)
            .with_context(|| format!("failed to listen on {}", config.port))?;

        Ok(Self { router, listener })
    }

    /// Runs the HTTP server.
    #[mutants::skip]
    pub async fn run(self) -> Result<()> {
        debug!(
            "listening on {}",
            self.listener
                .local_addr()
                .context("failed to get local address")?
        );

        let handle = Handle::new();

        let server = axum_server::from_tcp(self.listener)
            .handle(handle.clone())
            .serve(self.router.into_make_service());

        tokio::select! {
            result = server => result.context("server error")?,
            _ = shutdown_signal(Some(handle)) => {
                info!("Shutting down HTTP server");
            }
        }

        Ok(())
    }
}

/// Create the application's router
pub fn router<O: OutreachService, A: AuthPolicy>(state: AppState<O, A>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    Router::new()
        .nest("/api/v1", v1::router())
        .layer(trace_layer)
        .layer(CatchPanicLayer::custom(handlers::panic_handler))
        .with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Option<Handle>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
