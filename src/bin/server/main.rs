#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! REST API for the outreach mailer

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use outreach_mailer::{
    domain::{
        auth::{AuthConfig, SharedSecretPolicy},
        mail::{
            dispatch::{OutreachConfig, OutreachServiceImpl},
            resumes::ResumeSelector,
        },
    },
    infrastructure::{
        database::postgres::{DatabaseConnectionDetails, PostgresDatabase},
        email::smtp::{SMTPConfig, SMTPMailer},
        http::{state::AppState, HttpServer, HttpServerConfig},
        spreadsheet::excel::ExcelReader,
        uploads::UploadStore,
    },
};

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The database connection details
    #[clap(flatten)]
    pub db: DatabaseConnectionDetails,

    /// The SMTP transport configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,

    /// The request authentication configuration
    #[clap(flatten)]
    pub auth: AuthConfig,

    /// The dispatch configuration
    #[clap(flatten)]
    pub outreach: OutreachConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Failed to load environment: {}", e);

        return Err(e.into());
    }

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let postgres = Arc::new(PostgresDatabase::new(&args.db.connection_string).await?);

    sqlx::migrate!().run(postgres.connection()).await?;

    let mailer = Arc::new(SMTPMailer::new(args.smtp)?);
    let spreadsheets = Arc::new(ExcelReader::new());
    let resumes = ResumeSelector::with_default_rules(&args.outreach.resume_dir);

    let outreach = OutreachServiceImpl::new(postgres, mailer, spreadsheets, resumes, args.outreach);
    let auth = SharedSecretPolicy::new(args.auth);
    let uploads = UploadStore::new(&args.server.upload_dir);

    let state = AppState::new(outreach, auth, uploads);

    HttpServer::new(state, args.server).await?.run().await
}
