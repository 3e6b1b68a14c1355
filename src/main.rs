use std::{process, sync::Arc};

use penna::{
    application::error::AppError,
    config::{self, ApiSettings, TokenSource},
    infra::{
        api::ApiClient,
        error::InfraError,
        http::{self, AdminState, build_admin_router},
        telemetry,
    },
};
use penna_api_types::{Page, TagRecord};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Check(_) => run_check(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let api = Arc::new(build_api_client(&settings.api)?);
    let state = AdminState::new(api, settings.ui.clone());
    let router = build_admin_router(state);

    info!(
        target = "penna::serve",
        api = %settings.api.base_url,
        "starting admin console"
    );

    http::serve(settings.server.addr, router)
        .await
        .map_err(AppError::from)
}

/// Issue a minimal authenticated list request so operators can verify
/// credentials and connectivity before deploying.
async fn run_check(settings: config::Settings) -> Result<(), AppError> {
    let api = build_api_client(&settings.api)?;

    let page: Page<TagRecord> = api
        .get_json(
            "tags",
            &[("page", "1".to_string()), ("limit", "1".to_string())],
        )
        .await?;

    info!(
        target = "penna::check",
        api = %settings.api.base_url,
        tags = page.total,
        "platform API is reachable"
    );
    Ok(())
}

fn build_api_client(api: &ApiSettings) -> Result<ApiClient, AppError> {
    let token = resolve_token(&api.token)?;
    ApiClient::new(&api.base_url, token, api.timeout).map_err(AppError::from)
}

fn resolve_token(source: &TokenSource) -> Result<String, AppError> {
    let token = match source {
        TokenSource::Inline(token) => token.clone(),
        TokenSource::File(path) => std::fs::read_to_string(path)
            .map_err(|err| AppError::from(InfraError::Io(err)))?
            .trim()
            .to_string(),
    };

    if token.is_empty() {
        return Err(AppError::from(InfraError::configuration(
            "the resolved bearer token is empty",
        )));
    }

    Ok(token)
}
