//! Command-line surface for the Penna binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the Penna binary.
#[derive(Debug, Parser)]
#[command(name = "penna", version, about = "Penna admin console")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "PENNA_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the admin console HTTP service.
    Serve(Box<ServeArgs>),
    /// Verify that the remote platform API is reachable, then exit.
    Check(CheckArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub api: ApiOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ApiOverrides {
    /// Override the platform API base URL.
    #[arg(long = "api-base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the bearer token used against the platform API.
    #[arg(long = "api-token", env = "PENNA_API_TOKEN", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Read the bearer token from a file instead of the environment.
    #[arg(long = "api-token-file", value_name = "PATH")]
    pub token_file: Option<PathBuf>,

    /// Override the per-request timeout against the platform API.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS")]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub api: ApiOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the default page size used by list screens.
    #[arg(long = "ui-page-size", value_name = "COUNT")]
    pub ui_page_size: Option<u32>,

    /// Override the list polling interval (clamped to 30-60 seconds).
    #[arg(long = "ui-poll-interval-seconds", value_name = "SECONDS")]
    pub ui_poll_interval_seconds: Option<u64>,
}
