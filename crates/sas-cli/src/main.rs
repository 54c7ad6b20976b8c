//! # sas CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sas_cli::client::ApiClient;
use sas_cli::task::{run_task, TaskArgs};
use sas_cli::templates::{run_templates, TemplatesArgs};
use sas_cli::DEFAULT_API_URL;

/// Standards self-assessment CLI.
///
/// Lists the built-in standard templates and creates, inspects, and scores
/// assessment tasks on a running `sas-api` server.
#[derive(Parser, Debug)]
#[command(name = "sas", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the API, including the `/api` prefix.
    #[arg(long, env = "SAS_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api: String,

    /// Bearer token for servers started with AUTH_TOKEN.
    #[arg(long, env = "SAS_API_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in standard templates.
    Templates(TemplatesArgs),

    /// Assessment task operations (create, show, result).
    Task(TaskArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(api = %cli.api, "sas CLI starting");

    let result = match &cli.command {
        Commands::Templates(args) => run_templates(args),
        Commands::Task(args) => ApiClient::new(&cli.api, cli.token.as_deref())
            .map_err(anyhow::Error::from)
            .and_then(|client| run_task(args, &client)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
