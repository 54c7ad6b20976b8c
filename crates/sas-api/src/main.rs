//! # sas-api: Binary Entry Point
//!
//! Reads configuration from the environment, opens the database, seeds the
//! built-in templates, and serves the API.

use sas_api::config::AppConfig;
use sas_api::state::AppState;
use sas_core::TemplateCatalog;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let pool = sas_api::db::init_pool(&config.database).await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let catalog = TemplateCatalog::builtin()?;
    let seeded = sas_api::db::templates::seed(&pool, catalog.templates()).await?;
    tracing::info!(
        available = catalog.len(),
        inserted = seeded,
        "standard templates seeded"
    );

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let port = config.port;
    let app = sas_api::app(AppState::new(pool, config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Standards assessment API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Structured tracing: `RUST_LOG` filter (default `info`), JSON lines when
/// `LOG_FORMAT=json`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
